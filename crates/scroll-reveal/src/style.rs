//! Style mapper: smoothed progress → inline style values.
//!
//! Pure and deterministic. The driver decides whether to call it; this
//! module only computes values and renders them as CSS text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;
use crate::curve::{clamp_unit, RevealCurve};
use crate::host::{ElementRole, StyleProperty};

/// `will-change` hint set on both animated elements at mount
pub const WILL_CHANGE_HINT: &str = "transform, opacity";

/// CSS `visibility`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// `visible`
    Visible,
    /// `hidden`
    Hidden,
}

impl Visibility {
    /// CSS keyword
    #[must_use]
    pub const fn as_css(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Hero text styles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Uniform scale
    pub scale: f64,
    /// Vertical offset in px
    pub translate_y: f64,
    /// Hidden once fully transparent so it stops taking pointer events
    pub visibility: Visibility,
}

impl TextStyle {
    /// Compute the text styles for `progress`
    #[must_use]
    pub fn at(progress: f64, config: &RevealConfig) -> Self {
        let opacity = RevealCurve::TextOpacity.evaluate(progress, config);
        Self {
            opacity,
            scale: RevealCurve::TextScale.evaluate(progress, config),
            translate_y: RevealCurve::TextTranslateY.evaluate(progress, config),
            visibility: if opacity <= 0.0 {
                Visibility::Hidden
            } else {
                Visibility::Visible
            },
        }
    }

    /// `transform` value
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!("scale({}) translateY({}px)", self.scale, self.translate_y)
    }
}

/// Game window styles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameWindowStyle {
    /// Local progress of the panel in [0, 1]
    pub progress: f64,
    /// Uniform scale, 0.5 → 1
    pub scale: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Tilt around the X axis in degrees
    pub rotate_x: f64,
    /// Vertical offset in px
    pub translate_y: f64,
    /// Perspective distance in px
    pub perspective: f64,
}

impl GameWindowStyle {
    /// Compute the game window styles for `progress`
    #[must_use]
    pub fn at(progress: f64, config: &RevealConfig) -> Self {
        Self {
            progress: RevealCurve::GameProgress.evaluate(progress, config),
            scale: RevealCurve::GameScale.evaluate(progress, config),
            opacity: RevealCurve::GameOpacity.evaluate(progress, config),
            rotate_x: RevealCurve::GameRotateX.evaluate(progress, config),
            translate_y: RevealCurve::GameTranslateY.evaluate(progress, config),
            perspective: config.perspective_px,
        }
    }

    /// `transform` value. Order matters: center, perspective, tilt, scale,
    /// then rise.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translate(-50%, -50%) perspective({}px) rotateX({}deg) scale({}) translateY({}px)",
            self.perspective, self.rotate_x, self.scale, self.translate_y
        )
    }
}

/// Every style value for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleFrame {
    /// Progress the frame was computed for
    pub progress: f64,
    /// Hero text
    pub text: TextStyle,
    /// Game window
    pub game_window: GameWindowStyle,
}

/// One inline style write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    /// Target element
    pub role: ElementRole,
    /// Property
    pub property: StyleProperty,
    /// CSS value
    pub value: String,
}

impl StyleDeclaration {
    fn new(role: ElementRole, property: StyleProperty, value: impl Into<String>) -> Self {
        Self {
            role,
            property,
            value: value.into(),
        }
    }
}

impl StyleFrame {
    /// Map smoothed progress to styles. Progress outside [0, 1] is clamped.
    #[must_use]
    pub fn at(progress: f64, config: &RevealConfig) -> Self {
        let progress = clamp_unit(progress);
        Self {
            progress,
            text: TextStyle::at(progress, config),
            game_window: GameWindowStyle::at(progress, config),
        }
    }

    /// Writes in application order: text opacity, transform, visibility,
    /// then game window transform and opacity.
    #[must_use]
    pub fn declarations(&self) -> Vec<StyleDeclaration> {
        vec![
            StyleDeclaration::new(
                ElementRole::Text,
                StyleProperty::Opacity,
                self.text.opacity.to_string(),
            ),
            StyleDeclaration::new(
                ElementRole::Text,
                StyleProperty::Transform,
                self.text.transform_css(),
            ),
            StyleDeclaration::new(
                ElementRole::Text,
                StyleProperty::Visibility,
                self.text.visibility.as_css(),
            ),
            StyleDeclaration::new(
                ElementRole::GameWindow,
                StyleProperty::Transform,
                self.game_window.transform_css(),
            ),
            StyleDeclaration::new(
                ElementRole::GameWindow,
                StyleProperty::Opacity,
                self.game_window.opacity.to_string(),
            ),
        ]
    }

    /// The `will-change` hints written once at mount
    #[must_use]
    pub fn mount_hints() -> [StyleDeclaration; 2] {
        [
            StyleDeclaration::new(ElementRole::Text, StyleProperty::WillChange, WILL_CHANGE_HINT),
            StyleDeclaration::new(
                ElementRole::GameWindow,
                StyleProperty::WillChange,
                WILL_CHANGE_HINT,
            ),
        ]
    }
}
