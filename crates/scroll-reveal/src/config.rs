//! Reveal configuration: element identifiers and tuning constants.
//!
//! The defaults are the values the hero page ships with. A page that uses
//! different ids (or wants a slower follow) can pass a JSON config to the
//! web entry point instead.

use serde::{Deserialize, Serialize};

use crate::result::{RevealError, RevealResult};

/// Id of the tall scroll container
pub const CONTAINER_ID: &str = "js-scroll-container";
/// Id of the hero text element
pub const TEXT_ID: &str = "js-hero-text";
/// Id of the game window panel
pub const GAME_WINDOW_ID: &str = "js-game-window";

/// Progress at which the hero text is fully faded out
pub const TEXT_FADE_END: f64 = 0.3;
/// Progress at which the game window starts to appear
pub const GAME_APPEAR_START: f64 = 0.2;
/// Fraction of the remaining distance covered per frame (0.01..0.1 feels smooth)
pub const EASE_FACTOR: f64 = 0.08;
/// Below this target/displayed gap the frame skips its DOM write
pub const IDLE_THRESHOLD: f64 = 0.0001;
/// Perspective distance applied to the game window tilt
pub const PERSPECTIVE_PX: f64 = 1000.0;

/// Identifiers of the three elements the reveal needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Scroll container whose bounding rect drives progress
    pub container: String,
    /// Hero text that fades away
    pub text: String,
    /// Game window panel that tilts into view
    pub game_window: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            container: CONTAINER_ID.to_string(),
            text: TEXT_ID.to_string(),
            game_window: GAME_WINDOW_ID.to_string(),
        }
    }
}

impl ElementIds {
    /// Create ids from explicit values
    #[must_use]
    pub fn new(
        container: impl Into<String>,
        text: impl Into<String>,
        game_window: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            text: text.into(),
            game_window: game_window.into(),
        }
    }

    fn validate(&self) -> RevealResult<()> {
        for (name, id) in [
            ("container", &self.container),
            ("text", &self.text),
            ("game_window", &self.game_window),
        ] {
            if id.trim().is_empty() {
                return Err(RevealError::invalid_config(format!(
                    "{name} id must not be empty"
                )));
            }
        }
        if self.container == self.text
            || self.container == self.game_window
            || self.text == self.game_window
        {
            return Err(RevealError::invalid_config(
                "element ids must be distinct",
            ));
        }
        Ok(())
    }
}

/// Full reveal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Element identifiers
    pub ids: ElementIds,
    /// Progress at which the text reaches zero opacity
    pub text_fade_end: f64,
    /// Progress at which the game window begins to appear
    pub game_appear_start: f64,
    /// Lerp factor applied each frame
    pub ease_factor: f64,
    /// Idle-skip threshold for DOM writes
    pub idle_threshold: f64,
    /// Perspective distance for the game window, in pixels
    pub perspective_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            text_fade_end: TEXT_FADE_END,
            game_appear_start: GAME_APPEAR_START,
            ease_factor: EASE_FACTOR,
            idle_threshold: IDLE_THRESHOLD,
            perspective_px: PERSPECTIVE_PX,
        }
    }
}

impl RevealConfig {
    /// Create the default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> RevealResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> RevealResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set element ids
    #[must_use]
    pub fn with_element_ids(mut self, ids: ElementIds) -> Self {
        self.ids = ids;
        self
    }

    /// Set the text fade end
    #[must_use]
    pub fn with_text_fade_end(mut self, value: f64) -> Self {
        self.text_fade_end = value;
        self
    }

    /// Set the game window appear start
    #[must_use]
    pub fn with_game_appear_start(mut self, value: f64) -> Self {
        self.game_appear_start = value;
        self
    }

    /// Set the lerp factor
    #[must_use]
    pub fn with_ease_factor(mut self, value: f64) -> Self {
        self.ease_factor = value;
        self
    }

    /// Set the idle-skip threshold
    #[must_use]
    pub fn with_idle_threshold(mut self, value: f64) -> Self {
        self.idle_threshold = value;
        self
    }

    /// Set the perspective distance
    #[must_use]
    pub fn with_perspective_px(mut self, value: f64) -> Self {
        self.perspective_px = value;
        self
    }

    /// Check every value is usable by the curves and the interpolator.
    ///
    /// The ease factor must lie in (0, 1]: anything above 1 overshoots the
    /// target and anything at or below 0 never converges.
    pub fn validate(&self) -> RevealResult<()> {
        self.ids.validate()?;

        let finite = [
            ("text_fade_end", self.text_fade_end),
            ("game_appear_start", self.game_appear_start),
            ("ease_factor", self.ease_factor),
            ("idle_threshold", self.idle_threshold),
            ("perspective_px", self.perspective_px),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RevealError::invalid_config(format!(
                "{name} must be finite"
            )));
        }

        if self.text_fade_end <= 0.0 {
            return Err(RevealError::invalid_config(
                "text_fade_end must be greater than 0",
            ));
        }
        if !(0.0..1.0).contains(&self.game_appear_start) {
            return Err(RevealError::invalid_config(
                "game_appear_start must be in [0, 1)",
            ));
        }
        if self.ease_factor <= 0.0 || self.ease_factor > 1.0 {
            return Err(RevealError::invalid_config(
                "ease_factor must be in (0, 1]",
            ));
        }
        if self.idle_threshold < 0.0 {
            return Err(RevealError::invalid_config(
                "idle_threshold must not be negative",
            ));
        }
        if self.perspective_px <= 0.0 {
            return Err(RevealError::invalid_config(
                "perspective_px must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = RevealConfig::default();
        assert_eq!(config.ids.container, "js-scroll-container");
        assert_eq!(config.ids.text, "js-hero-text");
        assert_eq!(config.ids.game_window, "js-game-window");
        assert_eq!(config.text_fade_end, 0.3);
        assert_eq!(config.game_appear_start, 0.2);
        assert_eq!(config.ease_factor, 0.08);
        assert_eq!(config.idle_threshold, 0.0001);
        assert_eq!(config.perspective_px, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RevealConfig::new()
            .with_text_fade_end(0.5)
            .with_game_appear_start(0.1)
            .with_ease_factor(0.2)
            .with_idle_threshold(0.001)
            .with_perspective_px(800.0)
            .with_element_ids(ElementIds::new("c", "t", "g"));
        assert_eq!(config.text_fade_end, 0.5);
        assert_eq!(config.game_appear_start, 0.1);
        assert_eq!(config.ease_factor, 0.2);
        assert_eq!(config.idle_threshold, 0.001);
        assert_eq!(config.perspective_px, 800.0);
        assert_eq!(config.ids.text, "t");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = RevealConfig::from_json(r#"{"ease_factor": 0.05}"#).unwrap();
        assert_eq!(config.ease_factor, 0.05);
        assert_eq!(config.text_fade_end, TEXT_FADE_END);
        assert_eq!(config.ids, ElementIds::default());
    }

    #[test]
    fn test_from_json_partial_ids() {
        let config = RevealConfig::from_json(r#"{"ids": {"text": "headline"}}"#).unwrap();
        assert_eq!(config.ids.text, "headline");
        assert_eq!(config.ids.container, CONTAINER_ID);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RevealConfig::new().with_ease_factor(0.1);
        let json = config.to_json().unwrap();
        assert_eq!(RevealConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = RevealConfig::from_json(r#"{"ease_factor": 1.5}"#).unwrap_err();
        assert!(err.to_string().contains("ease_factor"));

        let err = RevealConfig::from_json("{").unwrap_err();
        assert!(matches!(err, RevealError::Json(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RevealConfig::new().with_ease_factor(0.0),
            RevealConfig::new().with_ease_factor(f64::NAN),
            RevealConfig::new().with_text_fade_end(0.0),
            RevealConfig::new().with_game_appear_start(1.0),
            RevealConfig::new().with_game_appear_start(-0.1),
            RevealConfig::new().with_idle_threshold(-1.0),
            RevealConfig::new().with_perspective_px(0.0),
            RevealConfig::new().with_perspective_px(f64::INFINITY),
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_bad_ids() {
        let empty = RevealConfig::new().with_element_ids(ElementIds::new("", "t", "g"));
        assert!(empty.validate().is_err());

        let duplicate = RevealConfig::new().with_element_ids(ElementIds::new("a", "a", "g"));
        let err = duplicate.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }
}
