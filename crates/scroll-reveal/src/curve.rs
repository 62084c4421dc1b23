//! Response curves: how each animated property follows scroll progress.
//!
//! Every property written by the style mapper is one of these curves
//! evaluated at the smoothed progress. Keeping them named lets tests and
//! visual QA sample a curve or check recorded frames against it.

use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;

/// Clamp to the unit interval
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// A named property curve over progress in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealCurve {
    /// Text opacity, 1 → 0 by `text_fade_end`
    TextOpacity,
    /// Text scale, 1 → 1.5
    TextScale,
    /// Text downward drift in px, 0 → 100
    TextTranslateY,
    /// Game window local progress, 0 until `game_appear_start`, then → 1
    GameProgress,
    /// Game window scale, 0.5 → 1
    GameScale,
    /// Game window opacity, saturates at two thirds of game progress
    GameOpacity,
    /// Game window tilt in degrees, 60 → 0
    GameRotateX,
    /// Game window rise in px, 200 → 0
    GameTranslateY,
}

impl RevealCurve {
    /// Every curve
    pub const ALL: [Self; 8] = [
        Self::TextOpacity,
        Self::TextScale,
        Self::TextTranslateY,
        Self::GameProgress,
        Self::GameScale,
        Self::GameOpacity,
        Self::GameRotateX,
        Self::GameTranslateY,
    ];

    /// Evaluate the curve at `progress` (clamped to [0, 1] first)
    #[must_use]
    pub fn evaluate(&self, progress: f64, config: &RevealConfig) -> f64 {
        let p = clamp_unit(progress);
        match self {
            Self::TextOpacity => text_opacity(p, config.text_fade_end),
            Self::TextScale => 1.0 + p * 0.5,
            Self::TextTranslateY => p * 100.0,
            Self::GameProgress => game_progress(p, config.game_appear_start),
            Self::GameScale => 0.5 + game_progress(p, config.game_appear_start) * 0.5,
            Self::GameOpacity => (game_progress(p, config.game_appear_start) * 1.5).min(1.0),
            Self::GameRotateX => 60.0 - game_progress(p, config.game_appear_start) * 60.0,
            Self::GameTranslateY => 200.0 - game_progress(p, config.game_appear_start) * 200.0,
        }
    }

    /// Value at progress 0 and 1
    #[must_use]
    pub fn endpoints(&self, config: &RevealConfig) -> (f64, f64) {
        (self.evaluate(0.0, config), self.evaluate(1.0, config))
    }

    /// Whether the curve rises with progress
    #[must_use]
    pub const fn is_increasing(&self) -> bool {
        !matches!(
            self,
            Self::TextOpacity | Self::GameRotateX | Self::GameTranslateY
        )
    }
}

fn text_opacity(progress: f64, fade_end: f64) -> f64 {
    clamp_unit(1.0 - progress / fade_end)
}

fn game_progress(progress: f64, appear_start: f64) -> f64 {
    clamp_unit((progress - appear_start) / (1.0 - appear_start))
}

/// A sampled point on a curve
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Progress (0.0-1.0)
    pub progress: f64,
    /// Curve value at that progress
    pub value: f64,
}

/// Sample a curve at `num_samples` evenly spaced progress values.
#[must_use]
pub fn sample_curve(curve: RevealCurve, config: &RevealConfig, num_samples: usize) -> Vec<Keyframe> {
    if num_samples == 0 {
        return Vec::new();
    }
    if num_samples == 1 {
        return vec![Keyframe {
            progress: 0.0,
            value: curve.evaluate(0.0, config),
        }];
    }

    (0..num_samples)
        .map(|i| {
            let progress = i as f64 / (num_samples - 1) as f64;
            Keyframe {
                progress,
                value: curve.evaluate(progress, config),
            }
        })
        .collect()
}

/// Result of checking observed keyframes against a curve
#[derive(Clone, Debug, Serialize)]
pub struct CurveVerification {
    /// Curve checked against
    pub curve: RevealCurve,
    /// Largest absolute deviation
    pub max_deviation: f64,
    /// Mean absolute deviation
    pub mean_deviation: f64,
    /// Whether every keyframe was within tolerance
    pub passed: bool,
    /// Per-keyframe deviations
    pub deviations: Vec<f64>,
}

/// Compare observed keyframes (e.g. read back from rendered frames) with a
/// curve. An empty set of keyframes passes.
#[must_use]
pub fn verify_curve(
    keyframes: &[Keyframe],
    curve: RevealCurve,
    config: &RevealConfig,
    tolerance: f64,
) -> CurveVerification {
    let deviations: Vec<f64> = keyframes
        .iter()
        .map(|kf| (kf.value - curve.evaluate(kf.progress, config)).abs())
        .collect();

    let max_deviation = deviations.iter().copied().fold(0.0, f64::max);
    let mean_deviation = if deviations.is_empty() {
        0.0
    } else {
        deviations.iter().sum::<f64>() / deviations.len() as f64
    };

    CurveVerification {
        curve,
        max_deviation,
        mean_deviation,
        passed: max_deviation <= tolerance,
        deviations,
    }
}
