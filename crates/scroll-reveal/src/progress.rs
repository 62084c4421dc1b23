//! Scroll progress: from container geometry to a smoothed progress value.
//!
//! ```text
//! ScrollGeometry ──► target_progress ──► AnimationState::step ──► FrameStep
//!                                              │
//!                                      lerp toward target
//! ```
//!
//! The state is a plain value: each frame takes the previous state and
//! returns the next one. Both fields stay in [0, 1].

use serde::{Deserialize, Serialize};

use crate::curve::clamp_unit;

/// Layout measurements taken once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollGeometry {
    /// Container top relative to the viewport top
    pub container_top: f64,
    /// Container height
    pub container_height: f64,
    /// Viewport height
    pub viewport_height: f64,
}

impl ScrollGeometry {
    /// Create geometry
    #[must_use]
    pub const fn new(container_top: f64, container_height: f64, viewport_height: f64) -> Self {
        Self {
            container_top,
            container_height,
            viewport_height,
        }
    }

    /// Distance the container can scroll while the viewport stays inside it
    #[must_use]
    pub fn scrollable_distance(&self) -> f64 {
        self.container_height - self.viewport_height
    }

    /// Distance the container top has moved above the viewport top
    #[must_use]
    pub fn scrolled(&self) -> f64 {
        -self.container_top
    }

    /// Progress implied by this geometry, or `None` when the container is
    /// not taller than the viewport.
    ///
    /// Measuring the container rect instead of the window scroll offset
    /// stays correct during inertial scrolling and overscroll.
    #[must_use]
    pub fn target_progress(&self) -> Option<f64> {
        let distance = self.scrollable_distance();
        // NaN compares false here, so bad measurements fall through as degenerate
        if distance > 0.0 {
            let raw = self.scrolled() / distance;
            if raw.is_nan() {
                return None;
            }
            Some(clamp_unit(raw))
        } else {
            None
        }
    }
}

/// One lerp step: move `current` the fraction `factor` of the way to `target`
#[must_use]
pub fn lerp_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// What happened to the target during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetUpdate {
    /// Target recomputed from geometry
    Measured,
    /// Geometry was degenerate; previous target kept
    Kept,
}

/// Smoothed progress state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationState {
    /// Progress currently rendered
    pub displayed: f64,
    /// Progress implied by the latest usable geometry
    pub target: f64,
}

/// Outcome of one frame of progress smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStep {
    /// State after the step
    pub state: AnimationState,
    /// Whether the target was recomputed
    pub target_update: TargetUpdate,
    /// Whether the displayed value is still far enough from the target to
    /// warrant a style write
    pub needs_render: bool,
}

impl AnimationState {
    /// Initial state: nothing scrolled, nothing displayed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            displayed: 0.0,
            target: 0.0,
        }
    }

    /// Gap still to close
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (self.target - self.displayed).abs()
    }

    /// Whether the displayed value is within `threshold` of the target
    #[must_use]
    pub fn is_settled(&self, threshold: f64) -> bool {
        self.remaining() <= threshold
    }

    /// Advance one frame.
    ///
    /// Recomputes the target from `geometry` (keeping the previous one when
    /// the geometry is degenerate), lerps the displayed value toward it, and
    /// reports whether the result is worth rendering.
    #[must_use]
    pub fn step(self, geometry: &ScrollGeometry, ease_factor: f64, idle_threshold: f64) -> FrameStep {
        let (target, target_update) = match geometry.target_progress() {
            Some(target) => (target, TargetUpdate::Measured),
            None => (self.target, TargetUpdate::Kept),
        };
        let displayed = clamp_unit(lerp_toward(self.displayed, target, ease_factor));
        let state = Self { displayed, target };

        FrameStep {
            state,
            target_update,
            needs_render: !state.is_settled(idle_threshold),
        }
    }
}
