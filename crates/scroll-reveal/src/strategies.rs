//! Proptest strategies for scroll geometry and progress values.
//!
//! Enabled with the `proptest` feature so downstream pages can fuzz their
//! own configs against the same inputs the crate tests with.
//!
//! ```rust,ignore
//! proptest! {
//!     #[test]
//!     fn prop_target_in_range(geometry in scrollable_geometry()) {
//!         let target = geometry.target_progress().unwrap();
//!         prop_assert!((0.0..=1.0).contains(&target));
//!     }
//! }
//! ```

use proptest::prelude::*;

use crate::config::RevealConfig;
use crate::progress::{AnimationState, ScrollGeometry};

/// Any progress value in [0, 1]
pub fn unit_progress() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

/// A valid state (both fields in [0, 1])
pub fn animation_state() -> impl Strategy<Value = AnimationState> {
    (unit_progress(), unit_progress())
        .prop_map(|(displayed, target)| AnimationState { displayed, target })
}

/// Geometry where the container is taller than the viewport, scrolled
/// anywhere from well above to well below its range
pub fn scrollable_geometry() -> impl Strategy<Value = ScrollGeometry> {
    (200.0f64..2000.0, 1.0f64..10_000.0, -1.5f64..2.5).prop_map(
        |(viewport_height, extra, position)| {
            let container_height = viewport_height + extra;
            ScrollGeometry::new(-position * extra, container_height, viewport_height)
        },
    )
}

/// Geometry where the container is no taller than the viewport
pub fn degenerate_geometry() -> impl Strategy<Value = ScrollGeometry> {
    (200.0f64..2000.0, 0.0f64..=1.0, -5000.0f64..5000.0).prop_map(
        |(viewport_height, fraction, top)| {
            ScrollGeometry::new(top, viewport_height * fraction, viewport_height)
        },
    )
}

/// Either kind of geometry
pub fn any_geometry() -> impl Strategy<Value = ScrollGeometry> {
    prop_oneof![scrollable_geometry(), degenerate_geometry()]
}

/// A valid config with tuning values spread across their allowed ranges
pub fn reveal_config() -> impl Strategy<Value = RevealConfig> {
    (0.05f64..1.0, 0.0f64..0.9, 0.01f64..=1.0).prop_map(|(fade_end, appear_start, ease)| {
        RevealConfig::default()
            .with_text_fade_end(fade_end)
            .with_game_appear_start(appear_start)
            .with_ease_factor(ease)
    })
}
