//! Property tests for the progress math and the style mapper.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use scroll_reveal::{
    lerp_toward, AnimationState, RevealConfig, RevealCurve, ScrollGeometry, StyleFrame,
    TargetUpdate, Visibility, EASE_FACTOR, IDLE_THRESHOLD,
};

fn config() -> RevealConfig {
    RevealConfig::default()
}

proptest! {
    #[test]
    fn prop_text_opacity_in_range_and_non_increasing(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = config();
        let at_lo = StyleFrame::at(lo, &c).text.opacity;
        let at_hi = StyleFrame::at(hi, &c).text.opacity;
        prop_assert!((0.0..=1.0).contains(&at_lo));
        prop_assert!((0.0..=1.0).contains(&at_hi));
        prop_assert!(at_hi <= at_lo);
    }

    #[test]
    fn prop_game_progress_in_range_and_non_decreasing(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = config();
        let at_lo = StyleFrame::at(lo, &c).game_window.progress;
        let at_hi = StyleFrame::at(hi, &c).game_window.progress;
        prop_assert!((0.0..=1.0).contains(&at_lo));
        prop_assert!((0.0..=1.0).contains(&at_hi));
        prop_assert!(at_hi >= at_lo);
    }

    #[test]
    fn prop_game_progress_zero_before_appear_start(p in 0.0f64..=0.2) {
        prop_assert_eq!(StyleFrame::at(p, &config()).game_window.progress, 0.0);
    }

    #[test]
    fn prop_curves_follow_their_direction(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = config();
        for curve in RevealCurve::ALL {
            let (v_lo, v_hi) = (curve.evaluate(lo, &c), curve.evaluate(hi, &c));
            if curve.is_increasing() {
                prop_assert!(v_hi >= v_lo, "{:?}", curve);
            } else {
                prop_assert!(v_hi <= v_lo, "{:?}", curve);
            }
        }
    }

    #[test]
    fn prop_mapping_is_deterministic(p in 0.0f64..=1.0) {
        let c = config();
        let first = StyleFrame::at(p, &c);
        let second = StyleFrame::at(p, &c);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.declarations(), second.declarations());
    }

    #[test]
    fn prop_visibility_tracks_opacity(p in 0.0f64..=1.0) {
        let text = StyleFrame::at(p, &config()).text;
        let hidden = text.visibility == Visibility::Hidden;
        prop_assert_eq!(hidden, text.opacity <= 0.0);
    }

    #[test]
    fn prop_game_style_ranges(p in 0.0f64..=1.0) {
        let game = StyleFrame::at(p, &config()).game_window;
        prop_assert!((0.5..=1.0).contains(&game.scale));
        prop_assert!((0.0..=1.0).contains(&game.opacity));
        prop_assert!((0.0..=60.0).contains(&game.rotate_x));
        prop_assert!((0.0..=200.0).contains(&game.translate_y));
    }

    #[test]
    fn prop_lerp_converges_without_overshoot(start in 0.0f64..=1.0, target in 0.0f64..=1.0) {
        let mut current = start;
        for _ in 0..200 {
            let before = (current - target).abs();
            let next = lerp_toward(current, target, EASE_FACTOR);
            let after = (next - target).abs();
            if before > 0.0 {
                prop_assert!(after <= before);
                // Never crosses the target
                prop_assert!((next - target).signum() == (current - target).signum() || after == 0.0);
            }
            current = next;
        }
        prop_assert!((current - target).abs() < 1e-6);
    }

    #[test]
    fn prop_gap_shrinks_strictly_while_large(start in 0.0f64..=1.0, target in 0.0f64..=1.0) {
        prop_assume!((start - target).abs() > 1e-3);
        let mut current = start;
        for _ in 0..50 {
            let before = (current - target).abs();
            current = lerp_toward(current, target, EASE_FACTOR);
            prop_assert!((current - target).abs() < before);
        }
    }

    #[test]
    fn prop_target_in_unit_range(
        top in -20_000.0f64..20_000.0,
        height in 0.0f64..20_000.0,
        viewport in 1.0f64..3_000.0,
    ) {
        let geometry = ScrollGeometry::new(top, height, viewport);
        if let Some(target) = geometry.target_progress() {
            prop_assert!((0.0..=1.0).contains(&target));
            prop_assert!(height > viewport);
        } else {
            prop_assert!(height <= viewport);
        }
    }

    #[test]
    fn prop_degenerate_geometry_keeps_target(
        displayed in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        top in -5_000.0f64..5_000.0,
        viewport in 100.0f64..3_000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let state = AnimationState { displayed, target };
        let geometry = ScrollGeometry::new(top, viewport * fraction, viewport);
        let step = state.step(&geometry, EASE_FACTOR, IDLE_THRESHOLD);
        prop_assert_eq!(step.target_update, TargetUpdate::Kept);
        prop_assert_eq!(step.state.target, target);
        prop_assert!(!step.state.displayed.is_nan());
    }

    #[test]
    fn prop_state_stays_in_unit_range(
        displayed in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        top in -20_000.0f64..20_000.0,
        height in 0.0f64..20_000.0,
    ) {
        let mut state = AnimationState { displayed, target };
        let geometry = ScrollGeometry::new(top, height, 900.0);
        for _ in 0..20 {
            state = state.step(&geometry, EASE_FACTOR, IDLE_THRESHOLD).state;
            prop_assert!((0.0..=1.0).contains(&state.displayed));
            prop_assert!((0.0..=1.0).contains(&state.target));
        }
    }

    #[test]
    fn prop_needs_render_matches_threshold(displayed in 0.0f64..=1.0, target in 0.0f64..=1.0) {
        let state = AnimationState { displayed, target };
        // Degenerate geometry so the target is fixed
        let step = state.step(&ScrollGeometry::new(0.0, 0.0, 1.0), EASE_FACTOR, IDLE_THRESHOLD);
        let gap = (step.state.target - step.state.displayed).abs();
        prop_assert_eq!(step.needs_render, gap > IDLE_THRESHOLD);
    }
}

#[test]
fn test_boundary_values() {
    let c = config();
    let start = StyleFrame::at(0.0, &c);
    assert_eq!(start.text.opacity, 1.0);
    assert_eq!(start.text.scale, 1.0);
    assert_eq!(start.text.translate_y, 0.0);
    assert_eq!(start.game_window.scale, 0.5);
    assert_eq!(start.game_window.opacity, 0.0);
    assert_eq!(start.game_window.rotate_x, 60.0);
    assert_eq!(start.game_window.translate_y, 200.0);

    let end = StyleFrame::at(1.0, &c);
    assert_eq!(end.text.opacity, 0.0);
    assert_eq!(end.text.visibility, Visibility::Hidden);
    assert!((end.game_window.scale - 1.0).abs() < 1e-12);
    assert_eq!(end.game_window.opacity, 1.0);
    assert!(end.game_window.rotate_x.abs() < 1e-12);
    assert!(end.game_window.translate_y.abs() < 1e-12);
}
