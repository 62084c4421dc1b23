//! scroll-reveal: scroll-linked hero reveal for the browser
//!
//! As the page scrolls through a tall container, the hero text fades, grows
//! and drifts down while a "game window" panel tilts up, scales and fades
//! into view. Scroll position is read every display frame and smoothed with
//! a fixed-factor lerp, so the motion keeps easing after the user stops.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     scroll-reveal per frame                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────┐             │
//! │  │ RevealHost │──►│ Animation    │──►│ StyleFrame │──► styles   │
//! │  │ (measure)  │   │ State (lerp) │   │ (curves)   │             │
//! │  └────────────┘   └──────────────┘   └────────────┘             │
//! │         ▲                                                       │
//! │  ┌──────┴───────┐                                               │
//! │  │ FrameLoop    │◄── FrameScheduler (requestAnimationFrame)     │
//! │  └──────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Native builds get everything except the `web` bindings, so the math and
//! the loop are tested against [`mock::MockHost`] and
//! [`mock::MockFrameScheduler`].
//!
//! # Example
//!
//! ```rust
//! use scroll_reveal::prelude::*;
//!
//! let host = MockHost::with_default_elements();
//! let scheduler = MockFrameScheduler::new();
//! let reveal = ScrollReveal::mount_default(host.clone()).unwrap();
//! let handle = FrameLoop::start(reveal, scheduler.clone()).unwrap();
//!
//! host.scroll_to(2000.0);
//! scheduler.run_frames(60);
//! assert!(handle.state().displayed > 0.9);
//!
//! handle.stop();
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod curve;
pub mod driver;
pub mod frame_loop;
pub mod host;
pub mod mock;
pub mod progress;
mod result;
pub mod style;

/// Proptest strategies for geometry and progress
#[cfg(feature = "proptest")]
pub mod strategies;

/// Browser bindings: `WebHost`, `AnimationFrameScheduler` and the JS entry
/// points
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{
    ElementIds, RevealConfig, CONTAINER_ID, EASE_FACTOR, GAME_APPEAR_START, GAME_WINDOW_ID,
    IDLE_THRESHOLD, PERSPECTIVE_PX, TEXT_FADE_END, TEXT_ID,
};
pub use curve::{sample_curve, verify_curve, CurveVerification, Keyframe, RevealCurve};
pub use driver::{FrameReport, FrameStats, ScrollReveal};
pub use frame_loop::{FrameLoop, LoopHandle, LoopStatus};
pub use host::{
    ElementRect, ElementRole, FrameCallback, FrameId, FrameScheduler, RevealElements, RevealHost,
    StyleProperty,
};
pub use progress::{lerp_toward, AnimationState, FrameStep, ScrollGeometry, TargetUpdate};
pub use result::{RevealError, RevealResult};
pub use style::{
    GameWindowStyle, StyleDeclaration, StyleFrame, TextStyle, Visibility, WILL_CHANGE_HINT,
};

/// Everything needed to mount and drive a reveal
pub mod prelude {
    pub use super::config::{ElementIds, RevealConfig};
    pub use super::curve::{sample_curve, verify_curve, Keyframe, RevealCurve};
    pub use super::driver::{FrameReport, FrameStats, ScrollReveal};
    pub use super::frame_loop::{FrameLoop, LoopHandle, LoopStatus};
    pub use super::host::{
        ElementRect, ElementRole, FrameScheduler, RevealHost, StyleProperty,
    };
    pub use super::mock::{MockFrameScheduler, MockHost};
    pub use super::progress::{AnimationState, ScrollGeometry};
    pub use super::result::{RevealError, RevealResult};
    pub use super::style::{StyleFrame, Visibility};
    #[cfg(target_arch = "wasm32")]
    pub use super::web::{AnimationFrameScheduler, WebHost};
}
