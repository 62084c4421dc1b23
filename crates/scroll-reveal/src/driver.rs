//! Reveal driver: mounts onto the three elements and advances one frame
//! at a time.
//!
//! ```text
//! mount:  resolve ids ──► will-change hints ──► ScrollReveal
//! tick:   measure ──► AnimationState::step ──► StyleFrame ──► host writes
//! ```
//!
//! The driver is the only writer of the progress state and of the two
//! animated elements' styles. Scheduling is left to `frame_loop`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::config::RevealConfig;
use crate::host::{RevealElements, RevealHost};
use crate::progress::{AnimationState, ScrollGeometry, TargetUpdate};
use crate::result::RevealResult;
use crate::style::{StyleDeclaration, StyleFrame};

/// Counters accumulated across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frames processed
    pub frames: u64,
    /// Frames that wrote styles
    pub renders: u64,
    /// Frames that skipped the write because progress had settled
    pub skipped_idle: u64,
    /// Frames whose geometry was degenerate (target kept)
    pub degenerate: u64,
    /// Frames where a style write failed
    pub write_errors: u64,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Geometry measured this frame
    pub geometry: ScrollGeometry,
    /// State after the frame
    pub state: AnimationState,
    /// Whether the target was recomputed or kept
    pub target_update: TargetUpdate,
    /// Styles written this frame, if any
    pub rendered: Option<StyleFrame>,
}

/// Mounted scroll reveal
pub struct ScrollReveal<H: RevealHost> {
    host: H,
    elements: RevealElements<H::Element>,
    config: RevealConfig,
    state: AnimationState,
    stats: FrameStats,
}

impl<H: RevealHost> fmt::Debug for ScrollReveal<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollReveal")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<H: RevealHost> ScrollReveal<H> {
    /// Resolve the configured elements and hint the renderer.
    ///
    /// If any element is missing the error is logged and returned before
    /// any style is touched.
    pub fn mount(host: H, config: RevealConfig) -> RevealResult<Self> {
        config.validate()?;

        let elements = match RevealElements::resolve(&host, &config.ids) {
            Ok(elements) => elements,
            Err(err) => {
                error!(error = %err, "scroll reveal not started");
                return Err(err);
            }
        };

        for hint in StyleFrame::mount_hints() {
            write_declaration(&host, &elements, &hint)?;
        }

        debug!(
            container = %config.ids.container,
            text = %config.ids.text,
            game_window = %config.ids.game_window,
            "scroll reveal mounted"
        );

        Ok(Self {
            host,
            elements,
            config,
            state: AnimationState::new(),
            stats: FrameStats::default(),
        })
    }

    /// Mount with the default ids and constants
    pub fn mount_default(host: H) -> RevealResult<Self> {
        Self::mount(host, RevealConfig::default())
    }

    /// Current progress state
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Accumulated frame counters
    #[must_use]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Host the reveal is mounted on
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Measure the container against the viewport
    #[must_use]
    pub fn measure(&self) -> ScrollGeometry {
        let rect = self.host.bounding_rect(&self.elements.container);
        ScrollGeometry::new(rect.top, rect.height, self.host.viewport_height())
    }

    /// Advance one frame: measure, smooth, and write styles unless settled.
    ///
    /// A failed style write is counted and returned; the state still
    /// advances so the next frame picks up where this one left off.
    pub fn tick(&mut self) -> RevealResult<FrameReport> {
        let geometry = self.measure();
        let step = self
            .state
            .step(&geometry, self.config.ease_factor, self.config.idle_threshold);

        self.state = step.state;
        self.stats.frames += 1;
        if step.target_update == TargetUpdate::Kept {
            self.stats.degenerate += 1;
        }

        trace!(
            displayed = step.state.displayed,
            target = step.state.target,
            needs_render = step.needs_render,
            "frame"
        );

        let rendered = if step.needs_render {
            let frame = StyleFrame::at(step.state.displayed, &self.config);
            if let Err(err) = self.apply(&frame) {
                self.stats.write_errors += 1;
                warn!(error = %err, progress = frame.progress, "style write failed");
                return Err(err);
            }
            self.stats.renders += 1;
            Some(frame)
        } else {
            self.stats.skipped_idle += 1;
            None
        };

        Ok(FrameReport {
            geometry,
            state: step.state,
            target_update: step.target_update,
            rendered,
        })
    }

    /// Write every declaration of `frame` to the host
    pub fn apply(&self, frame: &StyleFrame) -> RevealResult<()> {
        for declaration in frame.declarations() {
            write_declaration(&self.host, &self.elements, &declaration)?;
        }
        Ok(())
    }
}

fn write_declaration<H: RevealHost>(
    host: &H,
    elements: &RevealElements<H::Element>,
    declaration: &StyleDeclaration,
) -> RevealResult<()> {
    host.set_style(
        elements.get(declaration.role),
        declaration.property,
        &declaration.value,
    )
}
