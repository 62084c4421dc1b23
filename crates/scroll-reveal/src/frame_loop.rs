//! Frame loop: runs a mounted [`ScrollReveal`] once per display refresh
//! until stopped.
//!
//! The first frame runs synchronously in [`FrameLoop::start`]; every frame
//! then requests the next one from the scheduler as its last action, so
//! frame N's writes always land before frame N+1 measures.
//!
//! The returned [`LoopHandle`] is the only way to end the loop. Dropping it
//! does not stop anything; the loop keeps itself alive through the
//! callback it has queued.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::driver::{FrameStats, ScrollReveal};
use crate::host::{FrameId, FrameScheduler, RevealHost};
use crate::progress::AnimationState;
use crate::result::RevealResult;

/// Lifecycle of a frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopStatus {
    /// A frame is queued or running
    Running,
    /// Stopped through the handle
    Stopped,
    /// The scheduler refused a frame request
    Failed,
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

struct LoopShared<H: RevealHost, S: FrameScheduler> {
    reveal: RefCell<ScrollReveal<H>>,
    scheduler: S,
    pending: Cell<Option<FrameId>>,
    status: Cell<LoopStatus>,
}

trait LoopControl {
    fn stop(&self);
    fn status(&self) -> LoopStatus;
    fn state(&self) -> AnimationState;
    fn stats(&self) -> FrameStats;
}

impl<H: RevealHost, S: FrameScheduler> LoopControl for LoopShared<H, S> {
    fn stop(&self) {
        if self.status.get() != LoopStatus::Running {
            return;
        }
        self.status.set(LoopStatus::Stopped);
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        debug!(frames = self.stats().frames, "scroll reveal loop stopped");
    }

    fn status(&self) -> LoopStatus {
        self.status.get()
    }

    fn state(&self) -> AnimationState {
        self.reveal.borrow().state()
    }

    fn stats(&self) -> FrameStats {
        self.reveal.borrow().stats()
    }
}

/// Starts frame loops
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLoop;

impl FrameLoop {
    /// Run the first frame now and keep requesting frames from `scheduler`.
    ///
    /// Fails only if the scheduler refuses the very first request; in that
    /// case nothing stays queued.
    pub fn start<H, S>(reveal: ScrollReveal<H>, scheduler: S) -> RevealResult<LoopHandle>
    where
        H: RevealHost + 'static,
        S: FrameScheduler + 'static,
    {
        let shared = Rc::new(LoopShared {
            reveal: RefCell::new(reveal),
            scheduler,
            pending: Cell::new(None),
            status: Cell::new(LoopStatus::Running),
        });

        debug!("scroll reveal loop started");
        run_frame(&shared);
        schedule_next(&shared)?;

        Ok(LoopHandle { inner: shared })
    }
}

fn on_frame<H, S>(shared: Rc<LoopShared<H, S>>)
where
    H: RevealHost + 'static,
    S: FrameScheduler + 'static,
{
    shared.pending.set(None);
    if shared.status.get() != LoopStatus::Running {
        return;
    }
    run_frame(&shared);
    // Failure is recorded in the status; there is no caller to return it to
    let _ = schedule_next(&shared);
}

fn run_frame<H: RevealHost, S: FrameScheduler>(shared: &LoopShared<H, S>) {
    // Write failures are counted and logged by the driver; keep going
    let _ = shared.reveal.borrow_mut().tick();
}

fn schedule_next<H, S>(shared: &Rc<LoopShared<H, S>>) -> RevealResult<()>
where
    H: RevealHost + 'static,
    S: FrameScheduler + 'static,
{
    let next = Rc::clone(shared);
    match shared
        .scheduler
        .request_frame(Box::new(move || on_frame(next)))
    {
        Ok(id) => {
            shared.pending.set(Some(id));
            Ok(())
        }
        Err(err) => {
            shared.status.set(LoopStatus::Failed);
            error!(error = %err, "could not request next frame");
            Err(err)
        }
    }
}

/// Control handle for a running loop. Clones control the same loop.
#[derive(Clone)]
pub struct LoopHandle {
    inner: Rc<dyn LoopControl>,
}

impl fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopHandle")
            .field("status", &self.status())
            .field("stats", &self.stats())
            .finish()
    }
}

impl LoopHandle {
    /// Stop the loop and cancel the queued frame. Idempotent.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> LoopStatus {
        self.inner.status()
    }

    /// Whether frames are still being requested
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status() == LoopStatus::Running
    }

    /// Progress state after the latest frame
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.inner.state()
    }

    /// Frame counters so far
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.inner.stats()
    }
}
