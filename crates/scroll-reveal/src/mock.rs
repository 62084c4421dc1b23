//! In-memory host and frame scheduler for native tests.
//!
//! `MockHost` stands in for the document: an element table with rects and
//! inline styles, a viewport height, and a log of every style write.
//! `MockFrameScheduler` stands in for `requestAnimationFrame`: callbacks
//! queue up and run only when the test calls `run_frame`.
//!
//! Both are cheap to clone and clones share state, so a test can keep a
//! handle while the driver owns another.
//!
//! ```rust,ignore
//! let host = MockHost::with_default_elements();
//! let scheduler = MockFrameScheduler::new();
//! let reveal = ScrollReveal::mount_default(host.clone())?;
//! let handle = FrameLoop::start(reveal, scheduler.clone())?;
//!
//! host.scroll_to(1000.0);
//! scheduler.run_frames(30);
//! assert!(host.style("js-hero-text", StyleProperty::Opacity).is_some());
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::config::{CONTAINER_ID, GAME_WINDOW_ID, TEXT_ID};
use crate::host::{
    ElementRect, FrameCallback, FrameId, FrameScheduler, RevealHost, StyleProperty,
};
use crate::result::{RevealError, RevealResult};

/// Default viewport height of a fresh mock host
pub const MOCK_VIEWPORT_HEIGHT: f64 = 1000.0;
/// Default container height of `with_default_elements`
pub const MOCK_CONTAINER_HEIGHT: f64 = 3000.0;

/// A recorded style write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleWrite {
    /// Element id
    pub id: String,
    /// Property written
    pub property: StyleProperty,
    /// Value written
    pub value: String,
}

#[derive(Debug, Clone, Default)]
struct MockElement {
    rect: ElementRect,
    styles: HashMap<StyleProperty, String>,
}

#[derive(Debug)]
struct MockDom {
    elements: HashMap<String, MockElement>,
    viewport_height: f64,
    container_id: String,
    writes: Vec<StyleWrite>,
    fail_writes: bool,
}

impl Default for MockDom {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            viewport_height: MOCK_VIEWPORT_HEIGHT,
            container_id: CONTAINER_ID.to_string(),
            writes: Vec::new(),
            fail_writes: false,
        }
    }
}

/// In-memory document
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    dom: Rc<RefCell<MockDom>>,
}

impl MockHost {
    /// Empty document with a 1000px viewport
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding the three default elements, with a 3000px container
    /// at the top of the page
    #[must_use]
    pub fn with_default_elements() -> Self {
        let host = Self::new();
        host.add_element(CONTAINER_ID);
        host.add_element(TEXT_ID);
        host.add_element(GAME_WINDOW_ID);
        host.set_rect(CONTAINER_ID, ElementRect::new(0.0, MOCK_CONTAINER_HEIGHT));
        host
    }

    /// Add an element with an empty rect
    pub fn add_element(&self, id: &str) {
        self.dom
            .borrow_mut()
            .elements
            .insert(id.to_string(), MockElement::default());
    }

    /// Remove an element
    pub fn remove_element(&self, id: &str) {
        self.dom.borrow_mut().elements.remove(id);
    }

    /// Set an element's bounding rect
    pub fn set_rect(&self, id: &str, rect: ElementRect) {
        if let Some(element) = self.dom.borrow_mut().elements.get_mut(id) {
            element.rect = rect;
        }
    }

    /// Set the viewport height
    pub fn set_viewport_height(&self, height: f64) {
        self.dom.borrow_mut().viewport_height = height;
    }

    /// Element treated as the scroll container by `scroll_to`
    pub fn set_container_id(&self, id: &str) {
        self.dom.borrow_mut().container_id = id.to_string();
    }

    /// Scroll the page so the container top sits `scrolled` px above the
    /// viewport top
    pub fn scroll_to(&self, scrolled: f64) {
        let mut dom = self.dom.borrow_mut();
        let container_id = dom.container_id.clone();
        if let Some(element) = dom.elements.get_mut(&container_id) {
            element.rect.top = -scrolled;
        }
    }

    /// Change the container height, keeping its top
    pub fn set_container_height(&self, height: f64) {
        let mut dom = self.dom.borrow_mut();
        let container_id = dom.container_id.clone();
        if let Some(element) = dom.elements.get_mut(&container_id) {
            element.rect.height = height;
        }
    }

    /// Current inline style value
    #[must_use]
    pub fn style(&self, id: &str, property: StyleProperty) -> Option<String> {
        self.dom
            .borrow()
            .elements
            .get(id)
            .and_then(|element| element.styles.get(&property).cloned())
    }

    /// Every write so far, in order
    #[must_use]
    pub fn writes(&self) -> Vec<StyleWrite> {
        self.dom.borrow().writes.clone()
    }

    /// Number of writes so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.dom.borrow().writes.len()
    }

    /// Forget recorded writes (current styles are kept)
    pub fn clear_writes(&self) {
        self.dom.borrow_mut().writes.clear();
    }

    /// Make every subsequent style write fail
    pub fn fail_writes(&self, fail: bool) {
        self.dom.borrow_mut().fail_writes = fail;
    }
}

impl RevealHost for MockHost {
    type Element = String;

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.dom
            .borrow()
            .elements
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn bounding_rect(&self, element: &String) -> ElementRect {
        self.dom
            .borrow()
            .elements
            .get(element)
            .map(|e| e.rect)
            .unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.dom.borrow().viewport_height
    }

    fn set_style(&self, element: &String, property: StyleProperty, value: &str) -> RevealResult<()> {
        let mut dom = self.dom.borrow_mut();
        if dom.fail_writes {
            return Err(RevealError::host(format!(
                "setProperty({property}) rejected on #{element}"
            )));
        }
        let Some(target) = dom.elements.get_mut(element) else {
            return Err(RevealError::host(format!("#{element} detached")));
        };
        target.styles.insert(property, value.to_string());
        dom.writes.push(StyleWrite {
            id: element.clone(),
            property,
            value: value.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
struct FrameQueue {
    pending: VecDeque<(FrameId, FrameCallback)>,
    next_id: i64,
    requested: u64,
    cancelled: u64,
    fail_requests: bool,
}

/// Manually advanced frame scheduler
#[derive(Clone, Default)]
pub struct MockFrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl fmt::Debug for MockFrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("MockFrameScheduler")
            .field("pending", &queue.pending.len())
            .field("requested", &queue.requested)
            .field("cancelled", &queue.cancelled)
            .field("fail_requests", &queue.fail_requests)
            .finish()
    }
}

impl MockFrameScheduler {
    /// Create an empty scheduler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call; callbacks they request
    /// wait for the next frame. Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut self.queue.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }

    /// Run `frames` frames, returning the total callbacks run
    pub fn run_frames(&self, frames: usize) -> usize {
        (0..frames).map(|_| self.run_frame()).sum()
    }

    /// Callbacks waiting for the next frame
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Total `request_frame` calls that succeeded
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.queue.borrow().requested
    }

    /// Total callbacks removed by `cancel_frame`
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.queue.borrow().cancelled
    }

    /// Make every subsequent `request_frame` fail
    pub fn fail_requests(&self, fail: bool) {
        self.queue.borrow_mut().fail_requests = fail;
    }
}

impl FrameScheduler for MockFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> RevealResult<FrameId> {
        let mut queue = self.queue.borrow_mut();
        if queue.fail_requests {
            return Err(RevealError::host("requestAnimationFrame unavailable"));
        }
        queue.next_id += 1;
        let id = FrameId(queue.next_id);
        queue.pending.push_back((id, callback));
        queue.requested += 1;
        Ok(id)
    }

    fn cancel_frame(&self, id: FrameId) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|(pending, _)| *pending != id);
        queue.cancelled += (before - queue.pending.len()) as u64;
    }
}
