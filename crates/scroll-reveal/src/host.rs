//! Host seams: the document the reveal reads from and writes to, and the
//! per-frame scheduler that drives it.
//!
//! The browser implementations live in `web` (wasm32 only); `mock` provides
//! deterministic in-memory versions for native tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ElementIds;
use crate::result::{RevealError, RevealResult};

/// Which of the three required elements a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRole {
    /// Tall scroll container
    Container,
    /// Hero text
    Text,
    /// Game window panel
    GameWindow,
}

impl ElementRole {
    /// All roles in lookup order
    pub const ALL: [Self; 3] = [Self::Container, Self::Text, Self::GameWindow];

    /// Id configured for this role
    #[must_use]
    pub fn id<'a>(&self, ids: &'a ElementIds) -> &'a str {
        match self {
            Self::Container => &ids.container,
            Self::Text => &ids.text,
            Self::GameWindow => &ids.game_window,
        }
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Text => write!(f, "text"),
            Self::GameWindow => write!(f, "game window"),
        }
    }
}

/// Inline style properties the reveal writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    /// `opacity`
    Opacity,
    /// `transform`
    Transform,
    /// `visibility`
    Visibility,
    /// `will-change`
    WillChange,
}

impl StyleProperty {
    /// CSS property name as passed to `style.setProperty`
    #[must_use]
    pub const fn css_name(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::Visibility => "visibility",
            Self::WillChange => "will-change",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Bounding rectangle of an element relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRect {
    /// Distance from the viewport top to the element top (negative once scrolled past)
    pub top: f64,
    /// Rendered height
    pub height: f64,
}

impl ElementRect {
    /// Create a rect
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// The document the reveal animates.
///
/// `Element` is whatever handle the host uses for a DOM node. Handles are
/// looked up once at mount and held for the page lifetime.
pub trait RevealHost {
    /// Element handle type
    type Element;

    /// Look up an element by id
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Bounding rectangle of an element relative to the viewport
    fn bounding_rect(&self, element: &Self::Element) -> ElementRect;

    /// Current viewport height
    fn viewport_height(&self) -> f64;

    /// Write one inline style property
    fn set_style(
        &self,
        element: &Self::Element,
        property: StyleProperty,
        value: &str,
    ) -> RevealResult<()>;
}

/// The three resolved element handles
#[derive(Debug, Clone)]
pub struct RevealElements<E> {
    /// Scroll container
    pub container: E,
    /// Hero text
    pub text: E,
    /// Game window panel
    pub game_window: E,
}

impl<E> RevealElements<E> {
    /// Resolve all three ids, failing on the first one that is missing
    pub fn resolve<H>(host: &H, ids: &ElementIds) -> RevealResult<Self>
    where
        H: RevealHost<Element = E>,
    {
        let lookup = |role: ElementRole| {
            let id = role.id(ids);
            host.element_by_id(id)
                .ok_or_else(|| RevealError::MissingElement {
                    role,
                    id: id.to_string(),
                })
        };
        Ok(Self {
            container: lookup(ElementRole::Container)?,
            text: lookup(ElementRole::Text)?,
            game_window: lookup(ElementRole::GameWindow)?,
        })
    }

    /// Handle for a role
    #[must_use]
    pub const fn get(&self, role: ElementRole) -> &E {
        match role {
            ElementRole::Container => &self.container,
            ElementRole::Text => &self.text,
            ElementRole::GameWindow => &self.game_window,
        }
    }
}

/// Identifier of a requested frame, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i64);

/// Callback run on the next display refresh
pub type FrameCallback = Box<dyn FnOnce()>;

/// "Run before next repaint" service
pub trait FrameScheduler {
    /// Queue a callback for the next frame
    fn request_frame(&self, callback: FrameCallback) -> RevealResult<FrameId>;

    /// Cancel a queued callback; unknown ids are ignored
    fn cancel_frame(&self, id: FrameId);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockHost;

    #[test]
    fn test_role_ids() {
        let ids = ElementIds::default();
        assert_eq!(ElementRole::Container.id(&ids), "js-scroll-container");
        assert_eq!(ElementRole::Text.id(&ids), "js-hero-text");
        assert_eq!(ElementRole::GameWindow.id(&ids), "js-game-window");
    }

    #[test]
    fn test_css_names() {
        assert_eq!(StyleProperty::Opacity.css_name(), "opacity");
        assert_eq!(StyleProperty::Transform.to_string(), "transform");
        assert_eq!(StyleProperty::Visibility.css_name(), "visibility");
        assert_eq!(StyleProperty::WillChange.css_name(), "will-change");
    }

    #[test]
    fn test_resolve_all_present() {
        let host = MockHost::with_default_elements();
        let elements = RevealElements::resolve(&host, &ElementIds::default()).unwrap();
        assert_eq!(elements.get(ElementRole::Text), "js-hero-text");
        assert_eq!(elements.get(ElementRole::GameWindow), "js-game-window");
    }

    #[test]
    fn test_resolve_reports_first_missing() {
        let host = MockHost::new();
        host.add_element("js-scroll-container");
        let err = RevealElements::resolve(&host, &ElementIds::default()).unwrap_err();
        match err {
            RevealError::MissingElement { role, id } => {
                assert_eq!(role, ElementRole::Text);
                assert_eq!(id, "js-hero-text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
