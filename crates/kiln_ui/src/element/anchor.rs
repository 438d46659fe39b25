//! Non-owning handles to an element's published placement.
//!
//! Constraints and parent links refer to other elements through these handles
//! instead of pointers. A handle whose element was dropped simply resolves to
//! nothing.

use crate::layout::Rect;
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Placement an element publishes for others to read.
///
/// The rect holds the element's relative position and its scaled extent.
#[derive(Debug, Default)]
pub struct Anchor(Rc<Cell<Rect>>);

impl Anchor {
    /// Creates an anchor publishing an empty rect.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published rect.
    pub fn publish(&self, rect: Rect) {
        self.0.set(rect);
    }

    /// Returns the published rect.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.0.get()
    }

    /// Returns a handle that does not keep the element alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakAnchor {
        WeakAnchor(Rc::downgrade(&self.0))
    }
}

/// Weak reference to an [`Anchor`].
#[derive(Debug, Clone, Default)]
pub struct WeakAnchor(Weak<Cell<Rect>>);

impl WeakAnchor {
    /// Returns the published rect, or `None` if the element is gone.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.0.upgrade().map(|cell| cell.get())
    }

    /// Returns true while the element exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Returns true if both handles refer to the same element.
    #[must_use]
    pub fn same_as(&self, anchor: &Anchor) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&anchor.0))
    }
}
