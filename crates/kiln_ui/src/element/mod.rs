//! Element tree.
//!
//! Every node is an [`Element`] or a widget wrapping one. Parents own their
//! children outright; everything else (constraint targets, parent links) is
//! a [`WeakAnchor`].

mod anchor;
mod container;
mod context;
mod core;
mod image;

pub use anchor::{Anchor, WeakAnchor};
pub use container::Container;
pub use context::{EventContext, Trash, TreeRequest};
pub use self::core::{highlight, Element, Widget};
pub use image::ImageElement;
