//! # KILN UI Runtime
//!
//! Retained-mode element tree for small consoles and headless hosts:
//! - Elements own their children; paint order is insertion order
//! - Constraints position elements against parents, siblings, or the screen
//! - Animations are time-boxed callbacks removed the frame they finish
//! - Screens stack modally; structural changes during dispatch are queued
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        FRAME                                │
//! ├────────────────────────────────────────────────────────────┤
//! │  InputBackend → Display::process → top Screen → Elements   │
//! │                        ↓                                    │
//! │               deferred ScreenOps drained                    │
//! │                        ↓                                    │
//! │  Display::render → constraints → animations → DrawBackend   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never calls a platform API. Everything visual goes through
//! [`DrawBackend`], everything interactive comes from [`InputBackend`].

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod constraint;
pub mod display;
pub mod element;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod screen;
pub mod style;

pub use animation::{Animation, Easing};
pub use config::{DisplayConfig, DisplaySettings, QuitAction};
pub use constraint::{Constraint, ConstraintFlags, Placement};
pub use display::Display;
pub use element::{
    highlight, Anchor, Container, Element, EventContext, ImageElement, Trash, TreeRequest,
    WeakAnchor, Widget,
};
pub use error::{UiError, UiResult};
pub use input::{
    Buttons, CursorKind, DirectionalRepeat, EventKind, InputBackend, InputEvents, ScriptedInput,
    WheelAccumulator,
};
pub use layout::{Direction, Rect, Viewport};
pub use render::{DrawBackend, DrawCommand, ParentFrame, RecordingBackend, RenderContext, TextureId};
pub use screen::{navigation_channel, Navigator, PendingOps, Screen, ScreenOp, ScreenStack, UiContext};
pub use style::Color;
