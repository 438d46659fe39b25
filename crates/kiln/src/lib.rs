//! # KILN Demo Screens
//!
//! Two screens that exercise the runtime end to end:
//! - [`MenuScreen`] - title bar, a fading "open" button and a quit button
//! - [`ConfirmDialog`] - dimmed overlay with OK/Cancel, popped by either button
//!
//! The `headless_demo` binary drives both through the frame loop with a
//! recording backend and scripted input.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dialog;
pub mod menu;

pub use dialog::ConfirmDialog;
pub use menu::MenuScreen;

/// Texture id the menu logo is drawn with.
pub const LOGO_TEXTURE: kiln_ui::TextureId = 1;
