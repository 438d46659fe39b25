//! Display configuration.
//!
//! Loaded once at startup from TOML. Every field has a default so a config
//! file only needs to name what it changes:
//!
//! ```toml
//! screen_width = 400
//! screen_height = 240
//! quit_action = "home_menu"
//! ```

use crate::error::{UiError, UiResult};
use crate::input::Buttons;
use crate::layout::Viewport;
use crate::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a quit request does on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitAction {
    /// Leave the main loop and let the process exit.
    #[default]
    Exit,
    /// Ask the OS to return to its home menu, then leave the main loop.
    HomeMenu,
}

/// Startup configuration for a [`Display`](crate::display::Display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title, where the platform has windows.
    pub title: String,
    /// Logical screen width.
    pub screen_width: f32,
    /// Logical screen height.
    pub screen_height: f32,
    /// Physical pixels per logical pixel.
    pub dpi_scale: f32,
    /// Target frame time in milliseconds.
    pub frame_budget_ms: u64,
    /// Keep highlighted elements redrawing so their border pulses.
    pub idle_cursor_pulsing: bool,
    /// Outline every element without a background.
    pub debug: bool,
    /// Pointer travel (logical pixels) that cancels a pending click.
    pub drag_threshold: f32,
    /// Quit when `exit_button` is pressed.
    pub exit_on_button: bool,
    /// Logical button name that quits.
    pub exit_button: String,
    /// What quitting means on this platform.
    pub quit_action: QuitAction,
    /// Frames between synthesized presses of a held direction.
    pub rapid_fire_rate: u32,
    /// Root background, as RGB bytes.
    pub background: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "kiln".to_string(),
            screen_width: 1280.0,
            screen_height: 720.0,
            dpi_scale: 1.0,
            frame_budget_ms: 16,
            idle_cursor_pulsing: false,
            debug: false,
            drag_threshold: 40.0,
            exit_on_button: true,
            exit_button: "START".to_string(),
            quit_action: QuitAction::Exit,
            rapid_fire_rate: 12,
            background: [0x42, 0x45, 0x48],
        }
    }
}

impl DisplayConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the document does not parse or a
    /// value is out of range.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| UiError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigRead`] if the file cannot be read, otherwise
    /// the errors of [`DisplayConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| UiError::ConfigRead {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            "Loaded display config from {}: {}x{}",
            path.display(),
            config.screen_width,
            config.screen_height
        );
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> UiResult<()> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(UiError::InvalidResolution {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.dpi_scale <= 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "dpi_scale must be positive, got {}",
                self.dpi_scale
            )));
        }
        if self.frame_budget_ms == 0 {
            return Err(UiError::InvalidConfig(
                "frame_budget_ms must be at least 1".to_string(),
            ));
        }
        if self.rapid_fire_rate == 0 {
            return Err(UiError::InvalidConfig(
                "rapid_fire_rate must be at least 1".to_string(),
            ));
        }
        if self.drag_threshold < 0.0 {
            return Err(UiError::InvalidConfig(format!(
                "drag_threshold must not be negative, got {}",
                self.drag_threshold
            )));
        }
        self.exit_buttons()?;
        Ok(())
    }

    /// Resolves `exit_button` to a button mask.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownButton`] for an unknown name.
    pub fn exit_buttons(&self) -> UiResult<Buttons> {
        Buttons::from_name(&self.exit_button)
    }

    /// Returns the root background color.
    #[must_use]
    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::from_rgb8(r, g, b)
    }

    /// Returns the configured logical viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_width,
            height: self.screen_height,
            dpi_scale: self.dpi_scale,
        }
    }
}

/// Process-wide values read by elements and constraints at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Logical screen and DPI scale.
    pub viewport: Viewport,
    /// Keep highlighted elements redrawing so their border pulses.
    pub idle_cursor_pulsing: bool,
    /// Outline every element without a background.
    pub debug: bool,
    /// Pointer travel (logical pixels) that cancels a pending click.
    pub drag_threshold: f32,
}

impl DisplaySettings {
    /// Creates settings for a viewport with default flags.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            idle_cursor_pulsing: false,
            debug: false,
            drag_threshold: 40.0,
        }
    }

    /// Returns the click-cancel distance with the DPI scale applied once.
    #[must_use]
    pub fn drag_threshold_px(&self) -> f32 {
        self.drag_threshold * self.viewport.dpi_scale
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl From<&DisplayConfig> for DisplaySettings {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            viewport: config.viewport(),
            idle_cursor_pulsing: config.idle_cursor_pulsing,
            debug: config.debug,
            drag_threshold: config.drag_threshold,
        }
    }
}
