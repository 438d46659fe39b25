//! Drawing interface between the tree and the platform.
//!
//! Elements never call a graphics API. They paint through a
//! [`RenderContext`], which forwards to a [`DrawBackend`] and drops anything
//! the backend reports as fully offscreen.

use crate::config::DisplaySettings;
use crate::layout::Rect;
use crate::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Opaque handle to a texture owned by the backend.
pub type TextureId = u32;

/// Drawing primitives the platform layer provides.
pub trait DrawBackend {
    /// Fills a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// Strokes a one-pixel rectangle outline.
    fn outline_rect(&mut self, bounds: Rect, color: Color);

    /// Fills a rectangle with rounded corners.
    fn fill_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color);

    /// Strokes a rounded rectangle outline.
    fn outline_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color);

    /// Fills a circle.
    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Color);

    /// Copies a texture into `bounds`, rotated by `angle` degrees around its center.
    fn blit(&mut self, texture: TextureId, bounds: Rect, angle: f32, tint: Color);

    /// Enables or disables alpha blending for subsequent draws.
    fn set_blend(&mut self, enabled: bool);

    /// Returns true if `bounds` lies entirely outside the visible viewport.
    fn is_offscreen(&self, bounds: &Rect) -> bool;

    /// Shows the finished frame.
    fn present(&mut self);

    /// Milliseconds since the platform layer started.
    fn ticks(&self) -> u64;

    /// Blocks for `ms` milliseconds.
    fn delay(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Absolute placement handed from a parent to its children during render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFrame {
    /// Parent's absolute X.
    pub x_abs: f32,
    /// Parent's absolute Y.
    pub y_abs: f32,
    /// Parent's own scale composed with all of its ancestors'.
    pub effective_scale: f32,
}

impl ParentFrame {
    /// The frame of the screen origin.
    pub const ORIGIN: Self = Self {
        x_abs: 0.0,
        y_abs: 0.0,
        effective_scale: 1.0,
    };
}

/// One render pass over the tree.
pub struct RenderContext<'a> {
    backend: &'a mut dyn DrawBackend,
    settings: &'a DisplaySettings,
    now: u64,
    rng: StdRng,
}

impl<'a> RenderContext<'a> {
    /// Starts a pass at tick `now`.
    pub fn new(backend: &'a mut dyn DrawBackend, settings: &'a DisplaySettings, now: u64) -> Self {
        Self {
            backend,
            settings,
            now,
            rng: StdRng::seed_from_u64(now),
        }
    }

    /// Returns the display settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        self.settings
    }

    /// Returns the tick this pass runs at.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns a color for debug outlines.
    pub fn random_color(&mut self) -> Color {
        Color::random(&mut self.rng)
    }

    /// Gives direct access to the backend.
    pub fn backend(&mut self) -> &mut dyn DrawBackend {
        self.backend
    }

    fn visible(&self, bounds: &Rect) -> bool {
        !self.backend.is_offscreen(bounds)
    }

    /// Fills a rectangle unless it is offscreen.
    pub fn fill_rect(&mut self, bounds: Rect, color: Color) {
        if self.visible(&bounds) {
            self.backend.fill_rect(bounds, color);
        }
    }

    /// Outlines a rectangle unless it is offscreen.
    pub fn outline_rect(&mut self, bounds: Rect, color: Color) {
        if self.visible(&bounds) {
            self.backend.outline_rect(bounds, color);
        }
    }

    /// Fills a rounded rectangle unless it is offscreen.
    pub fn fill_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color) {
        if self.visible(&bounds) {
            self.backend.fill_rounded_rect(bounds, radius, color);
        }
    }

    /// Outlines a rounded rectangle unless it is offscreen.
    pub fn outline_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color) {
        if self.visible(&bounds) {
            self.backend.outline_rounded_rect(bounds, radius, color);
        }
    }

    /// Fills a circle unless its bounding box is offscreen.
    pub fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Color) {
        let bounds = Rect::new(center_x - radius, center_y - radius, radius * 2.0, radius * 2.0);
        if self.visible(&bounds) {
            self.backend.fill_circle(center_x, center_y, radius, color);
        }
    }

    /// Blits a texture unless it is offscreen.
    pub fn blit(&mut self, texture: TextureId, bounds: Rect, angle: f32, tint: Color) {
        if self.visible(&bounds) {
            self.backend.blit(texture, bounds, angle, tint);
        }
    }

    /// Toggles alpha blending.
    pub fn set_blend(&mut self, enabled: bool) {
        self.backend.set_blend(enabled);
    }
}

/// A draw call captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    OutlineRect {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
    },
    /// Filled rounded rectangle.
    FillRoundedRect {
        /// Bounds.
        bounds: Rect,
        /// Corner radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Rounded rectangle outline.
    OutlineRoundedRect {
        /// Bounds.
        bounds: Rect,
        /// Corner radius.
        radius: f32,
        /// Stroke color.
        color: Color,
    },
    /// Filled circle.
    FillCircle {
        /// Center X.
        center_x: f32,
        /// Center Y.
        center_y: f32,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    Blit {
        /// Texture handle.
        texture: TextureId,
        /// Destination bounds.
        bounds: Rect,
        /// Rotation in degrees.
        angle: f32,
        /// Tint color.
        tint: Color,
    },
    /// Blend mode change.
    SetBlend(bool),
}

impl DrawCommand {
    /// Returns the fill color of a filled shape.
    #[must_use]
    pub fn fill_color(&self) -> Option<Color> {
        match self {
            Self::FillRect { color, .. }
            | Self::FillRoundedRect { color, .. }
            | Self::FillCircle { color, .. } => Some(*color),
            _ => None,
        }
    }
}

/// Headless backend that records every draw call.
///
/// Its clock only moves when told to (or when the frame loop sleeps), which
/// keeps animation tests deterministic.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    viewport: Rect,
    commands: Vec<DrawCommand>,
    frames_presented: u64,
    ticks: u64,
    blend: bool,
}

impl RecordingBackend {
    /// Creates a backend with a visible area of `width` x `height`.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            commands: Vec::with_capacity(256),
            frames_presented: 0,
            ticks: 0,
            blend: false,
        }
    }

    /// Returns the commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Discards recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the fill colors in the order they were drawn.
    #[must_use]
    pub fn fill_colors(&self) -> Vec<Color> {
        self.commands.iter().filter_map(DrawCommand::fill_color).collect()
    }

    /// Returns how many frames were presented.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Returns whether blending is currently enabled.
    #[must_use]
    pub fn blend_enabled(&self) -> bool {
        self.blend
    }

    /// Sets the clock.
    pub fn set_ticks(&mut self, ticks: u64) {
        self.ticks = ticks;
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.ticks += ms;
    }

    /// Changes the visible area used for culling.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Rect::new(0.0, 0.0, width, height);
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl DrawBackend for RecordingBackend {
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { bounds, color });
    }

    fn outline_rect(&mut self, bounds: Rect, color: Color) {
        self.commands.push(DrawCommand::OutlineRect { bounds, color });
    }

    fn fill_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect { bounds, radius, color });
    }

    fn outline_rounded_rect(&mut self, bounds: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::OutlineRoundedRect { bounds, radius, color });
    }

    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center_x,
            center_y,
            radius,
            color,
        });
    }

    fn blit(&mut self, texture: TextureId, bounds: Rect, angle: f32, tint: Color) {
        self.commands.push(DrawCommand::Blit {
            texture,
            bounds,
            angle,
            tint,
        });
    }

    fn set_blend(&mut self, enabled: bool) {
        self.blend = enabled;
        self.commands.push(DrawCommand::SetBlend(enabled));
    }

    fn is_offscreen(&self, bounds: &Rect) -> bool {
        !self.viewport.intersects(bounds)
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn delay(&mut self, ms: u64) {
        self.ticks += ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_culls_offscreen_shapes() {
        let mut backend = RecordingBackend::new(100.0, 100.0);
        let settings = DisplaySettings::default();
        let mut ctx = RenderContext::new(&mut backend, &settings, 0);

        ctx.fill_rect(Rect::new(10.0, 10.0, 10.0, 10.0), Color::WHITE);
        ctx.fill_rect(Rect::new(150.0, 10.0, 10.0, 10.0), Color::WHITE);
        ctx.fill_circle(-50.0, -50.0, 5.0, Color::WHITE);
        ctx.blit(3, Rect::new(90.0, 90.0, 20.0, 20.0), 45.0, Color::WHITE);

        assert_eq!(backend.commands().len(), 2);
        assert!(matches!(backend.commands()[1], DrawCommand::Blit { texture: 3, .. }));
    }

    #[test]
    fn test_recording_clock_and_present() {
        let mut backend = RecordingBackend::default();
        backend.advance(10);
        backend.delay(6);
        backend.present();

        assert_eq!(backend.ticks(), 16);
        assert_eq!(backend.frames_presented(), 1);
    }

    #[test]
    fn test_fill_colors_skip_outlines() {
        let mut backend = RecordingBackend::default();
        backend.outline_rect(Rect::ZERO, Color::WHITE);
        backend.fill_rect(Rect::ZERO, Color::BLACK);
        backend.set_blend(true);

        assert_eq!(backend.fill_colors(), vec![Color::BLACK]);
        assert!(backend.blend_enabled());
    }
}
