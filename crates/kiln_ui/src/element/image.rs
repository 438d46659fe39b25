//! Textured element.

use super::core::{Element, Widget};
use crate::render::{ParentFrame, RenderContext, TextureId};
use crate::style::Color;

/// An element that paints a backend texture over its bounds.
#[derive(Debug)]
pub struct ImageElement {
    element: Element,
    texture: TextureId,
    tint: Color,
}

impl ImageElement {
    /// Creates an image of the given size.
    #[must_use]
    pub fn new(texture: TextureId, width: f32, height: f32) -> Self {
        Self {
            element: Element::new().with_size(width, height),
            texture,
            tint: Color::WHITE,
        }
    }

    /// Sets the color the texture is modulated with.
    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.element.angle = angle;
        self
    }

    /// Returns the texture handle.
    #[must_use]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Swaps the texture.
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
        self.element.needs_redraw = true;
    }
}

impl Widget for ImageElement {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn render(&mut self, parent: Option<&ParentFrame>, ctx: &mut RenderContext<'_>) {
        let (texture, tint) = (self.texture, self.tint);
        self.element.render_with(parent, ctx, |element, ctx| {
            ctx.blit(texture, element.bounds(), element.angle, tint);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;
    use crate::layout::Rect;
    use crate::render::{DrawCommand, RecordingBackend};

    #[test]
    fn test_blit_sits_between_background_and_children() {
        let mut backend = RecordingBackend::default();
        let settings = DisplaySettings::default();
        let mut image = ImageElement::new(7, 64.0, 32.0).with_angle(90.0);
        image.element_mut().has_background = true;
        image
            .element_mut()
            .add(Element::new().with_size(8.0, 8.0).with_background(Color::WHITE));

        let mut ctx = RenderContext::new(&mut backend, &settings, 0);
        image.render(Some(&ParentFrame::ORIGIN), &mut ctx);

        let commands = backend.commands();
        assert!(matches!(commands[0], DrawCommand::SetBlend(false)));
        assert_eq!(commands[1].fill_color(), Some(Color::BLACK));
        assert_eq!(
            commands[2],
            DrawCommand::Blit {
                texture: 7,
                bounds: Rect::new(0.0, 0.0, 64.0, 32.0),
                angle: 90.0,
                tint: Color::WHITE,
            }
        );
        assert_eq!(commands[4].fill_color(), Some(Color::WHITE));
    }

    #[test]
    fn test_hidden_image_skips_blit() {
        let mut backend = RecordingBackend::default();
        let settings = DisplaySettings::default();
        let mut image = ImageElement::new(1, 10.0, 10.0);
        image.element_mut().hide();

        let mut ctx = RenderContext::new(&mut backend, &settings, 0);
        image.render(None, &mut ctx);
        assert!(backend.commands().is_empty());
    }
}
