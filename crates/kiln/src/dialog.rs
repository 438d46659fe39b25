//! Modal confirmation dialog.

use kiln_ui::{Color, Constraint, ConstraintFlags, Element, Screen, UiContext, Widget};
use std::cell::Cell;
use std::rc::Rc;

/// Size of the dialog panel.
pub const PANEL_SIZE: (f32, f32) = (320.0, 180.0);
/// Size of the OK and Cancel buttons.
pub const DIALOG_BUTTON_SIZE: (f32, f32) = (100.0, 40.0);
/// Gap between OK and Cancel.
pub const BUTTON_GAP: i32 = 6;

/// Dims whatever is beneath it and asks for OK or Cancel.
///
/// Both buttons close the dialog. OK also bumps the shared confirmation
/// counter.
#[derive(Debug)]
pub struct ConfirmDialog {
    element: Element,
    confirmations: Rc<Cell<u32>>,
}

impl ConfirmDialog {
    /// Creates a dialog that reports confirmations to `confirmations`.
    #[must_use]
    pub fn new(confirmations: Rc<Cell<u32>>) -> Self {
        Self {
            element: Element::new(),
            confirmations,
        }
    }
}

impl Widget for ConfirmDialog {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Screen for ConfirmDialog {
    fn rebuild_ui(&mut self, _ui: &UiContext<'_>) {
        self.element.remove_all();

        let (width, height) = (self.element.width, self.element.height);
        self.element.add(
            Element::new()
                .with_size(width, height)
                .with_background(Color::BLACK)
                .with_opacity(0.5),
        );

        let (panel_width, panel_height) = PANEL_SIZE;
        let mut panel = Element::new()
            .with_size(panel_width, panel_height)
            .with_background(Color::WHITE)
            .with_corner_radius(12.0)
            .with_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH));

        let (button_width, button_height) = DIALOG_BUTTON_SIZE;
        let confirmations = Rc::clone(&self.confirmations);
        let ok = Element::new()
            .with_size(button_width, button_height)
            .with_background(Color::HIGHLIGHT)
            .with_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH))
            .with_event_action(move |ctx| {
                confirmations.set(confirmations.get() + 1);
                tracing::info!("Dialog confirmed");
                ctx.navigator().pop_screen();
            });

        let cancel = Element::new()
            .with_size(button_width, button_height)
            .with_background(Color::SLATE)
            .with_constraint(
                Constraint::new(ConstraintFlags::ALIGN_RIGHT | ConstraintFlags::CENTER_VERTICAL)
                    .with_padding(BUTTON_GAP)
                    .with_target(ok.anchor()),
            )
            .with_event_action(|ctx| {
                tracing::info!("Dialog cancelled");
                ctx.navigator().pop_screen();
            });

        panel.add(ok);
        panel.add(cancel);
        self.element.add(panel);
    }

    fn name(&self) -> &str {
        "confirm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuScreen;
    use kiln_ui::{Display, DisplayConfig, RecordingBackend, ScriptedInput};

    fn display() -> Display<RecordingBackend, ScriptedInput> {
        let config = DisplayConfig {
            screen_width: 640.0,
            screen_height: 480.0,
            ..DisplayConfig::default()
        };
        Display::new(RecordingBackend::new(640.0, 480.0), ScriptedInput::new(), config)
            .expect("valid config")
    }

    fn pump(display: &mut Display<RecordingBackend, ScriptedInput>) {
        while display.input().remaining() > 0 {
            display.run_frame();
        }
    }

    fn button_origin(
        display: &Display<RecordingBackend, ScriptedInput>,
        index: usize,
    ) -> Option<(f32, f32)> {
        display
            .top_screen()
            .and_then(|dialog| dialog.element().child(1))
            .and_then(|panel| panel.element().child(index))
            .map(|button| (button.element().x_abs(), button.element().y_abs()))
    }

    #[test]
    fn test_cancel_sits_right_of_ok() {
        let mut display = display();
        display.push_screen(ConfirmDialog::new(Rc::default()));
        display.render();

        // Panel at (160, 150); OK centered inside it.
        assert_eq!(button_origin(&display, 0), Some((270.0, 220.0)));
        assert_eq!(button_origin(&display, 1), Some((376.0, 220.0)));
    }

    #[test]
    fn test_ok_confirms_and_closes() {
        let confirmations = Rc::new(Cell::new(0));
        let mut display = display();
        display.push_screen(MenuScreen::new());
        display.push_screen(ConfirmDialog::new(Rc::clone(&confirmations)));
        display.render();

        display.input_mut().click(320.0, 240.0);
        pump(&mut display);

        assert_eq!(confirmations.get(), 1);
        assert_eq!(display.top_screen().map(Screen::name), Some("menu"));
        assert_eq!(display.trash_len(), 1);

        display.run_frame();
        assert_eq!(display.trash_len(), 0);
    }

    #[test]
    fn test_cancel_closes_without_confirming() {
        let confirmations = Rc::new(Cell::new(0));
        let mut display = display();
        display.push_screen(MenuScreen::new());
        display.push_screen(ConfirmDialog::new(Rc::clone(&confirmations)));
        display.render();

        display.input_mut().click(420.0, 240.0);
        pump(&mut display);

        assert_eq!(confirmations.get(), 0);
        assert_eq!(display.screen_count(), 1);
    }

    #[test]
    fn test_overlay_dims_the_menu() {
        let mut display = display();
        display.push_screen(MenuScreen::new());
        display.push_screen(ConfirmDialog::new(Rc::default()));
        display.backend_mut().clear();
        display.render();

        let overlay = Color::BLACK.with_alpha(0.5);
        assert!(display
            .backend()
            .fill_colors()
            .iter()
            .any(|color| *color == overlay));
        assert_eq!(display.backend().frames_presented(), 1);
    }
}
