//! Main menu.

use crate::dialog::ConfirmDialog;
use crate::LOGO_TEXTURE;
use kiln_ui::{
    Color, Constraint, ConstraintFlags, Element, ImageElement, Screen, UiContext, Widget,
};
use std::cell::Cell;
use std::rc::Rc;

/// Height of the title bar.
pub const TITLE_BAR_HEIGHT: f32 = 60.0;
/// Size of the menu buttons.
pub const BUTTON_SIZE: (f32, f32) = (200.0, 60.0);
/// Gap between the quit button and the bottom edge.
pub const QUIT_BUTTON_PADDING: i16 = 40;
/// Fade-in time of the open button, in milliseconds.
pub const FADE_IN_MS: u64 = 300;

const MENU_BACKGROUND: Color = Color::hex(0x1E_20_22_FF);

/// Entry screen: a title bar, a centered "open" button and a quit button.
#[derive(Debug)]
pub struct MenuScreen {
    element: Element,
    confirmations: Rc<Cell<u32>>,
    dialogs_opened: Rc<Cell<u32>>,
}

impl MenuScreen {
    /// Creates the menu. Children are built on the first rebuild.
    #[must_use]
    pub fn new() -> Self {
        Self {
            element: Element::new().with_background(MENU_BACKGROUND),
            confirmations: Rc::default(),
            dialogs_opened: Rc::default(),
        }
    }

    /// Counter bumped every time a dialog opened from this menu is confirmed.
    #[must_use]
    pub fn confirmations(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.confirmations)
    }

    /// Counter bumped every time the open button is clicked.
    #[must_use]
    pub fn dialogs_opened(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.dialogs_opened)
    }

    /// Center of the quit button on a screen of the given size.
    #[must_use]
    pub fn quit_button_center(width: f32, height: f32) -> (f32, f32) {
        let (_, button_height) = BUTTON_SIZE;
        (
            width / 2.0,
            height - f32::from(QUIT_BUTTON_PADDING) - button_height / 2.0,
        )
    }

    fn title_bar(&self) -> Element {
        let mut bar = Element::new()
            .with_size(self.element.width, TITLE_BAR_HEIGHT)
            .with_background(Color::SLATE)
            .with_constraint(Constraint::new(
                ConstraintFlags::ALIGN_TOP | ConstraintFlags::ALIGN_LEFT,
            ));

        let mut logo = ImageElement::new(LOGO_TEXTURE, 40.0, 40.0);
        logo.element_mut().add_constraint(
            Constraint::new(ConstraintFlags::ALIGN_LEFT | ConstraintFlags::CENTER_VERTICAL)
                .with_padding(10),
        );
        bar.add(logo);
        bar
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuScreen {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Screen for MenuScreen {
    fn rebuild_ui(&mut self, ui: &UiContext<'_>) {
        self.element.remove_all();
        self.element.add(self.title_bar());

        let (width, height) = BUTTON_SIZE;
        let confirmations = Rc::clone(&self.confirmations);
        let opened = Rc::clone(&self.dialogs_opened);
        let mut open = Element::new()
            .with_size(width, height)
            .with_background(Color::HIGHLIGHT)
            .with_opacity(0.0)
            .with_corner_radius(8.0)
            .with_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH))
            .with_event_action(move |ctx| {
                opened.set(opened.get() + 1);
                tracing::debug!("Opening confirm dialog");
                ctx.navigator()
                    .push_screen(ConfirmDialog::new(Rc::clone(&confirmations)));
            });
        open.animate(
            ui.now(),
            FADE_IN_MS,
            |element, progress| element.background_opacity = progress,
            |element| element.background_opacity = 1.0,
        );
        self.element.add(open);

        let navigator = ui.navigator().clone();
        self.element.add(
            Element::new()
                .with_size(width, height)
                .with_background(Color::SLATE)
                .with_corner_radius(8.0)
                .with_constraint(
                    Constraint::new(
                        ConstraintFlags::CENTER_HORIZONTAL | ConstraintFlags::ALIGN_BOTTOM,
                    )
                    .with_padding(i32::from(QUIT_BUTTON_PADDING)),
                )
                .with_action(move || navigator.request_quit()),
        );
    }

    fn name(&self) -> &str {
        "menu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn child_bounds(
        display: &Display<RecordingBackend, ScriptedInput>,
        index: usize,
    ) -> kiln_ui::Rect {
        display
            .top_screen()
            .and_then(|screen| screen.element().child(index))
            .map(|child| child.element().bounds())
            .expect("child exists")
    }

    #[test]
    fn test_menu_layout() {
        let mut display = display();
        display.push_screen(MenuScreen::new());
        display.render();

        let bar = child_bounds(&display, 0);
        assert_eq!((bar.x, bar.y, bar.width), (0.0, 0.0, 640.0));

        let open = child_bounds(&display, 1);
        assert_eq!((open.x, open.y), (220.0, 210.0));

        let quit = child_bounds(&display, 2);
        assert_eq!((quit.x, quit.y), (220.0, 380.0));
    }

    #[test]
    fn test_open_button_fades_in() {
        let mut display = display();
        display.push_screen(MenuScreen::new());

        display.backend_mut().advance(FADE_IN_MS / 2);
        display.render();
        let opacity = |d: &Display<RecordingBackend, ScriptedInput>| {
            d.top_screen()
                .and_then(|s| s.element().child(1))
                .map(|c| c.element().background_opacity)
        };
        let halfway = opacity(&display).expect("open button");
        assert!(halfway > 0.0 && halfway < 1.0);

        display.backend_mut().advance(FADE_IN_MS);
        display.render();
        assert_eq!(opacity(&display), Some(1.0));
    }

    #[test]
    fn test_open_button_pushes_dialog() {
        let mut display = display();
        let menu = MenuScreen::new();
        let opened = menu.dialogs_opened();
        display.push_screen(menu);
        display.render();

        display.input_mut().click(320.0, 240.0);
        pump(&mut display);

        assert_eq!(opened.get(), 1);
        assert_eq!(display.screen_count(), 2);
        assert_eq!(display.top_screen().map(Screen::name), Some("confirm"));
    }

    #[test]
    fn test_quit_button_requests_quit() {
        let mut display = display();
        display.push_screen(MenuScreen::new());
        display.render();

        let (x, y) = MenuScreen::quit_button_center(640.0, 480.0);
        assert_eq!((x, y), (320.0, 410.0));
        display.input_mut().click(x, y);
        pump(&mut display);

        assert!(display.is_quit_requested());
    }
}
