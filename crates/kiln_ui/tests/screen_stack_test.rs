//! Integration test for the screen stack driven through the frame loop.

use kiln_ui::{
    Buttons, Constraint, ConstraintFlags, Display, DisplayConfig, Element, InputEvents,
    RecordingBackend, Screen, ScriptedInput, UiContext, Widget,
};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

/// Full-screen page with one centered button that opens a modal.
struct Page {
    element: Element,
    log: Log,
}

impl Page {
    fn new(log: &Log) -> Self {
        Self {
            element: Element::new(),
            log: Rc::clone(log),
        }
    }
}

impl Widget for Page {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Screen for Page {
    fn rebuild_ui(&mut self, _ui: &UiContext<'_>) {
        self.element.remove_all();
        self.log.borrow_mut().push("page rebuilt".to_string());

        let log = Rc::clone(&self.log);
        self.element.add(
            Element::new()
                .with_size(80.0, 30.0)
                .with_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH))
                .with_event_action(move |ctx| {
                    log.borrow_mut().push("open".to_string());
                    ctx.navigator().push_screen(Modal::new(&log));
                }),
        );
    }

    fn name(&self) -> &str {
        "page"
    }
}

/// Modal whose close button sits in its top-left corner.
struct Modal {
    element: Element,
    log: Log,
}

impl Modal {
    fn new(log: &Log) -> Self {
        Self {
            element: Element::new(),
            log: Rc::clone(log),
        }
    }
}

impl Widget for Modal {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Screen for Modal {
    fn rebuild_ui(&mut self, _ui: &UiContext<'_>) {
        self.element.remove_all();
        let log = Rc::clone(&self.log);
        self.element.add(
            Element::new()
                .with_size(40.0, 40.0)
                .with_constraint(
                    Constraint::new(ConstraintFlags::ALIGN_LEFT | ConstraintFlags::ALIGN_TOP)
                        .with_padding(10),
                )
                .with_event_action(move |ctx| {
                    log.borrow_mut().push("close".to_string());
                    ctx.navigator().pop_screen();
                }),
        );
    }

    fn name(&self) -> &str {
        "modal"
    }
}

fn display(width: f32, height: f32) -> Display<RecordingBackend, ScriptedInput> {
    let config = DisplayConfig {
        screen_width: width,
        screen_height: height,
        ..DisplayConfig::default()
    };
    Display::new(RecordingBackend::new(width, height), ScriptedInput::new(), config)
        .expect("valid config")
}

#[test]
fn test_open_and_close_modal_through_frames() {
    let log: Log = Rc::default();
    let mut display = display(200.0, 100.0);
    display.push_screen(Page::new(&log));

    // The page button centers to (60, 35); the modal close button sits at (10, 10).
    display
        .input_mut()
        .end_frame()
        .click(70.0, 45.0)
        .click(20.0, 20.0)
        .push(InputEvents::key_down(Buttons::START));

    let frames = display.main_loop();

    assert!(frames >= 3);
    assert_eq!(display.top_screen().map(Screen::name), Some("page"));
    assert_eq!(display.screen_count(), 1);
    assert_eq!(
        log.borrow().as_slice(),
        ["page rebuilt", "open", "close"].map(String::from).as_slice()
    );
}

#[test]
fn test_modal_renders_over_page() {
    let log: Log = Rc::default();
    let mut display = display(200.0, 100.0);
    display.push_screen(Page::new(&log));
    display.navigator().push_screen(Modal::new(&log));

    assert!(display.run_frame());
    assert_eq!(display.screen_count(), 2);

    let button = display
        .top_screen()
        .and_then(|modal| modal.element().child(0))
        .map(|child| child.element().bounds());
    assert_eq!(button.map(|b| (b.x, b.y)), Some((10.0, 10.0)));
}

#[test]
fn test_resolution_change_recenters_after_rebuild() {
    let log: Log = Rc::default();
    let mut display = display(200.0, 100.0);
    display.push_screen(Page::new(&log));
    display.render();

    display.set_resolution(400.0, 300.0).expect("valid resolution");
    display.render();

    let button = display
        .top_screen()
        .and_then(|page| page.element().child(0))
        .map(|child| (child.element().x_abs(), child.element().y_abs()));
    assert_eq!(button, Some((160.0, 135.0)));
    assert_eq!(log.borrow().iter().filter(|l| *l == "page rebuilt").count(), 2);
}

#[test]
fn test_removed_sibling_stops_dispatch_and_is_freed_next_frame() {
    let mut display = display(200.0, 100.0);
    display.add(
        Element::new()
            .with_size(50.0, 50.0)
            .with_event_action(|ctx| ctx.remove_self()),
    );
    display.add(Element::new().with_position(100.0, 0.0).with_size(50.0, 50.0));
    display.render();

    display.process(&InputEvents::touch_down(10.0, 10.0));

    // The sibling consumes this flag whenever it is processed.
    if let Some(sibling) = display.root_mut().child_mut(1) {
        sibling.element_mut().needs_redraw = true;
    }
    display.process(&InputEvents::touch_up(10.0, 10.0));
    assert_eq!(display.root().child_count(), 1);
    assert_eq!(display.trash_len(), 1);
    assert_eq!(
        display.root().child(0).map(|sibling| sibling.element().needs_redraw),
        Some(true)
    );

    display.run_frame();
    assert_eq!(display.trash_len(), 0);
}
