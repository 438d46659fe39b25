//! Input events consumed by the element tree.
//!
//! The platform layer turns touch, mouse, keyboard, and gamepad activity
//! into one [`InputEvents`] value per event. Elements only ever ask boolean
//! questions of it.

use crate::error::{UiError, UiResult};
use crate::layout::Rect;
use std::collections::VecDeque;
use std::ops::{BitOr, BitOrAssign};

/// Logical controller buttons (bitfield, several may be queried at once).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Buttons(u32);

impl Buttons {
    /// No button.
    pub const NONE: Self = Self(0);
    /// D-pad left.
    pub const LEFT: Self = Self(1 << 0);
    /// D-pad right.
    pub const RIGHT: Self = Self(1 << 1);
    /// D-pad up.
    pub const UP: Self = Self(1 << 2);
    /// D-pad down.
    pub const DOWN: Self = Self(1 << 3);
    /// Start / plus.
    pub const START: Self = Self(1 << 4);
    /// B face button.
    pub const B: Self = Self(1 << 5);
    /// A face button.
    pub const A: Self = Self(1 << 6);
    /// Left trigger.
    pub const ZL: Self = Self(1 << 7);
    /// Select / minus.
    pub const SELECT: Self = Self(1 << 8);
    /// Left shoulder.
    pub const L: Self = Self(1 << 9);
    /// Right shoulder.
    pub const R: Self = Self(1 << 10);
    /// X face button.
    pub const X: Self = Self(1 << 11);
    /// Y face button.
    pub const Y: Self = Self(1 << 12);
    /// Right trigger.
    pub const ZR: Self = Self(1 << 13);

    /// The four directions, in repeat priority order.
    pub const DIRECTIONS: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Returns the raw mask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if any button in `other` is also in `self`.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns true if no button is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses a configuration name such as `"START"` or `"zl"`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownButton`] for names that are not logical buttons.
    pub fn from_name(name: &str) -> UiResult<Self> {
        let button = match name.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Self::LEFT,
            "RIGHT" => Self::RIGHT,
            "UP" => Self::UP,
            "DOWN" => Self::DOWN,
            "START" | "PLUS" => Self::START,
            "B" => Self::B,
            "A" => Self::A,
            "ZL" => Self::ZL,
            "SELECT" | "MINUS" => Self::SELECT,
            "L" => Self::L,
            "R" => Self::R,
            "X" => Self::X,
            "Y" => Self::Y,
            "ZR" => Self::ZR,
            _ => return Err(UiError::UnknownButton(name.to_string())),
        };
        Ok(button)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// What kind of event this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    /// Nothing happened; used to tick idle state machines.
    #[default]
    Noop,
    /// Finger or mouse button pressed.
    TouchDown,
    /// Finger or mouse moved.
    TouchDrag,
    /// Finger lifted or mouse button released.
    TouchUp,
    /// Key or controller button pressed.
    KeyDown,
    /// Key or controller button released.
    KeyUp,
    /// Mouse wheel or scroll gesture.
    Scroll,
    /// The platform asked the application to close.
    Quit,
}

/// Cursor shapes the tree may request as a hover cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// Default pointer.
    Arrow,
    /// Pointer over something clickable.
    Hand,
}

/// A single polled input event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputEvents {
    kind: EventKind,
    /// Pointer X position in logical coordinates.
    pub x: f32,
    /// Pointer Y position in logical coordinates.
    pub y: f32,
    buttons: Buttons,
    /// Wheel delta carried by a scroll event.
    pub wheel: f32,
}

impl InputEvents {
    /// An event that carries nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::default()
    }

    /// A press at the given point.
    #[must_use]
    pub fn touch_down(x: f32, y: f32) -> Self {
        Self::pointer(EventKind::TouchDown, x, y)
    }

    /// A drag to the given point.
    #[must_use]
    pub fn touch_drag(x: f32, y: f32) -> Self {
        Self::pointer(EventKind::TouchDrag, x, y)
    }

    /// A release at the given point.
    #[must_use]
    pub fn touch_up(x: f32, y: f32) -> Self {
        Self::pointer(EventKind::TouchUp, x, y)
    }

    /// A button press.
    #[must_use]
    pub fn key_down(buttons: Buttons) -> Self {
        Self {
            kind: EventKind::KeyDown,
            buttons,
            ..Self::default()
        }
    }

    /// A button release.
    #[must_use]
    pub fn key_up(buttons: Buttons) -> Self {
        Self {
            kind: EventKind::KeyUp,
            buttons,
            ..Self::default()
        }
    }

    /// A wheel movement.
    #[must_use]
    pub fn scroll(delta: f32) -> Self {
        Self {
            kind: EventKind::Scroll,
            wheel: delta,
            ..Self::default()
        }
    }

    /// A close request from the platform.
    #[must_use]
    pub fn quit() -> Self {
        Self {
            kind: EventKind::Quit,
            ..Self::default()
        }
    }

    fn pointer(kind: EventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            ..Self::default()
        }
    }

    /// Returns the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the buttons carried by a key event.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Returns true for a press.
    #[must_use]
    pub fn is_touch_down(&self) -> bool {
        self.kind == EventKind::TouchDown
    }

    /// Returns true for a drag.
    #[must_use]
    pub fn is_touch_drag(&self) -> bool {
        self.kind == EventKind::TouchDrag
    }

    /// Returns true for a release.
    #[must_use]
    pub fn is_touch_up(&self) -> bool {
        self.kind == EventKind::TouchUp
    }

    /// Returns true for any touch event.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.is_touch_down() || self.is_touch_drag() || self.is_touch_up()
    }

    /// Returns true for a key or button press.
    #[must_use]
    pub fn is_key_down(&self) -> bool {
        self.kind == EventKind::KeyDown
    }

    /// Returns true for a key or button release.
    #[must_use]
    pub fn is_key_up(&self) -> bool {
        self.kind == EventKind::KeyUp
    }

    /// Returns true for a wheel event.
    #[must_use]
    pub fn is_scroll(&self) -> bool {
        self.kind == EventKind::Scroll
    }

    /// Returns true for the synthetic idle event.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.kind == EventKind::Noop
    }

    /// Returns true for a platform close request.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.kind == EventKind::Quit
    }

    /// Returns true if this key event, down or up, involves any of `buttons`.
    #[must_use]
    pub fn involves(&self, buttons: Buttons) -> bool {
        (self.is_key_down() || self.is_key_up()) && self.buttons.intersects(buttons)
    }

    /// Returns true if any of `buttons` is held down as of this event.
    ///
    /// A key-up reports the buttons it lets go of, so it never counts.
    #[must_use]
    pub fn held(&self, buttons: Buttons) -> bool {
        self.is_key_down() && self.buttons.intersects(buttons)
    }

    /// Returns true if any of `buttons` was pressed by this event.
    #[must_use]
    pub fn pressed(&self, buttons: Buttons) -> bool {
        self.held(buttons)
    }

    /// Returns true if any of `buttons` was released by this event.
    #[must_use]
    pub fn released(&self, buttons: Buttons) -> bool {
        self.is_key_up() && self.involves(buttons)
    }

    /// Returns true if the pointer lies within `bounds`.
    #[must_use]
    pub fn touch_in(&self, bounds: &Rect) -> bool {
        bounds.contains(self.x, self.y)
    }
}

/// The platform's input source.
pub trait InputBackend {
    /// Returns the next pending event, or `None` when the frame's events are exhausted.
    fn poll(&mut self) -> Option<InputEvents>;

    /// Changes the pointer shape, if the platform has one.
    fn set_cursor(&mut self, _cursor: CursorKind) {}

    /// Vibrates the controller for a short time, if supported.
    fn rumble(&mut self, _duration_ms: u32) {}

    /// Asks the OS to return to its home menu (platforms that cannot exit).
    fn request_home_menu(&mut self) {}
}

/// Scroll delta that keeps coasting after the wheel stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelAccumulator {
    value: f32,
    decay: f32,
}

impl WheelAccumulator {
    /// Per-frame decay applied by default.
    pub const DEFAULT_DECAY: f32 = 0.85;
    /// Below this magnitude the accumulator snaps to zero.
    const EPSILON: f32 = 0.01;

    /// Creates an empty accumulator.
    #[must_use]
    pub fn new(decay: f32) -> Self {
        Self { value: 0.0, decay }
    }

    /// Adds the delta carried by a scroll event.
    pub fn feed(&mut self, event: &InputEvents) {
        if event.is_scroll() {
            self.value += event.wheel;
        }
    }

    /// Applies one frame of decay.
    pub fn decay(&mut self) {
        self.value *= self.decay;
        if self.value.abs() < Self::EPSILON {
            self.value = 0.0;
        }
    }

    /// Returns the current delta.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DECAY)
    }
}

/// Synthesizes repeated direction presses while a direction is held.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalRepeat {
    held: [bool; 4],
    frame: i32,
    rapid_fire_rate: i32,
}

impl DirectionalRepeat {
    /// Frames to wait after the first press before repeating.
    pub const INITIAL_DELAY: i32 = 25;

    /// Creates a repeater firing every `rapid_fire_rate` frames.
    #[must_use]
    pub fn new(rapid_fire_rate: u32) -> Self {
        Self {
            held: [false; 4],
            frame: 0,
            rapid_fire_rate: i32::try_from(rapid_fire_rate.max(1)).unwrap_or(i32::MAX),
        }
    }

    /// Tracks direction presses and releases.
    pub fn observe(&mut self, event: &InputEvents) {
        for (slot, direction) in Buttons::DIRECTIONS.iter().enumerate() {
            if event.pressed(*direction) && !self.held[slot] {
                self.held[slot] = true;
                self.frame = -Self::INITIAL_DELAY;
            }
            if event.released(*direction) {
                self.held[slot] = false;
            }
        }
    }

    /// Advances one frame and returns a repeated press if one is due.
    pub fn tick(&mut self) -> Option<InputEvents> {
        self.frame = self.frame.saturating_add(1);
        if self.frame <= 0 || self.frame % self.rapid_fire_rate != 0 {
            return None;
        }
        Buttons::DIRECTIONS
            .iter()
            .zip(self.held)
            .find(|(_, held)| *held)
            .map(|(direction, _)| InputEvents::key_down(*direction))
    }

    /// Returns true if any direction is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.held.iter().any(|held| *held)
    }
}

/// Input backend that replays a fixed script.
///
/// `None` entries end a frame: `poll` returns `None` once for each, so the
/// display sees the events between two breaks as one frame's batch.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<InputEvents>>,
    cursor: Option<CursorKind>,
    rumbles: u32,
    home_menu_requests: u32,
}

impl ScriptedInput {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event in the current frame.
    pub fn push(&mut self, event: InputEvents) -> &mut Self {
        self.script.push_back(Some(event));
        self
    }

    /// Ends the current frame.
    pub fn end_frame(&mut self) -> &mut Self {
        self.script.push_back(None);
        self
    }

    /// Queues a press and release at the same point, each in its own frame.
    pub fn click(&mut self, x: f32, y: f32) -> &mut Self {
        self.push(InputEvents::touch_down(x, y))
            .end_frame()
            .push(InputEvents::touch_up(x, y))
            .end_frame()
    }

    /// Returns the number of script entries left, frame breaks included.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Returns the last cursor shape requested.
    #[must_use]
    pub fn cursor(&self) -> Option<CursorKind> {
        self.cursor
    }

    /// Returns how many rumbles were requested.
    #[must_use]
    pub fn rumbles(&self) -> u32 {
        self.rumbles
    }

    /// Returns how many times the home menu was requested.
    #[must_use]
    pub fn home_menu_requests(&self) -> u32 {
        self.home_menu_requests
    }
}

impl InputBackend for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvents> {
        self.script.pop_front().flatten()
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = Some(cursor);
    }

    fn rumble(&mut self, _duration_ms: u32) {
        self.rumbles += 1;
    }

    fn request_home_menu(&mut self) {
        self.home_menu_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_queries() {
        let down = InputEvents::touch_down(10.0, 10.0);
        assert!(down.is_touch_down());
        assert!(down.is_touch());
        assert!(!down.is_key_down());
        assert!(down.touch_in(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!down.touch_in(&Rect::new(11.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_button_queries() {
        let press = InputEvents::key_down(Buttons::A);
        assert!(press.pressed(Buttons::A | Buttons::B));
        assert!(!press.pressed(Buttons::START));
        assert!(!press.released(Buttons::A));

        let release = InputEvents::key_up(Buttons::A);
        assert!(release.released(Buttons::A));
        assert!(!InputEvents::touch_up(0.0, 0.0).held(Buttons::A));
    }

    #[test]
    fn test_key_up_is_not_held() {
        let press = InputEvents::key_down(Buttons::LEFT);
        assert!(press.held(Buttons::LEFT));
        assert!(press.involves(Buttons::LEFT));

        let release = InputEvents::key_up(Buttons::LEFT);
        assert!(!release.held(Buttons::LEFT));
        assert!(release.involves(Buttons::LEFT));
        assert!(!release.involves(Buttons::RIGHT));
    }

    #[test]
    fn test_button_names() {
        assert_eq!(Buttons::from_name("start"), Ok(Buttons::START));
        assert_eq!(Buttons::from_name("Minus"), Ok(Buttons::SELECT));
        assert_eq!(
            Buttons::from_name("turbo"),
            Err(UiError::UnknownButton("turbo".to_string()))
        );
    }

    #[test]
    fn test_wheel_decays_to_zero() {
        let mut wheel = WheelAccumulator::default();
        wheel.feed(&InputEvents::scroll(4.0));
        wheel.feed(&InputEvents::touch_down(0.0, 0.0));
        assert!((wheel.value() - 4.0).abs() < f32::EPSILON);

        wheel.decay();
        assert!(wheel.value() < 4.0 && wheel.value() > 0.0);

        for _ in 0..200 {
            wheel.decay();
        }
        assert!(wheel.value().abs() < f32::EPSILON);
    }

    #[test]
    fn test_directional_repeat_waits_then_fires() {
        let mut repeat = DirectionalRepeat::new(12);
        repeat.observe(&InputEvents::key_down(Buttons::DOWN));
        assert!(repeat.is_active());

        // Frames run -24..=35 after the press, so only frames 12 and 24 repeat.
        let fired = (0..60).filter(|_| repeat.tick().is_some()).count();
        assert_eq!(fired, 2);

        repeat.observe(&InputEvents::key_up(Buttons::DOWN));
        assert!(!repeat.is_active());
        assert!((0..48).all(|_| repeat.tick().is_none()));
    }

    #[test]
    fn test_directional_repeat_reports_direction() {
        let mut repeat = DirectionalRepeat::new(1);
        repeat.observe(&InputEvents::key_down(Buttons::LEFT));
        let event = (0..=DirectionalRepeat::INITIAL_DELAY + 1)
            .find_map(|_| repeat.tick())
            .expect("repeat should fire");
        assert!(event.pressed(Buttons::LEFT));
    }

    #[test]
    fn test_scripted_input_frames() {
        let mut input = ScriptedInput::new();
        input.click(5.0, 5.0).push(InputEvents::quit());

        assert!(input.poll().is_some_and(|e| e.is_touch_down()));
        assert!(input.poll().is_none());
        assert!(input.poll().is_some_and(|e| e.is_touch_up()));
        assert!(input.poll().is_none());
        assert!(input.poll().is_some_and(|e| e.is_quit()));
        assert_eq!(input.remaining(), 0);
        assert!(input.poll().is_none());
    }
}
