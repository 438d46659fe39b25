//! Per-event dispatch state handed down the tree.

use super::core::Widget;
use crate::config::DisplaySettings;
use crate::input::{CursorKind, InputEvents};
use crate::screen::{Navigator, Screen};
use std::fmt;

/// A structural change an element asks of its owner.
///
/// The owner applies it right after the element's `process` returns, then
/// stops visiting its remaining children for that event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRequest {
    /// Remove the element from its parent and park it in the trash.
    Detach,
    /// Move the element to the end of its parent's children (painted last).
    MoveToFront,
}

/// Nodes removed during a pass, kept alive until the next frame starts.
#[derive(Default)]
pub struct Trash {
    widgets: Vec<Box<dyn Widget>>,
    screens: Vec<Box<dyn Screen>>,
}

impl Trash {
    /// Creates an empty trash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a removed widget.
    pub fn park(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
    }

    /// Parks several removed widgets.
    pub fn park_all(&mut self, widgets: impl IntoIterator<Item = Box<dyn Widget>>) {
        self.widgets.extend(widgets);
    }

    /// Parks a popped screen.
    pub fn park_screen(&mut self, screen: Box<dyn Screen>) {
        self.screens.push(screen);
    }

    /// Returns the number of parked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len() + self.screens.len()
    }

    /// Returns true if nothing is parked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops everything parked and returns how many nodes were freed.
    pub fn empty(&mut self) -> usize {
        let freed = self.len();
        self.widgets.clear();
        self.screens.clear();
        freed
    }
}

impl fmt::Debug for Trash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trash")
            .field("widgets", &self.widgets.len())
            .field("screens", &self.screens.len())
            .finish()
    }
}

/// Everything an element may read or request while handling one event.
pub struct EventContext<'a> {
    event: &'a InputEvents,
    settings: &'a DisplaySettings,
    navigator: &'a Navigator,
    trash: &'a mut Trash,
    now: u64,
    wheel: f32,
    request: Option<TreeRequest>,
    cursor: Option<CursorKind>,
    rumble: Option<u32>,
}

impl<'a> EventContext<'a> {
    /// Creates a context for one event.
    pub fn new(
        event: &'a InputEvents,
        settings: &'a DisplaySettings,
        navigator: &'a Navigator,
        trash: &'a mut Trash,
    ) -> Self {
        Self {
            event,
            settings,
            navigator,
            trash,
            now: 0,
            wheel: 0.0,
            request: None,
            cursor: None,
            rumble: None,
        }
    }

    /// Sets the tick the event is dispatched at.
    #[must_use]
    pub fn at(mut self, now: u64) -> Self {
        self.now = now;
        self
    }

    /// Sets the decaying wheel delta visible to scrolling widgets.
    #[must_use]
    pub fn with_wheel(mut self, wheel: f32) -> Self {
        self.wheel = wheel;
        self
    }

    /// Returns the event being dispatched.
    #[must_use]
    pub fn event(&self) -> &InputEvents {
        self.event
    }

    /// Returns the display settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        self.settings
    }

    /// Returns the handle for queueing screen operations.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        self.navigator
    }

    /// Returns the dispatch tick.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns the accumulated wheel delta.
    #[must_use]
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    /// Asks the owner to remove the element whose action is running.
    ///
    /// The element is parked in the trash, not dropped, so it stays valid
    /// until the frame ends.
    pub fn remove_self(&mut self) {
        self.request = Some(TreeRequest::Detach);
    }

    /// Asks the owner to paint the element whose action is running last.
    pub fn move_to_front(&mut self) {
        self.request = Some(TreeRequest::MoveToFront);
    }

    /// Takes the pending structural request, if any.
    pub fn take_request(&mut self) -> Option<TreeRequest> {
        self.request.take()
    }

    /// Parks a widget removed by an action.
    pub fn park(&mut self, widget: Box<dyn Widget>) {
        self.trash.park(widget);
    }

    /// Parks several widgets removed by an action.
    pub fn park_all(&mut self, widgets: impl IntoIterator<Item = Box<dyn Widget>>) {
        self.trash.park_all(widgets);
    }

    /// Requests a pointer shape.
    pub fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = Some(cursor);
    }

    /// Requests a short controller rumble.
    pub fn rumble(&mut self, duration_ms: u32) {
        self.rumble = Some(duration_ms);
    }

    /// Takes the cursor and rumble hints gathered during dispatch.
    pub fn take_hints(&mut self) -> (Option<CursorKind>, Option<u32>) {
        (self.cursor.take(), self.rumble.take())
    }
}

impl fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("event", self.event)
            .field("now", &self.now)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
