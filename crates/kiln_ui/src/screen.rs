//! Screens and modal navigation.
//!
//! Screens live on a LIFO [`ScreenStack`]. Every screen paints, bottom to top,
//! so a dialog can dim the screen beneath it; only the top one gets input.
//!
//! Code running inside a pass cannot touch the stack that is running it.
//! It holds a [`Navigator`] instead, whose operations are queued and applied
//! by the display once the pass has returned.

use crate::config::DisplaySettings;
use crate::element::{EventContext, Widget};
use crate::render::RenderContext;
use crossbeam_channel::{Receiver, Sender};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A full-viewport widget that can rebuild its children from scratch.
pub trait Screen: Widget {
    /// Clears the children and constructs them again from current state.
    ///
    /// Called when the screen is first shown and whenever the resolution or
    /// scale changes.
    fn rebuild_ui(&mut self, ui: &UiContext<'_>);

    /// Name used in logs.
    fn name(&self) -> &str {
        "screen"
    }
}

/// What a screen may use while rebuilding.
#[derive(Debug)]
pub struct UiContext<'a> {
    settings: &'a DisplaySettings,
    navigator: &'a Navigator,
    now: u64,
}

impl<'a> UiContext<'a> {
    /// Creates a rebuild context.
    #[must_use]
    pub fn new(settings: &'a DisplaySettings, navigator: &'a Navigator, now: u64) -> Self {
        Self {
            settings,
            navigator,
            now,
        }
    }

    /// Returns the display settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        self.settings
    }

    /// Returns a navigator for actions to capture.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        self.navigator
    }

    /// Returns the current tick, for starting animations.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }
}

/// A queued structural operation.
pub enum ScreenOp {
    /// Push a screen on top.
    Push(Box<dyn Screen>),
    /// Pop the top screen.
    Pop,
    /// Pop every screen.
    Clear,
    /// Call `rebuild_ui` on every screen.
    RebuildAll,
    /// Leave the main loop.
    Quit,
}

impl fmt::Debug for ScreenOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(screen) => f.debug_tuple("Push").field(&screen.name()).finish(),
            Self::Pop => f.write_str("Pop"),
            Self::Clear => f.write_str("Clear"),
            Self::RebuildAll => f.write_str("RebuildAll"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// Cloneable handle for queueing screen operations.
///
/// Every operation is queued, whether or not a dispatch is running. The
/// display applies the queue after each dispatch, after each render and at
/// the start of each frame. Code holding `&mut Display` that needs an
/// operation applied at once calls the `Display` method directly.
/// [`Navigator::is_dispatching`] is informational only and never changes
/// when an operation is applied.
#[derive(Debug, Clone)]
pub struct Navigator {
    sender: Sender<ScreenOp>,
    dispatching: Rc<Cell<bool>>,
}

impl Navigator {
    /// Queues a push.
    pub fn push_screen(&self, screen: impl Screen + 'static) {
        self.push_boxed(Box::new(screen));
    }

    /// Queues a push of an already boxed screen.
    pub fn push_boxed(&self, screen: Box<dyn Screen>) {
        self.send(ScreenOp::Push(screen));
    }

    /// Queues a pop.
    pub fn pop_screen(&self) {
        self.send(ScreenOp::Pop);
    }

    /// Queues popping every screen.
    pub fn clear_screens(&self) {
        self.send(ScreenOp::Clear);
    }

    /// Queues a rebuild of every screen.
    pub fn rebuild_all(&self) {
        self.send(ScreenOp::RebuildAll);
    }

    /// Queues a quit request.
    pub fn request_quit(&self) {
        self.send(ScreenOp::Quit);
    }

    /// Returns true while the display is dispatching an event.
    ///
    /// Operations are queued either way.
    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// Returns the number of operations waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.sender.len()
    }

    pub(crate) fn set_dispatching(&self, dispatching: bool) {
        self.dispatching.set(dispatching);
    }

    fn send(&self, op: ScreenOp) {
        if let Err(err) = self.sender.send(op) {
            tracing::warn!("Dropped {:?}: the display is gone", err.into_inner());
        }
    }
}

/// Receiving end of the operation queue, owned by the display.
#[derive(Debug)]
pub struct PendingOps {
    receiver: Receiver<ScreenOp>,
}

impl PendingOps {
    /// Takes the oldest queued operation.
    pub fn try_next(&self) -> Option<ScreenOp> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Creates a navigator and the queue it feeds.
#[must_use]
pub fn navigation_channel() -> (Navigator, PendingOps) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (
        Navigator {
            sender,
            dispatching: Rc::new(Cell::new(false)),
        },
        PendingOps { receiver },
    )
}

/// LIFO stack of owned screens.
#[derive(Default)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
}

impl ScreenStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a screen on top.
    pub fn push(&mut self, screen: Box<dyn Screen>) {
        tracing::debug!("Pushing screen {} (depth {})", screen.name(), self.screens.len() + 1);
        self.screens.push(screen);
    }

    /// Pops the top screen.
    pub fn pop(&mut self) -> Option<Box<dyn Screen>> {
        let screen = self.screens.pop();
        if let Some(screen) = &screen {
            tracing::debug!("Popped screen {} (depth {})", screen.name(), self.screens.len());
        }
        screen
    }

    /// Removes every screen, bottom first.
    pub fn clear(&mut self) -> Vec<Box<dyn Screen>> {
        tracing::debug!("Clearing {} screens", self.screens.len());
        std::mem::take(&mut self.screens)
    }

    /// Returns the top screen.
    #[must_use]
    pub fn top(&self) -> Option<&dyn Screen> {
        self.screens.last().map(AsRef::as_ref)
    }

    /// Returns the top screen mutably.
    pub fn top_mut(&mut self) -> Option<&mut (dyn Screen + 'static)> {
        self.screens.last_mut().map(AsMut::as_mut)
    }

    /// Iterates bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Screen> + '_ {
        self.screens.iter().map(AsRef::as_ref)
    }

    /// Iterates bottom to top, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Screen + 'static)> + '_ {
        self.screens.iter_mut().map(AsMut::as_mut)
    }

    /// Returns the depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Returns true if no screen is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Renders every screen, bottom to top.
    pub fn render_all(&mut self, ctx: &mut RenderContext<'_>) {
        for screen in &mut self.screens {
            screen.render(None, ctx);
        }
    }

    /// Dispatches an event to the top screen only.
    pub fn process_top(&mut self, ctx: &mut EventContext<'_>) -> bool {
        self.screens.last_mut().is_some_and(|screen| screen.process(ctx))
    }
}

impl fmt::Debug for ScreenStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.screens.iter().map(|s| s.name())).finish()
    }
}
