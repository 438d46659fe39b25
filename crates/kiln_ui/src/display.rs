//! Root display and main loop.
//!
//! The [`Display`] is the one process-wide context: it owns the drawing and
//! input backends, the settings every element reads, the screen stack, and
//! the fallback root element used when no screen is shown.
//!
//! Frame structure:
//!
//! 1. Drop whatever the previous frame parked in the trash.
//! 2. Apply queued screen operations.
//! 3. Dispatch every polled event; after each, apply the operations it queued.
//! 4. With no events, synthesize a directional repeat or a no-op event.
//! 5. Render if anything changed, otherwise sleep out the frame budget.

use crate::config::{DisplayConfig, DisplaySettings, QuitAction};
use crate::element::{Element, EventContext, Trash, Widget};
use crate::error::{UiError, UiResult};
use crate::input::{Buttons, DirectionalRepeat, InputBackend, InputEvents, WheelAccumulator};
use crate::render::{DrawBackend, ParentFrame, RenderContext};
use crate::screen::{navigation_channel, Navigator, PendingOps, Screen, ScreenOp, ScreenStack, UiContext};

/// The root of the UI.
pub struct Display<B: DrawBackend, I: InputBackend> {
    backend: B,
    input: I,
    config: DisplayConfig,
    settings: DisplaySettings,
    root: Element,
    screens: ScreenStack,
    navigator: Navigator,
    pending: PendingOps,
    trash: Trash,
    wheel: WheelAccumulator,
    repeat: DirectionalRepeat,
    exit_buttons: Buttons,
    quit_requested: bool,
    frames_rendered: u64,
}

impl<B: DrawBackend, I: InputBackend> Display<B, I> {
    /// Creates a display.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`DisplayConfig::validate`] finds.
    pub fn new(backend: B, input: I, config: DisplayConfig) -> UiResult<Self> {
        config.validate()?;
        let exit_buttons = config.exit_buttons()?;
        let settings = DisplaySettings::from(&config);
        let root = Element::new()
            .with_size(config.screen_width, config.screen_height)
            .with_background(config.background_color());
        let (navigator, pending) = navigation_channel();

        tracing::info!(
            "Display '{}' ready at {}x{} (scale {})",
            config.title,
            config.screen_width,
            config.screen_height,
            config.dpi_scale
        );

        Ok(Self {
            backend,
            input,
            repeat: DirectionalRepeat::new(config.rapid_fire_rate),
            config,
            settings,
            root,
            screens: ScreenStack::new(),
            navigator,
            pending,
            trash: Trash::new(),
            wheel: WheelAccumulator::default(),
            exit_buttons,
            quit_requested: false,
            frames_rendered: 0,
        })
    }

    // ---------------------------------------------------------------------
    // Screen stack
    // ---------------------------------------------------------------------

    /// Sizes, builds, and shows a screen on top of the stack.
    pub fn push_screen(&mut self, screen: impl Screen + 'static) {
        self.push_boxed(Box::new(screen));
    }

    /// Boxed form of [`Display::push_screen`].
    pub fn push_boxed(&mut self, mut screen: Box<dyn Screen>) {
        let viewport = self.settings.viewport;
        let ui = UiContext::new(&self.settings, &self.navigator, self.backend.ticks());
        screen.element_mut().set_size(viewport.width, viewport.height);
        screen.rebuild_ui(&ui);
        screen.element_mut().needs_redraw = true;
        self.screens.push(screen);
    }

    /// Pops the top screen into the trash. Returns false if the stack was empty.
    pub fn pop_screen(&mut self) -> bool {
        match self.screens.pop() {
            Some(screen) => {
                self.trash.park_screen(screen);
                self.root.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    /// Pops every screen into the trash.
    pub fn clear_screens(&mut self) {
        for screen in self.screens.clear() {
            self.trash.park_screen(screen);
        }
        self.root.needs_redraw = true;
    }

    /// Resizes every screen to the viewport and rebuilds it.
    pub fn rebuild_all(&mut self) {
        let viewport = self.settings.viewport;
        let ui = UiContext::new(&self.settings, &self.navigator, self.backend.ticks());
        for screen in self.screens.iter_mut() {
            screen.element_mut().set_size(viewport.width, viewport.height);
            screen.rebuild_ui(&ui);
            screen.element_mut().needs_redraw = true;
        }
        self.root.set_size(viewport.width, viewport.height);
        self.root.needs_redraw = true;
    }

    fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(op) = self.pending.try_next() {
            tracing::debug!("Applying deferred {:?}", op);
            match op {
                ScreenOp::Push(screen) => self.push_boxed(screen),
                ScreenOp::Pop => {
                    self.pop_screen();
                }
                ScreenOp::Clear => self.clear_screens(),
                ScreenOp::RebuildAll => self.rebuild_all(),
                ScreenOp::Quit => self.request_quit(),
            }
            applied += 1;
        }
        applied
    }

    // ---------------------------------------------------------------------
    // Passes
    // ---------------------------------------------------------------------

    /// Dispatches one event to the top screen, or to the root when no screen
    /// is shown. Returns true if the view changed.
    ///
    /// Screen operations queued during dispatch are applied before returning.
    pub fn process(&mut self, event: &InputEvents) -> bool {
        let now = self.backend.ticks();
        self.navigator.set_dispatching(true);

        let mut ctx = EventContext::new(event, &self.settings, &self.navigator, &mut self.trash)
            .at(now)
            .with_wheel(self.wheel.value());
        let changed = if self.screens.is_empty() {
            self.root.process(&mut ctx)
        } else {
            self.screens.process_top(&mut ctx)
        };
        if let Some(request) = ctx.take_request() {
            tracing::debug!("Ignoring {:?} from a top-level node", request);
        }
        let (cursor, rumble) = ctx.take_hints();

        self.navigator.set_dispatching(false);

        if let Some(cursor) = cursor {
            self.input.set_cursor(cursor);
        }
        if let Some(duration) = rumble {
            self.input.rumble(duration);
        }
        self.drain_pending() > 0 || changed
    }

    /// Paints every screen (or the root) and presents the frame.
    pub fn render(&mut self) {
        let now = self.backend.ticks();
        {
            let mut ctx = RenderContext::new(&mut self.backend, &self.settings, now);
            if self.screens.is_empty() {
                self.root.render(Some(&ParentFrame::ORIGIN), &mut ctx);
            } else {
                self.screens.render_all(&mut ctx);
            }
        }
        self.backend.present();
        self.frames_rendered += 1;
        self.drain_pending();
    }

    /// Runs one loop iteration. Returns true if a frame was rendered.
    pub fn run_frame(&mut self) -> bool {
        let frame_start = self.backend.ticks();

        let freed = self.trash.empty();
        if freed > 0 {
            tracing::debug!("Freed {} parked nodes", freed);
        }

        let mut changed = self.drain_pending() > 0;
        self.wheel.decay();

        let mut polled = false;
        while let Some(event) = self.input.poll() {
            polled = true;
            self.wheel.feed(&event);
            self.repeat.observe(&event);
            changed |= self.process(&event);

            if event.is_quit() || (self.config.exit_on_button && event.pressed(self.exit_buttons)) {
                self.request_quit();
            }
        }

        if !polled {
            if let Some(repeated) = self.repeat.tick() {
                changed |= self.process(&repeated);
            } else if !changed {
                changed = self.process(&InputEvents::noop());
            }
        }

        if changed {
            self.render();
            return true;
        }

        let elapsed = self.backend.ticks().saturating_sub(frame_start);
        if elapsed < self.config.frame_budget_ms {
            self.backend.delay(self.config.frame_budget_ms - elapsed);
        }
        false
    }

    /// Runs frames until quit is requested. Returns the number of frames rendered.
    pub fn main_loop(&mut self) -> u64 {
        while !self.quit_requested {
            self.run_frame();
        }
        tracing::info!("Main loop finished after {} frames", self.frames_rendered);
        self.frames_rendered
    }

    /// Asks the main loop to stop. Later requests are ignored.
    pub fn request_quit(&mut self) {
        if self.quit_requested {
            tracing::debug!("Quit already requested");
            return;
        }
        self.quit_requested = true;
        tracing::info!("Quit requested ({:?})", self.config.quit_action);
        if self.config.quit_action == QuitAction::HomeMenu {
            self.input.request_home_menu();
        }
    }

    // ---------------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------------

    /// Changes the logical resolution and rebuilds every screen.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] for a non-positive extent.
    pub fn set_resolution(&mut self, width: f32, height: f32) -> UiResult<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(UiError::InvalidResolution { width, height });
        }
        self.settings.viewport.width = width;
        self.settings.viewport.height = height;
        self.config.screen_width = width;
        self.config.screen_height = height;
        tracing::info!("Resolution changed to {}x{}, rebuilding {} screens", width, height, self.screens.len());
        self.rebuild_all();
        Ok(())
    }

    /// Changes the DPI scale and rebuilds every screen.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] for a non-positive scale.
    pub fn set_dpi_scale(&mut self, scale: f32) -> UiResult<()> {
        if scale <= 0.0 {
            return Err(UiError::InvalidConfig(format!("dpi_scale must be positive, got {scale}")));
        }
        self.settings.viewport.dpi_scale = scale;
        self.config.dpi_scale = scale;
        tracing::info!("DPI scale changed to {}, rebuilding {} screens", scale, self.screens.len());
        self.rebuild_all();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Appends a child to the fallback root.
    pub fn add(&mut self, child: impl Widget + 'static) -> usize {
        self.root.add(child)
    }

    /// Returns the fallback root.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the fallback root mutably.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Returns the top screen.
    #[must_use]
    pub fn top_screen(&self) -> Option<&dyn Screen> {
        self.screens.top()
    }

    /// Returns the top screen mutably.
    pub fn top_screen_mut(&mut self) -> Option<&mut (dyn Screen + 'static)> {
        self.screens.top_mut()
    }

    /// Returns the screen stack depth.
    #[must_use]
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Returns a navigator handle.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// Returns the runtime settings.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Returns the configuration the display runs with.
    #[must_use]
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Returns true once quit was requested.
    #[must_use]
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Returns the number of nodes waiting to be freed.
    #[must_use]
    pub fn trash_len(&self) -> usize {
        self.trash.len()
    }

    /// Returns the number of frames rendered.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Returns the drawing backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the drawing backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the input backend.
    #[must_use]
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Returns the input backend mutably.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
