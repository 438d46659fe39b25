//! Core element type and the widget trait.

use super::anchor::{Anchor, WeakAnchor};
use super::context::{EventContext, TreeRequest};
use crate::animation::Animation;
use crate::constraint::{Constraint, ConstraintFlags};
use crate::input::CursorKind;
use crate::layout::{Rect, Viewport};
use crate::render::{ParentFrame, RenderContext};
use crate::style::Color;
use std::fmt;
use std::mem;

/// Elastic counter levels, in increasing intensity.
pub mod highlight {
    /// No highlight.
    pub const NONE: u32 = 0;
    /// Faint highlight.
    pub const LIGHT: u32 = 100;
    /// Hover highlight.
    pub const THICK: u32 = 150;
    /// Pressed highlight.
    pub const DEEP: u32 = 200;
}

/// Margin between an element's bounds and its highlight chrome.
const HIGHLIGHT_MARGIN: f32 = 5.0;
/// Rumble length for the hover cue.
const HOVER_RUMBLE_MS: u32 = 200;

type Action = Box<dyn FnMut()>;
type EventAction = Box<dyn FnMut(&mut EventContext<'_>)>;

/// Anything that lives in the element tree.
///
/// A widget owns an [`Element`] and exposes it. The default pass
/// implementations forward to the element, so a widget only overrides what
/// it paints or handles differently.
pub trait Widget {
    /// Returns the underlying element.
    fn element(&self) -> &Element;

    /// Returns mutable access to the underlying element.
    fn element_mut(&mut self) -> &mut Element;

    /// Handles one input event. Returns true if the view changed.
    fn process(&mut self, ctx: &mut EventContext<'_>) -> bool {
        self.element_mut().process(ctx)
    }

    /// Positions and paints this widget and its subtree.
    fn render(&mut self, parent: Option<&ParentFrame>, ctx: &mut RenderContext<'_>) {
        self.element_mut().render(parent, ctx);
    }
}

/// A node in the UI tree.
///
/// Children are owned and painted in insertion order, so the last child
/// added paints on top. Dropping an element drops its whole subtree along
/// with its constraints and animations.
pub struct Element {
    /// X relative to the parent's content origin.
    pub x: f32,
    /// Y relative to the parent's content origin.
    pub y: f32,
    /// Unscaled width.
    pub width: f32,
    /// Unscaled height.
    pub height: f32,
    /// Rotation in degrees, honored by content that can rotate.
    pub angle: f32,
    /// Local scale, composed with the ancestors' scale.
    pub scale: f32,
    /// Hidden elements neither paint nor receive input, nor do their children.
    pub hidden: bool,
    /// Paint `background_color` behind the content.
    pub has_background: bool,
    /// Background color.
    pub background_color: Color,
    /// Multiplier applied to the background alpha.
    pub background_opacity: f32,
    /// Corner radius of the background; zero paints a plain rect.
    pub corner_radius: f32,
    /// Overlay painted over the content, under the children.
    pub mask_color: Option<Color>,
    /// Receives touch input and shows highlight chrome.
    pub touchable: bool,
    /// One-shot redraw request, consumed by the next process pass.
    pub needs_redraw: bool,
    /// Number of additional process passes that report a change.
    pub future_redraw_counter: u32,
    /// Position is absolute instead of relative to the parent.
    pub is_absolute: bool,

    x_abs: f32,
    y_abs: f32,
    effective_scale: f32,
    dragging: bool,
    elastic_counter: u32,
    last_mouse_x: f32,
    last_mouse_y: f32,
    constraint_offset: [f32; 2],
    constrained_at: Option<[f32; 2]>,

    children: Vec<Box<dyn Widget>>,
    constraints: Vec<Constraint>,
    animations: Vec<Animation<Element>>,
    anchor: Anchor,
    parent: Option<WeakAnchor>,
    action: Option<Action>,
    action_with_events: Option<EventAction>,
}

enum TouchUp {
    Idle(bool),
    Fired,
}

impl Element {
    /// Creates an empty element at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            scale: 1.0,
            hidden: false,
            has_background: false,
            background_color: Color::BLACK,
            background_opacity: 1.0,
            corner_radius: 0.0,
            mask_color: None,
            touchable: false,
            needs_redraw: true,
            future_redraw_counter: 0,
            is_absolute: false,
            x_abs: 0.0,
            y_abs: 0.0,
            effective_scale: 1.0,
            dragging: false,
            elastic_counter: highlight::NONE,
            last_mouse_x: 0.0,
            last_mouse_y: 0.0,
            constraint_offset: [0.0; 2],
            constrained_at: None,
            children: Vec::new(),
            constraints: Vec::new(),
            animations: Vec::new(),
            anchor: Anchor::new(),
            parent: None,
            action: None,
            action_with_events: None,
        }
    }

    // ---------------------------------------------------------------------
    // Builders
    // ---------------------------------------------------------------------

    /// Sets the relative position.
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(x, y);
        self
    }

    /// Sets the unscaled size.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_size(width, height);
        self
    }

    /// Sets the local scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Enables a background of the given color.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.has_background = true;
        self.background_color = color;
        self
    }

    /// Sets the background opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.background_opacity = opacity;
        self
    }

    /// Rounds the background corners.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Sets the color mask overlay.
    #[must_use]
    pub fn with_mask(mut self, color: Color) -> Self {
        self.mask_color = Some(color);
        self
    }

    /// Makes the element clickable with the given action.
    #[must_use]
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.set_action(action);
        self
    }

    /// Makes the element clickable with an action that sees the dispatch context.
    #[must_use]
    pub fn with_event_action(mut self, action: impl FnMut(&mut EventContext<'_>) + 'static) -> Self {
        self.set_event_action(action);
        self
    }

    /// Attaches a constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Widget + 'static) -> Self {
        self.add(child);
        self
    }

    /// Hides the element.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    /// Moves the element and forgets any offsets constraints applied so far.
    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.constrained_at = None;
        self.sync_anchor();
        self
    }

    /// Resizes the element.
    pub fn set_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.width = width;
        self.height = height;
        self.sync_anchor();
        self
    }

    /// Sets the click action and makes the element touchable.
    pub fn set_action(&mut self, action: impl FnMut() + 'static) -> &mut Self {
        self.action = Some(Box::new(action));
        self.touchable = true;
        self
    }

    /// Sets the context-aware click action and makes the element touchable.
    pub fn set_event_action(
        &mut self,
        action: impl FnMut(&mut EventContext<'_>) + 'static,
    ) -> &mut Self {
        self.action_with_events = Some(Box::new(action));
        self.touchable = true;
        self
    }

    /// Removes both click actions.
    pub fn clear_actions(&mut self) {
        self.action = None;
        self.action_with_events = None;
    }

    /// Marks the position as absolute.
    pub fn set_absolute(&mut self, absolute: bool) -> &mut Self {
        self.is_absolute = absolute;
        self
    }

    /// Hides the element and its subtree.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Shows the element again and requests a redraw.
    pub fn unhide(&mut self) {
        self.hidden = false;
        self.needs_redraw = true;
    }

    /// Centers horizontally within `parent`'s extent.
    pub fn center_horizontally_in(&mut self, parent: &Element) -> &mut Self {
        self.x = parent.width / 2.0 - self.width / 2.0;
        self.sync_anchor();
        self
    }

    /// Centers vertically within `parent`'s extent.
    pub fn center_vertically_in(&mut self, parent: &Element) -> &mut Self {
        self.y = parent.height / 2.0 - self.height / 2.0;
        self.sync_anchor();
        self
    }

    /// Centers within `parent`'s extent.
    pub fn center_in(&mut self, parent: &Element) -> &mut Self {
        self.center_horizontally_in(parent).center_vertically_in(parent)
    }

    // ---------------------------------------------------------------------
    // Constraints and animations
    // ---------------------------------------------------------------------

    /// Attaches a parent-relative constraint.
    pub fn constrain(&mut self, flags: ConstraintFlags, padding: i32) -> &mut Self {
        self.add_constraint(Constraint::new(flags).with_padding(padding))
    }

    /// Attaches a constraint. Later constraints win on the same axis.
    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns the attached constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Detaches every constraint.
    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
        self.constrained_at = None;
    }

    /// Starts an animation at tick `start` lasting `duration` ms.
    pub fn animate(
        &mut self,
        start: u64,
        duration: u64,
        on_step: impl FnMut(&mut Element, f32) + 'static,
        on_finish: impl FnOnce(&mut Element) + 'static,
    ) -> &mut Self {
        self.add_animation(
            Animation::new(start, duration)
                .on_step(on_step)
                .on_finish(on_finish),
        )
    }

    /// Attaches a prepared animation.
    pub fn add_animation(&mut self, animation: Animation<Element>) -> &mut Self {
        self.animations.push(animation);
        self
    }

    /// Returns the number of running animations.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Cancels every running animation without calling its finish callback.
    pub fn clear_animations(&mut self) {
        self.animations.clear();
    }

    // ---------------------------------------------------------------------
    // Tree
    // ---------------------------------------------------------------------

    /// Appends a child and returns its index.
    pub fn add(&mut self, child: impl Widget + 'static) -> usize {
        self.add_boxed(Box::new(child))
    }

    /// Appends a boxed child and returns its index.
    pub fn add_boxed(&mut self, mut child: Box<dyn Widget>) -> usize {
        let element = child.element_mut();
        element.parent = Some(self.anchor.downgrade());
        element.sync_anchor();
        self.children.push(child);
        self.needs_redraw = true;
        self.children.len() - 1
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&dyn Widget> {
        self.children.get(index).map(AsRef::as_ref)
    }

    /// Returns the child at `index` mutably.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn Widget + 'static)> {
        self.children.get_mut(index).map(AsMut::as_mut)
    }

    /// Iterates the children in paint order.
    pub fn children(&self) -> impl Iterator<Item = &dyn Widget> + '_ {
        self.children.iter().map(AsRef::as_ref)
    }

    /// Returns the number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Detaches and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Widget>> {
        if index >= self.children.len() {
            return None;
        }
        let mut child = self.children.remove(index);
        child.element_mut().parent = None;
        self.needs_redraw = true;
        Some(child)
    }

    /// Removes every child, constraint and animation.
    ///
    /// The children are returned so a caller inside a pass can park them in
    /// the trash instead of dropping them.
    pub fn remove_all(&mut self) -> Vec<Box<dyn Widget>> {
        self.constraints.clear();
        self.constrained_at = None;
        self.animations.clear();
        self.needs_redraw = true;
        let mut children = mem::take(&mut self.children);
        for child in &mut children {
            child.element_mut().parent = None;
        }
        children
    }

    /// Moves the child at `index` to the end so it paints last.
    pub fn move_to_front(&mut self, index: usize) {
        if index < self.children.len() {
            let child = self.children.remove(index);
            self.children.push(child);
            self.needs_redraw = true;
        }
    }

    // ---------------------------------------------------------------------
    // Placement
    // ---------------------------------------------------------------------

    /// Returns a handle other elements can target with constraints.
    #[must_use]
    pub fn anchor(&self) -> WeakAnchor {
        self.anchor.downgrade()
    }

    /// Republishes the current relative placement to the anchor.
    pub fn sync_anchor(&self) {
        self.anchor.publish(Rect::new(
            self.x,
            self.y,
            self.width * self.effective_scale,
            self.height * self.effective_scale,
        ));
    }

    /// Returns true while attached to a parent.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        self.parent.as_ref().is_some_and(WeakAnchor::is_alive)
    }

    pub(crate) fn parent_rect(&self) -> Option<Rect> {
        self.parent.as_ref().and_then(WeakAnchor::rect)
    }

    /// Absolute X as of the last position pass.
    #[must_use]
    pub fn x_abs(&self) -> f32 {
        self.x_abs
    }

    /// Absolute Y as of the last position pass.
    #[must_use]
    pub fn y_abs(&self) -> f32 {
        self.y_abs
    }

    /// Own scale composed with all ancestors', as of the last position pass.
    #[must_use]
    pub fn effective_scale(&self) -> f32 {
        self.effective_scale
    }

    /// Absolute bounds with the effective scale applied.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x_abs,
            self.y_abs,
            self.width * self.effective_scale,
            self.height * self.effective_scale,
        )
    }

    /// Current highlight intensity.
    #[must_use]
    pub fn elastic_counter(&self) -> u32 {
        self.elastic_counter
    }

    /// Returns true between a press inside the bounds and its release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Applies constraints, then derives the absolute position.
    ///
    /// The offsets added last time are taken back out first, unless `x`/`y`
    /// were written since (by an animation or by hand), in which case the
    /// written value is the new base.
    pub fn recalc_position(&mut self, parent: Option<&ParentFrame>, viewport: &Viewport) {
        let parent_scale = parent.map_or(1.0, |frame| frame.effective_scale);
        self.effective_scale = parent_scale * self.scale;

        if !self.constraints.is_empty() {
            self.undo_constraint_offset();

            let constraints = mem::take(&mut self.constraints);
            let mut offset = [0.0_f32; 2];
            for constraint in &constraints {
                let placement = constraint.apply(self, viewport);
                let axes = offset.iter_mut().zip(placement.aligned).zip(placement.offset);
                for ((total, aligned), added) in axes {
                    if aligned {
                        *total = 0.0;
                    }
                    *total += added;
                }
            }
            let mut added = mem::replace(&mut self.constraints, constraints);
            self.constraints.append(&mut added);

            self.constraint_offset = offset;
            self.constrained_at = Some([self.x, self.y]);
        }

        match parent {
            Some(frame) if !self.is_absolute => {
                self.x_abs = frame.x_abs + self.x;
                self.y_abs = frame.y_abs + self.y;
            }
            _ => {
                self.x_abs = self.x;
                self.y_abs = self.y;
            }
        }
        self.sync_anchor();
    }

    fn step_animations(&mut self, now: u64) {
        if self.animations.is_empty() {
            return;
        }
        self.needs_redraw = true;

        let mut animations = mem::take(&mut self.animations);
        let finished: Vec<usize> = animations
            .iter_mut()
            .enumerate()
            .filter_map(|(index, animation)| animation.step(now, self).then_some(index))
            .collect();
        for index in finished.into_iter().rev() {
            animations.remove(index);
        }
        // Callbacks may have started new animations on this element.
        animations.append(&mut self.animations);
        self.animations = animations;
    }

    // ---------------------------------------------------------------------
    // Render pass
    // ---------------------------------------------------------------------

    /// Positions and paints this element and its subtree.
    pub fn render(&mut self, parent: Option<&ParentFrame>, ctx: &mut RenderContext<'_>) {
        self.render_with(parent, ctx, |_, _| {});
    }

    /// Like [`Element::render`], painting `content` after the background and
    /// before the children.
    pub fn render_with<F>(&mut self, parent: Option<&ParentFrame>, ctx: &mut RenderContext<'_>, content: F)
    where
        F: FnOnce(&Element, &mut RenderContext<'_>),
    {
        if self.hidden {
            return;
        }

        let viewport = ctx.settings().viewport;
        self.recalc_position(parent, &viewport);
        self.step_animations(ctx.now());

        let bounds = self.bounds();
        if self.has_background {
            self.paint_background(bounds, ctx);
        } else if ctx.settings().debug {
            let color = ctx.random_color();
            ctx.outline_rect(bounds, color);
        }

        content(self, ctx);

        if let Some(mask) = self.mask_color {
            ctx.set_blend(true);
            ctx.fill_rect(bounds, mask);
        }

        let frame = ParentFrame {
            x_abs: self.x_abs,
            y_abs: self.y_abs,
            effective_scale: self.effective_scale,
        };
        for child in &mut self.children {
            child.render(Some(&frame), ctx);
        }

        if self.touchable {
            self.paint_highlight(bounds, ctx);
        }
    }

    fn undo_constraint_offset(&mut self) {
        let Some([x, y]) = self.constrained_at else {
            return;
        };
        if self.x.to_bits() == x.to_bits() {
            self.x -= self.constraint_offset[0];
        }
        if self.y.to_bits() == y.to_bits() {
            self.y -= self.constraint_offset[1];
        }
    }

    fn paint_background(&self, bounds: Rect, ctx: &mut RenderContext<'_>) {
        let color = self
            .background_color
            .with_alpha(self.background_color.a * self.background_opacity);
        ctx.set_blend(color.is_translucent());
        if self.corner_radius > 0.0 {
            ctx.fill_rounded_rect(bounds, self.corner_radius * self.effective_scale, color);
        } else {
            ctx.fill_rect(bounds, color);
        }
    }

    fn paint_highlight(&self, bounds: Rect, ctx: &mut RenderContext<'_>) {
        let level = self.elastic_counter;
        if level == highlight::NONE {
            return;
        }
        let outer = bounds.expand(HIGHLIGHT_MARGIN);

        if level > highlight::THICK {
            ctx.set_blend(true);
            ctx.fill_rect(outer, Color::HIGHLIGHT_GLOW);
        }

        if level == highlight::THICK || !ctx.settings().idle_cursor_pulsing {
            ctx.outline_rect(outer, Color::HIGHLIGHT);
            ctx.outline_rect(outer.shrink(1.0), Color::HIGHLIGHT);
            return;
        }

        // Triangle wave over two seconds: 0..=9 then back down.
        let phase = u8::try_from(ctx.now() / 100 % 20).unwrap_or(0);
        let pulse = if phase > 9 { 19 - phase } else { phase };
        let channel = 0xD9 - pulse;

        ctx.set_blend(true);
        for inset in -2_i8..=3 {
            let edge = if inset == 1 { 0 } else { u32::from(inset.unsigned_abs()) };
            let alpha = 0xFF_u32.saturating_sub(0x10 * u32::from(pulse) * edge);
            let alpha = u8::try_from(alpha).unwrap_or(u8::MAX);
            ctx.outline_rect(
                outer.shrink(f32::from(inset)),
                Color::from_rgba8(0x10, channel, channel, alpha),
            );
        }
    }

    // ---------------------------------------------------------------------
    // Input pass
    // ---------------------------------------------------------------------

    /// Handles one input event. Returns true if the view changed.
    ///
    /// When a click fires an action this returns immediately: the action may
    /// have queued structural changes that the owner applies next.
    pub fn process(&mut self, ctx: &mut EventContext<'_>) -> bool {
        if self.hidden {
            return false;
        }

        let mut changed = false;
        if self.touchable {
            changed |= self.on_touch_down(ctx);
            changed |= self.on_touch_drag(ctx);
            match self.on_touch_up(ctx) {
                TouchUp::Fired => return true,
                TouchUp::Idle(touched) => changed |= touched,
            }
        }

        changed |= self.process_children(ctx);
        changed |= mem::take(&mut self.needs_redraw);

        if self.future_redraw_counter > 0 {
            self.future_redraw_counter -= 1;
            changed = true;
        }

        if ctx.settings().idle_cursor_pulsing && self.elastic_counter > highlight::NONE {
            changed = true;
        }
        changed
    }

    fn process_children(&mut self, ctx: &mut EventContext<'_>) -> bool {
        let mut changed = false;
        let mut index = 0;
        while index < self.children.len() {
            let count = self.children.len();
            let Some(child) = self.children.get_mut(index) else {
                break;
            };
            changed |= child.process(ctx);

            if let Some(request) = ctx.take_request() {
                self.apply_request(index, request, ctx);
                changed = true;
                break;
            }
            if self.children.len() != count {
                break;
            }
            index += 1;
        }
        changed
    }

    fn apply_request(&mut self, index: usize, request: TreeRequest, ctx: &mut EventContext<'_>) {
        match request {
            TreeRequest::Detach => {
                if let Some(child) = self.remove(index) {
                    ctx.park(child);
                }
            }
            TreeRequest::MoveToFront => self.move_to_front(index),
        }
    }

    fn on_touch_down(&mut self, ctx: &mut EventContext<'_>) -> bool {
        let event = ctx.event();
        if !event.is_touch_down() || !event.touch_in(&self.bounds()) {
            return false;
        }

        self.dragging = true;
        self.last_mouse_x = event.x;
        self.last_mouse_y = event.y;
        self.elastic_counter = highlight::DEEP;
        true
    }

    fn on_touch_drag(&mut self, ctx: &mut EventContext<'_>) -> bool {
        let event = *ctx.event();
        if !event.is_touch_drag() {
            return false;
        }

        let mut changed = false;
        if self.elastic_counter != highlight::DEEP {
            if event.touch_in(&self.bounds()) {
                self.elastic_counter = highlight::THICK;
                ctx.rumble(HOVER_RUMBLE_MS);
                ctx.set_cursor(CursorKind::Hand);
                changed = true;
            } else if self.elastic_counter != highlight::NONE {
                self.elastic_counter = highlight::NONE;
                ctx.set_cursor(CursorKind::Arrow);
                changed = true;
            }
        }

        let threshold = ctx.settings().drag_threshold_px();
        if self.dragging
            && ((event.x - self.last_mouse_x).abs() >= threshold
                || (event.y - self.last_mouse_y).abs() >= threshold)
        {
            changed |= self.elastic_counter > highlight::NONE;
            self.elastic_counter = highlight::NONE;
        }
        changed
    }

    fn on_touch_up(&mut self, ctx: &mut EventContext<'_>) -> TouchUp {
        if !ctx.event().is_touch_up() {
            return TouchUp::Idle(false);
        }

        let clicked = self.dragging
            && ctx.event().touch_in(&self.bounds())
            && self.elastic_counter > highlight::NONE;
        let was_highlighted = self.elastic_counter > highlight::NONE;

        self.dragging = false;
        self.elastic_counter = highlight::NONE;

        if clicked && (self.action.is_some() || self.action_with_events.is_some()) {
            if let Some(action) = self.action.as_mut() {
                action();
            }
            if let Some(action) = self.action_with_events.as_mut() {
                action(ctx);
            }
            return TouchUp::Fired;
        }
        TouchUp::Idle(was_highlighted)
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Element {
    fn element(&self) -> &Element {
        self
    }

    fn element_mut(&mut self) -> &mut Element {
        self
    }

    fn process(&mut self, ctx: &mut EventContext<'_>) -> bool {
        Element::process(self, ctx)
    }

    fn render(&mut self, parent: Option<&ParentFrame>, ctx: &mut RenderContext<'_>) {
        Element::render(self, parent, ctx);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("hidden", &self.hidden)
            .field("touchable", &self.touchable)
            .field("elastic_counter", &self.elastic_counter)
            .field("children", &self.children.len())
            .field("constraints", &self.constraints.len())
            .field("animations", &self.animations.len())
            .finish_non_exhaustive()
    }
}
