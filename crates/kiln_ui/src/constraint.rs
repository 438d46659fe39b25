//! Declarative relative positioning.
//!
//! A [`Constraint`] is owned by one element and reapplied every time that
//! element's position is recalculated. It positions the element against the
//! first live explicit target, else against its parent's content box, else
//! against the logical viewport.
//!
//! Geometry is scaled by the element's effective scale before use, so the
//! same constraint lays out identically at any DPI.

use crate::element::{Element, WeakAnchor};
use crate::layout::Viewport;
use std::ops::{BitOr, BitOrAssign};

/// Positioning flags (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstraintFlags(u32);

impl ConstraintFlags {
    /// No positioning.
    pub const NONE: Self = Self(0);
    /// Align to the left edge, or sit left of an explicit target.
    pub const ALIGN_LEFT: Self = Self(0x01);
    /// Align to the right edge, or sit right of an explicit target.
    pub const ALIGN_RIGHT: Self = Self(0x02);
    /// Align to the top edge, or sit above an explicit target.
    pub const ALIGN_TOP: Self = Self(0x04);
    /// Align to the bottom edge, or sit below an explicit target.
    pub const ALIGN_BOTTOM: Self = Self(0x08);
    /// Center horizontally.
    pub const CENTER_HORIZONTAL: Self = Self(0x10);
    /// Center vertically.
    pub const CENTER_VERTICAL: Self = Self(0x20);
    /// Center on both axes.
    pub const CENTER_BOTH: Self = Self(0x30);
    /// Shift right by the padding.
    pub const OFFSET_LEFT: Self = Self(0x40);
    /// Shift left by the padding.
    pub const OFFSET_RIGHT: Self = Self(0x80);
    /// Shift down by the padding.
    pub const OFFSET_TOP: Self = Self(0x100);
    /// Shift up by the padding.
    pub const OFFSET_BOTTOM: Self = Self(0x200);
    /// All four offsets.
    pub const OFFSET_ALL: Self = Self(0x3C0);

    /// Returns the raw mask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ConstraintFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ConstraintFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// What a constraint resolves against.
#[derive(Debug, Clone, Copy)]
struct Target {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    explicit: bool,
}

/// What one application of a constraint did, per axis (x, y).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    /// The axis was recomputed from the target, discarding the old position.
    pub aligned: [bool; 2],
    /// Scaled offset added after alignment.
    pub offset: [f32; 2],
}

/// A positioning rule attached to one element.
#[derive(Debug, Clone, Default)]
pub struct Constraint {
    flags: ConstraintFlags,
    padding: i32,
    targets: Vec<WeakAnchor>,
}

impl Constraint {
    /// Creates a constraint relative to the parent.
    #[must_use]
    pub fn new(flags: ConstraintFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Sets the padding (logical pixels, before scaling).
    #[must_use]
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Adds an explicit target. The first one still alive is used.
    #[must_use]
    pub fn with_target(mut self, target: WeakAnchor) -> Self {
        self.targets.push(target);
        self
    }

    /// Returns the flags.
    #[must_use]
    pub fn flags(&self) -> ConstraintFlags {
        self.flags
    }

    /// Returns the padding.
    #[must_use]
    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Adds flags.
    pub fn add_flags(&mut self, flags: ConstraintFlags) {
        self.flags |= flags;
    }

    /// Removes every flag.
    pub fn clear_flags(&mut self) {
        self.flags = ConstraintFlags::NONE;
    }

    /// Adds an explicit target.
    pub fn add_target(&mut self, target: WeakAnchor) {
        self.targets.push(target);
    }

    /// Removes every explicit target, falling back to the parent.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    fn resolve(&self, element: &Element, viewport: &Viewport) -> Target {
        if let Some(rect) = self.targets.iter().find_map(WeakAnchor::rect) {
            return Target {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                explicit: true,
            };
        }
        let (width, height) = element
            .parent_rect()
            .map_or((viewport.width, viewport.height), |rect| (rect.width, rect.height));
        Target {
            x: 0.0,
            y: 0.0,
            width,
            height,
            explicit: false,
        }
    }

    /// Repositions `element` according to this constraint.
    ///
    /// Offsets are added to whatever position the element currently holds.
    /// An element reapplying its own constraints every frame takes the
    /// previous offset back out first (see [`Element::recalc_position`]), so
    /// the result does not drift.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&self, element: &mut Element, viewport: &Viewport) -> Placement {
        let scale = element.effective_scale();
        let pad = self.padding as f32 * scale;
        let width = element.width * scale;
        let height = element.height * scale;
        let target = self.resolve(element, viewport);
        let flags = self.flags;

        let mut aligned_x = false;
        let mut aligned_y = false;

        if flags.contains(ConstraintFlags::ALIGN_LEFT) {
            element.x = if target.explicit {
                target.x - width - pad
            } else {
                target.x + pad
            };
            aligned_x = true;
        }
        if flags.contains(ConstraintFlags::ALIGN_RIGHT) {
            element.x = if target.explicit {
                target.x + target.width + pad
            } else {
                target.x + target.width - width - pad
            };
            aligned_x = true;
        }
        if flags.contains(ConstraintFlags::ALIGN_TOP) {
            element.y = if target.explicit {
                target.y - height - pad
            } else {
                target.y + pad
            };
            aligned_y = true;
        }
        if flags.contains(ConstraintFlags::ALIGN_BOTTOM) {
            element.y = if target.explicit {
                target.y + target.height + pad
            } else {
                target.y + target.height - height - pad
            };
            aligned_y = true;
        }

        if flags.contains(ConstraintFlags::CENTER_HORIZONTAL) {
            element.x = target.x + (target.width - width) / 2.0;
            aligned_x = true;
        }
        if flags.contains(ConstraintFlags::CENTER_VERTICAL) {
            element.y = target.y + (target.height - height) / 2.0;
            aligned_y = true;
        }

        let mut offset = [0.0_f32; 2];
        if flags.contains(ConstraintFlags::OFFSET_LEFT) {
            offset[0] += pad;
        }
        if flags.contains(ConstraintFlags::OFFSET_RIGHT) {
            offset[0] -= pad;
        }
        if flags.contains(ConstraintFlags::OFFSET_TOP) {
            offset[1] += pad;
        }
        if flags.contains(ConstraintFlags::OFFSET_BOTTOM) {
            offset[1] -= pad;
        }

        element.x += offset[0];
        element.y += offset[1];
        Placement {
            aligned: [aligned_x, aligned_y],
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(width: f32, height: f32) -> Element {
        Element::new().with_size(width, height)
    }

    fn apply_first(parent: &mut Element, index: usize) {
        let viewport = Viewport::default();
        if let Some(child) = parent.child_mut(index) {
            child.element_mut().recalc_position(None, &viewport);
        }
    }

    #[test]
    fn test_center_both_in_parent() {
        let mut root = parent(200.0, 100.0);
        root.add(
            Element::new()
                .with_size(80.0, 30.0)
                .with_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH)),
        );
        apply_first(&mut root, 0);

        let child = root.child(0).map(|c| (c.element().x, c.element().y));
        assert_eq!(child, Some((60.0, 35.0)));
    }

    #[test]
    fn test_edges_against_parent() {
        let mut root = parent(200.0, 100.0);
        root.add(
            Element::new().with_size(20.0, 10.0).with_constraint(
                Constraint::new(ConstraintFlags::ALIGN_RIGHT | ConstraintFlags::ALIGN_BOTTOM)
                    .with_padding(5),
            ),
        );
        apply_first(&mut root, 0);

        let child = root.child(0).map(|c| (c.element().x, c.element().y));
        assert_eq!(child, Some((175.0, 85.0)));
    }

    #[test]
    fn test_no_parent_uses_viewport() {
        let viewport = Viewport::new(400.0, 240.0);
        let mut element = Element::new().with_size(100.0, 40.0);
        Constraint::new(ConstraintFlags::CENTER_BOTH).apply(&mut element, &viewport);

        assert!((element.x - 150.0).abs() < f32::EPSILON);
        assert!((element.y - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_explicit_target_right_of_and_above() {
        let viewport = Viewport::default();
        let target = Element::new().with_position(100.0, 50.0).with_size(40.0, 20.0);

        let mut right_of = Element::new().with_size(30.0, 10.0);
        Constraint::new(ConstraintFlags::ALIGN_RIGHT)
            .with_padding(4)
            .with_target(target.anchor())
            .apply(&mut right_of, &viewport);
        assert!((right_of.x - 144.0).abs() < f32::EPSILON);

        let mut above = Element::new().with_size(30.0, 10.0);
        Constraint::new(ConstraintFlags::ALIGN_TOP)
            .with_padding(4)
            .with_target(target.anchor())
            .apply(&mut above, &viewport);
        assert!((above.y - 36.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dead_target_falls_back_to_viewport() {
        let viewport = Viewport::new(100.0, 100.0);
        let target = Element::new().with_position(10.0, 10.0).with_size(5.0, 5.0);
        let weak = target.anchor();
        drop(target);

        let mut element = Element::new().with_size(10.0, 10.0);
        Constraint::new(ConstraintFlags::ALIGN_LEFT)
            .with_padding(3)
            .with_target(weak)
            .apply(&mut element, &viewport);
        assert!((element.x - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let viewport = Viewport::new(300.0, 300.0);
        let mut element = Element::new()
            .with_position(10.0, 10.0)
            .with_size(50.0, 50.0)
            .with_constraint(
                Constraint::new(ConstraintFlags::CENTER_HORIZONTAL | ConstraintFlags::OFFSET_TOP)
                    .with_padding(8),
            );

        element.recalc_position(None, &viewport);
        let first = (element.x, element.y);
        element.recalc_position(None, &viewport);
        element.recalc_position(None, &viewport);

        assert_eq!((element.x, element.y), first);
        assert_eq!(first, (125.0, 18.0));
    }

    #[test]
    fn test_stacked_offsets_do_not_drift() {
        let viewport = Viewport::new(300.0, 300.0);
        let mut element = Element::new()
            .with_position(20.0, 20.0)
            .with_size(10.0, 10.0)
            .with_constraint(Constraint::new(ConstraintFlags::OFFSET_LEFT).with_padding(5))
            .with_constraint(Constraint::new(ConstraintFlags::OFFSET_TOP).with_padding(7));

        for _ in 0..4 {
            element.recalc_position(None, &viewport);
        }
        assert_eq!((element.x, element.y), (25.0, 27.0));
    }

    #[test]
    fn test_offset_survives_animated_position() {
        let viewport = Viewport::new(300.0, 300.0);
        let mut root = parent(300.0, 300.0);
        let mut child = Element::new()
            .with_size(10.0, 10.0)
            .with_constraint(Constraint::new(ConstraintFlags::OFFSET_LEFT).with_padding(10));
        child.animate(0, 1000, |element, _| element.x = 100.0, |_| {});
        root.add(child);

        let mut backend = crate::render::RecordingBackend::new(300.0, 300.0);
        let settings = crate::config::DisplaySettings::new(viewport);
        let mut x_abs = Vec::new();
        for now in [0, 16, 32] {
            let mut ctx = crate::render::RenderContext::new(&mut backend, &settings, now);
            root.render(Some(&crate::render::ParentFrame::ORIGIN), &mut ctx);
            x_abs.push(root.child(0).map(|c| c.element().x_abs()));
        }

        assert_eq!(x_abs, [Some(10.0), Some(110.0), Some(110.0)]);
    }

    #[test]
    fn test_offset_reapplies_after_field_write() {
        let viewport = Viewport::new(300.0, 300.0);
        let mut element = Element::new()
            .with_size(10.0, 10.0)
            .with_constraint(Constraint::new(ConstraintFlags::OFFSET_TOP).with_padding(20));
        element.recalc_position(None, &viewport);
        assert_eq!(element.y_abs(), 20.0);

        element.y = 50.0;
        element.recalc_position(None, &viewport);
        assert_eq!(element.y_abs(), 70.0);

        element.recalc_position(None, &viewport);
        assert_eq!(element.y_abs(), 70.0);
    }

    #[test]
    fn test_padding_follows_effective_scale() {
        let viewport = Viewport::new(200.0, 200.0);
        let mut element = Element::new().with_size(10.0, 10.0).with_scale(2.0);
        element.recalc_position(None, &viewport);
        let placement = Constraint::new(ConstraintFlags::ALIGN_RIGHT)
            .with_padding(5)
            .apply(&mut element, &viewport);

        // 200 - 10*2 - 5*2
        assert!((element.x - 170.0).abs() < f32::EPSILON);
        assert_eq!(placement.aligned, [true, false]);
    }

    #[test]
    fn test_flag_helpers() {
        let flags = ConstraintFlags::CENTER_BOTH;
        assert!(flags.contains(ConstraintFlags::CENTER_HORIZONTAL));
        assert!(!flags.contains(ConstraintFlags::ALIGN_LEFT));
        assert_eq!(ConstraintFlags::OFFSET_ALL.bits(), 0x3C0);
        assert!(ConstraintFlags::NONE.is_empty());
    }
}
