//! Row and column stacking.

use super::core::{Element, Widget};
use crate::layout::Direction;

/// Lays children out one after another, growing to fit them.
///
/// Positions are assigned when a child is added; later changes to a child's
/// size do not reflow its siblings.
#[derive(Debug)]
pub struct Container {
    element: Element,
    direction: Direction,
    spacing: f32,
}

impl Container {
    /// Default gap between children.
    pub const DEFAULT_SPACING: f32 = 10.0;

    /// Creates an empty container stacking in `direction`.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            element: Element::new(),
            direction,
            spacing: Self::DEFAULT_SPACING,
        }
    }

    /// Creates a horizontal container.
    #[must_use]
    pub fn row() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Creates a vertical container.
    #[must_use]
    pub fn column() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Sets the gap between children.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns the stacking direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Places `child` after the last one and grows to fit. Returns its index.
    pub fn add(&mut self, mut child: impl Widget + 'static) -> usize {
        let first = self.element.child_count() == 0;
        let (width, height) = {
            let inner = child.element();
            (inner.width * inner.scale, inner.height * inner.scale)
        };
        let gap = if first { 0.0 } else { self.spacing };

        match self.direction {
            Direction::Horizontal => {
                let x = self.element.width + gap;
                child.element_mut().set_position(x, 0.0);
                self.element.width = x + width;
                self.element.height = self.element.height.max(height);
            }
            Direction::Vertical => {
                let y = self.element.height + gap;
                child.element_mut().set_position(0.0, y);
                self.element.height = y + height;
                self.element.width = self.element.width.max(width);
            }
        }
        self.element.sync_anchor();
        self.element.add(child)
    }

    /// Builder form of [`Container::add`].
    #[must_use]
    pub fn with(mut self, child: impl Widget + 'static) -> Self {
        self.add(child);
        self
    }
}

impl Widget for Container {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(width: f32, height: f32) -> Element {
        Element::new().with_size(width, height)
    }

    fn positions(container: &Container) -> Vec<(f32, f32)> {
        container
            .element()
            .children()
            .map(|child| (child.element().x, child.element().y))
            .collect()
    }

    #[test]
    fn test_row_layout() {
        let row = Container::row()
            .with(block(30.0, 10.0))
            .with(block(20.0, 25.0))
            .with(block(10.0, 5.0));

        assert_eq!(positions(&row), vec![(0.0, 0.0), (40.0, 0.0), (70.0, 0.0)]);
        assert!((row.element().width - 80.0).abs() < f32::EPSILON);
        assert!((row.element().height - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_column_layout_with_spacing() {
        let column = Container::column()
            .with_spacing(4.0)
            .with(block(30.0, 10.0))
            .with(block(50.0, 10.0));

        assert_eq!(positions(&column), vec![(0.0, 0.0), (0.0, 14.0)]);
        assert!((column.element().width - 50.0).abs() < f32::EPSILON);
        assert!((column.element().height - 24.0).abs() < f32::EPSILON);
        assert_eq!(column.direction(), Direction::Vertical);
    }
}
