//! The mutable core of one puzzle piece: its shape, placement, pivot,
//! and cumulative orientation counters.

use crate::geometry::{Axis, Coord};
use crate::shape::Shape;

/// Identity tag used by the renderer to recolor a piece's sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTag {
    Blue,
    Green,
    Red,
    Purple,
}

/// Owns a piece's shape and placement. Exactly one transform chain owns
/// each core; all mutation flows through that chain.
///
/// `position` names the world cell the fixture point is pinned to, so the
/// world-space top-left of the shape is `position - fixture_point`.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceCore {
    shape: Shape,
    position: Coord,
    fixture_point: Coord,
    color: ColorTag,
    template: String,
    rotations: u8,
    x_flipped: bool,
    y_flipped: bool,
}

impl PieceCore {
    pub fn new(
        shape: Shape,
        position: Coord,
        fixture_point: Coord,
        color: ColorTag,
        template: impl Into<String>,
    ) -> Self {
        Self {
            shape,
            position,
            fixture_point,
            color,
            template: template.into(),
            rotations: 0,
            x_flipped: false,
            y_flipped: false,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Replaces the occupancy grid; the occupied-cell list is rebuilt by
    /// the shape itself.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub fn fixture_point(&self) -> Coord {
        self.fixture_point
    }

    pub fn set_fixture_point(&mut self, fixture_point: Coord) {
        self.fixture_point = fixture_point;
    }

    /// World-space top-left of the shape grid, the single source of truth
    /// for the piece's placement.
    pub fn offset(&self) -> Coord {
        Coord::new(
            self.position.x - self.fixture_point.x,
            self.position.y - self.fixture_point.y,
        )
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Quarter turns accumulated so far, modulo 4. Bookkeeping for the
    /// renderer's sprite orientation, not consulted by the geometry.
    pub fn rotations(&self) -> u8 {
        self.rotations
    }

    pub fn x_flipped(&self) -> bool {
        self.x_flipped
    }

    pub fn y_flipped(&self) -> bool {
        self.y_flipped
    }

    pub fn add_rotation(&mut self, clockwise: bool) {
        self.rotations = (self.rotations + if clockwise { 1 } else { 3 }) % 4;
    }

    pub fn add_flip(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.x_flipped = !self.x_flipped,
            Axis::Y => self.y_flipped = !self.y_flipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domino_at(position: Coord, fixture: Coord) -> PieceCore {
        let shape = Shape::from_pattern(&["11"]).unwrap();
        PieceCore::new(shape, position, fixture, ColorTag::Blue, "domino")
    }

    #[test]
    fn test_offset_subtracts_fixture_point() {
        let core = domino_at(Coord::new(3, 4), Coord::new(1, 0));
        assert_eq!(core.offset(), Coord::new(2, 4));
    }

    #[test]
    fn test_rotation_counter_wraps() {
        let mut core = domino_at(Coord::new(0, 0), Coord::new(0, 0));
        core.add_rotation(true);
        assert_eq!(core.rotations(), 1);
        core.add_rotation(false);
        assert_eq!(core.rotations(), 0, "ccw undoes cw modulo 4");
        core.add_rotation(false);
        assert_eq!(core.rotations(), 3);
    }

    #[test]
    fn test_flip_flags_toggle_independently() {
        let mut core = domino_at(Coord::new(0, 0), Coord::new(0, 0));
        core.add_flip(Axis::X);
        assert!(core.x_flipped() && !core.y_flipped());
        core.add_flip(Axis::Y);
        assert!(core.x_flipped() && core.y_flipped());
        core.add_flip(Axis::X);
        assert!(!core.x_flipped());
    }
}
