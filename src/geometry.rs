//! 2D grid geometry: coordinates, compass directions, and the shape-space
//! point algebra used when a piece rotates or mirrors.
//!
//! Shape-space is the local coordinate system of a piece's occupancy grid:
//! x grows to the east (columns), y grows to the south (rows). Rotating or
//! mirroring a W x H grid moves every cell, so the helpers here take the
//! pre-transform dimensions explicitly.

use std::fmt;

/// An integer 2D point with structural equality.
///
/// Used both for world coordinates (arena cells) and shape-space
/// coordinates (cells of a piece's occupancy grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four compass directions, in mask-bit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit position of this direction in a [`DirectionSet`].
    pub const fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// One-cell step in world coordinates (north is y - 1).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// A mirror axis.
///
/// `X` is the horizontal mirror line (top and bottom rows swap), `Y` the
/// vertical mirror line (left and right columns swap).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// A quarter turn swaps the meaning of the two mirror axes.
    pub const fn toggled(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A set of allowed directions, packed into the low four bits of a byte
/// in N, E, S, W order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const ALL: Self = Self(0b1111);

    pub fn from_flags(flags: [bool; 4]) -> Self {
        let mut bits = 0u8;
        for (i, &set) in flags.iter().enumerate() {
            if set {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    pub fn single(direction: Direction) -> Self {
        Self(1 << direction.index())
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    /// Cyclic shift by one quarter turn: N -> E -> S -> W -> N when
    /// clockwise, the reverse otherwise. The whole mask is permuted at
    /// once, so opposite-direction pairs survive intact.
    pub fn rotated(self, clockwise: bool) -> Self {
        let bits = self.0;
        if clockwise {
            Self(((bits << 1) | (bits >> 3)) & 0b1111)
        } else {
            Self(((bits >> 1) | (bits << 3)) & 0b1111)
        }
    }

    /// Mirror across an axis: `X` swaps the north and south bits, `Y`
    /// swaps east and west.
    pub fn mirrored(self, axis: Axis) -> Self {
        let bits = self.0;
        let (a, b) = match axis {
            Axis::X => (Direction::North.index(), Direction::South.index()),
            Axis::Y => (Direction::East.index(), Direction::West.index()),
        };
        let mut out = bits & !((1 << a) | (1 << b));
        if bits & (1 << a) != 0 {
            out |= 1 << b;
        }
        if bits & (1 << b) != 0 {
            out |= 1 << a;
        }
        Self(out)
    }
}

/// Rotates a shape-space point by one quarter turn.
///
/// `width` and `height` are the grid dimensions *before* the turn. The
/// returned point is expressed in the rotated grid (dimensions swapped).
pub fn rotate_point(p: Coord, width: i32, height: i32, clockwise: bool) -> Coord {
    if clockwise {
        Coord::new(height - 1 - p.y, p.x)
    } else {
        Coord::new(p.y, width - 1 - p.x)
    }
}

/// Mirrors a shape-space point across an axis of a `width` x `height` grid.
pub fn mirror_point(p: Coord, width: i32, height: i32, axis: Axis) -> Coord {
    match axis {
        Axis::X => Coord::new(p.x, height - 1 - p.y),
        Axis::Y => Coord::new(width - 1 - p.x, p.y),
    }
}

/// Logical size of one grid cell for sub-cell cursor positions.
pub const CELL_SPAN: i32 = 100;

/// A cursor position within a single grid cell, in `0..CELL_SPAN` units.
///
/// The input layer produces one of these from the pixel position of a
/// click inside the clicked cell; translation nodes use it to pick a
/// compass direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
}

impl Pointer {
    /// Dead center of the cell: maps to no direction.
    pub const fn center() -> Self {
        Self {
            x: CELL_SPAN / 2,
            y: CELL_SPAN / 2,
        }
    }

    /// A pointer at the midpoint of the cell edge facing `direction`.
    pub const fn toward(direction: Direction) -> Self {
        match direction {
            Direction::North => Self { x: CELL_SPAN / 2, y: 0 },
            Direction::East => Self { x: CELL_SPAN - 1, y: CELL_SPAN / 2 },
            Direction::South => Self { x: CELL_SPAN / 2, y: CELL_SPAN - 1 },
            Direction::West => Self { x: 0, y: CELL_SPAN / 2 },
        }
    }

    /// Maps the quadrant nearest a cell edge to that edge's direction.
    ///
    /// Checked in west, north, east, south order; the center region maps
    /// to `None` and the caller keeps its previous direction.
    pub fn direction_hint(self) -> Option<Direction> {
        let margin = CELL_SPAN / 4;
        if self.x < margin {
            Some(Direction::West)
        } else if self.y < margin {
            Some(Direction::North)
        } else if self.x > CELL_SPAN - margin {
            Some(Direction::East)
        } else if self.y > CELL_SPAN - margin {
            Some(Direction::South)
        } else {
            None
        }
    }
}
