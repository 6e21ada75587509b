//! Geometry primitives: [`Position`] and [`Direction`].
//!
//! The grid uses offset coordinates: odd rows are shifted half a cell to the
//! right of even rows, so the pixel-space neighbors of a cell depend on the
//! parity of its row. Every [`Direction`] therefore carries two delta pairs,
//! one per row parity.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D integer grid position. X grows right, Y grows down.
///
/// The derived ordering is lexicographic by `x` then `y`, which is the
/// tie-break the search open lists use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring position in the given direction, honoring the
    /// row-parity-dependent deltas of the offset grid.
    #[inline]
    pub const fn adjacent(self, dir: Direction) -> Self {
        let (dx, dy) = if self.y & 1 == 1 {
            dir.odd_delta()
        } else {
            dir.even_delta()
        };
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the position lies inside a `width` x `height` grid.
    #[inline]
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        is_valid(self.x, self.y, width, height)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Whether `(x, y)` lies inside a `width` x `height` grid.
#[inline]
pub const fn is_valid(x: i32, y: i32, width: i32, height: i32) -> bool {
    x >= 0 && x < width && y >= 0 && y < height
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight neighbor directions on the offset grid, clockwise from
/// north.
///
/// `N` and `S` span two rows (the cells directly above/below are two row
/// indices away); the diagonal directions move one row and shift column
/// depending on row parity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All eight directions in fixed clockwise order, `N` first.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The alternating half of [`Direction::ALL`] (indices 1, 3, 5, 7):
    /// the four directions that move exactly one row.
    pub const BORDERS: [Direction; 4] = [
        Direction::NE,
        Direction::SE,
        Direction::SW,
        Direction::NW,
    ];

    /// Delta applied from an odd row.
    #[inline]
    pub const fn odd_delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -2),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 2),
            Direction::SW => (0, 1),
            Direction::W => (-1, 0),
            Direction::NW => (0, -1),
        }
    }

    /// Delta applied from an even row.
    #[inline]
    pub const fn even_delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -2),
            Direction::NE => (0, -1),
            Direction::E => (1, 0),
            Direction::SE => (0, 1),
            Direction::S => (0, 2),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// The opposite direction. `adjacent(p, d).adjacent(d.reverse()) == p`
    /// for every position.
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Distance
// ---------------------------------------------------------------------------

/// Closed-form step distance between two positions on the offset grid.
///
/// Equals the minimum number of [`Position::adjacent`] steps from `a` to
/// `b`, which makes it an admissible A* heuristic. Symmetric, and zero iff
/// `a == b`. The `/ 2` truncates toward zero, and the parity corrections
/// account for the half-cell shift between odd and even rows.
#[inline]
pub const fn distance(a: Position, b: Position) -> i32 {
    let mut r = b.x - a.x - (a.y - b.y) / 2;
    if b.y > a.y && a.y % 2 == 0 && b.y % 2 != 0 {
        r += 1;
    } else if b.y < a.y && a.y % 2 != 0 && b.y % 2 == 0 {
        r -= 1;
    }
    let d = (a.y - b.y + r).abs();
    if d > r.abs() { d } else { r.abs() }
}
