//! Position iterators: whole-grid scan, single-ring adjacency, alternating
//! border adjacency, and the expanding circle walk used for spiral and
//! flood-fill queries.
//!
//! All iterators hold only the grid dimensions, never a borrow of the tiles,
//! so they can outlive any particular `Map` access.

use crate::geom::{Direction, Position, is_valid};

// ---------------------------------------------------------------------------
// WholeGrid
// ---------------------------------------------------------------------------

/// Row-major iterator over every position of a `width` x `height` grid.
#[derive(Clone, Debug)]
pub struct WholeGrid {
    width: i32,
    height: i32,
    cur: Position,
}

impl WholeGrid {
    /// Iterate all positions of a `width` x `height` grid.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cur: Position::ZERO,
        }
    }
}

impl Iterator for WholeGrid {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.cur.y >= self.height || self.width <= 0 {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.width {
            self.cur.x = 0;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cur.y >= self.height || self.width <= 0 {
            return (0, Some(0));
        }
        let in_row = (self.width - self.cur.x) as usize;
        let rows_left = (self.height - self.cur.y - 1) as usize;
        let total = in_row + rows_left * self.width as usize;
        (total, Some(total))
    }
}

impl ExactSizeIterator for WholeGrid {}

// ---------------------------------------------------------------------------
// Adjacent / BorderAdjacent
// ---------------------------------------------------------------------------

/// The in-bounds neighbors of a center position, yielded in the fixed
/// clockwise `N..NW` direction order.
#[derive(Clone, Debug)]
pub struct Adjacent {
    center: Position,
    width: i32,
    height: i32,
    i: usize,
}

impl Adjacent {
    /// Neighbors of `center` within a `width` x `height` grid.
    #[inline]
    pub fn new(center: Position, width: i32, height: i32) -> Self {
        Self {
            center,
            width,
            height,
            i: 0,
        }
    }
}

impl Iterator for Adjacent {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.i < Direction::ALL.len() {
            let p = self.center.adjacent(Direction::ALL[self.i]);
            self.i += 1;
            if is_valid(p.x, p.y, self.width, self.height) {
                return Some(p);
            }
        }
        None
    }
}

/// Like [`Adjacent`], but only every other direction starting from index 1
/// of the fixed order: `NE`, `SE`, `SW`, `NW`.
#[derive(Clone, Debug)]
pub struct BorderAdjacent {
    center: Position,
    width: i32,
    height: i32,
    i: usize,
}

impl BorderAdjacent {
    /// Border neighbors of `center` within a `width` x `height` grid.
    #[inline]
    pub fn new(center: Position, width: i32, height: i32) -> Self {
        Self {
            center,
            width,
            height,
            i: 0,
        }
    }
}

impl Iterator for BorderAdjacent {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.i < Direction::BORDERS.len() {
            let p = self.center.adjacent(Direction::BORDERS[self.i]);
            self.i += 1;
            if is_valid(p.x, p.y, self.width, self.height) {
                return Some(p);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Circle
// ---------------------------------------------------------------------------

/// Direction schedule for walking one diamond ring, `2 * radius` steps per
/// side, starting from the ring's north vertex.
const RING_ORDER: [Direction; 4] = [
    Direction::SE,
    Direction::SW,
    Direction::NW,
    Direction::NE,
];

/// Walks the positions around a center, ring by ring.
///
/// In filled mode the iterator yields every in-bounds position with
/// `1 <= distance(center, p) <= radius`, ring by ring outward; in ring mode
/// only the positions at exactly `radius`. The center itself is never
/// yielded and no position appears twice.
///
/// Each ring is an isometric diamond of `8 * r` cells. The cursor starts on
/// the ring's north vertex (`center` shifted [`Direction::N`] `r` times) and
/// takes `2 * r` steps in each of SE, SW, NW, NE; the final step lands back
/// on the vertex, which is the ring's last yield. Out-of-bounds candidates
/// are skipped by advancing the walk.
///
/// A radius of `i32::MAX` means "unbounded" (flood fill); the radius is
/// clamped to `width + height`, beyond which no in-bounds position exists.
#[derive(Clone, Debug)]
pub struct Circle {
    width: i32,
    height: i32,
    radius: i32,
    filled: bool,
    current_radius: i32,
    /// Steps taken in the current ring, `0..8 * current_radius`.
    n: i32,
    pos: Position,
    done: bool,
}

impl Circle {
    /// Walk positions around `center` within a `width` x `height` grid.
    pub fn new(center: Position, filled: bool, radius: i32, width: i32, height: i32) -> Self {
        let radius = radius.min(width + height);
        let start_radius = if filled { 1 } else { radius };
        let mut pos = center;
        if radius >= 1 {
            for _ in 0..start_radius {
                pos = pos.adjacent(Direction::N);
            }
        }
        Self {
            width,
            height,
            radius,
            filled,
            current_radius: start_radius,
            n: 0,
            pos,
            done: radius < 1,
        }
    }
}

impl Iterator for Circle {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }
        loop {
            if self.n == self.current_radius * 8 {
                // Ring complete.
                if !self.filled || self.current_radius >= self.radius {
                    self.done = true;
                    return None;
                }
                // The cursor sits on this ring's north vertex; one more N
                // step reaches the next ring's vertex.
                self.current_radius += 1;
                self.n = 0;
                self.pos = self.pos.adjacent(Direction::N);
            }
            let side = (self.n / (self.current_radius * 2)) as usize;
            self.pos = self.pos.adjacent(RING_ORDER[side]);
            self.n += 1;
            if is_valid(self.pos.x, self.pos.y, self.width, self.height) {
                return Some(self.pos);
            }
        }
    }
}
