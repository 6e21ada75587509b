//! The [`Map`] tile container.

use crate::geom::{Position, is_valid};
use crate::iter::{Adjacent, BorderAdjacent, Circle, WholeGrid};

/// A rectangular grid of tiles, row major, with dimensions fixed at
/// construction.
///
/// The search engine only ever reads a `Map`; what a tile *is* stays with
/// the caller (the type parameter), so game rules never leak in here.
#[derive(Debug, Clone)]
pub struct Map<T> {
    width: i32,
    height: i32,
    tiles: Vec<T>,
}

impl<T> Map<T> {
    /// Build a map by invoking `f` for every position, row major.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Position) -> T) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                tiles.push(f(Position::new(x, y)));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `pos` addresses a tile.
    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        is_valid(pos.x, pos.y, self.width, self.height)
    }

    /// The tile at `pos`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        if !self.is_valid(pos) {
            return None;
        }
        Some(&self.tiles[self.index(pos)])
    }

    /// The tile at `pos`. Panics when out of bounds.
    #[inline]
    pub fn tile(&self, pos: Position) -> &T {
        assert!(self.is_valid(pos), "position {pos} out of bounds");
        &self.tiles[self.index(pos)]
    }

    /// Mutable tile access, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if !self.is_valid(pos) {
            return None;
        }
        let i = self.index(pos);
        Some(&mut self.tiles[i])
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        (pos.y as usize) * (self.width as usize) + pos.x as usize
    }

    // -----------------------------------------------------------------------
    // Position iterators
    // -----------------------------------------------------------------------

    /// Row-major iterator over every position, each exactly once.
    #[inline]
    pub fn positions(&self) -> WholeGrid {
        WholeGrid::new(self.width, self.height)
    }

    /// In-bounds neighbors of `center`, in fixed `N..NW` direction order.
    #[inline]
    pub fn adjacent(&self, center: Position) -> Adjacent {
        Adjacent::new(center, self.width, self.height)
    }

    /// In-bounds neighbors of `center` in the alternating four directions
    /// (`NE`, `SE`, `SW`, `NW`).
    #[inline]
    pub fn border_adjacent(&self, center: Position) -> BorderAdjacent {
        BorderAdjacent::new(center, self.width, self.height)
    }

    /// All in-bounds positions within `radius` of `center` (center
    /// excluded), walked ring by ring outward.
    #[inline]
    pub fn circle(&self, center: Position, radius: i32) -> Circle {
        Circle::new(center, true, radius, self.width, self.height)
    }

    /// The in-bounds positions at exactly `radius` from `center`.
    #[inline]
    pub fn ring(&self, center: Position, radius: i32) -> Circle {
        Circle::new(center, false, radius, self.width, self.height)
    }
}
