//! Path results and the shared search bookkeeping.
//!
//! Both search algorithms work over the same structure: one [`Slot`] per
//! grid cell in a flat arena, lazily invalidated by a generation counter,
//! plus a binary heap of [`HeapEntry`] references with lazy deletion
//! (stale pops are skipped). [`SearchSpace`] owns the arenas so repeated
//! searches reuse their allocations.

use isogrid_core::{Direction, Map, Position};

/// One step of a found route.
///
/// A successful search returns a `Vec<PathNode>` ordered from the first
/// step *after* the origin to the terminal cell; the origin itself is never
/// part of the route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    /// The cell this step arrives at.
    pub pos: Position,
    /// Direction taken from the predecessor. `None` only on the origin
    /// node the goal decider may be shown.
    pub direction: Option<Direction>,
    /// Accumulated cost from the origin.
    pub cost: i32,
    /// Moves the active mover has left on arrival.
    pub moves_left: i32,
    /// Turns elapsed on arrival.
    pub turns: i32,
    /// Whether the mover was still aboard its carrier here.
    pub on_carrier: bool,
}

// ---------------------------------------------------------------------------
// Internal search state
// ---------------------------------------------------------------------------

/// Sentinel parent index marking the origin of a search.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell search state. One slot per cell; a slot whose `generation`
/// does not match the current search holds stale data and is treated as
/// unvisited.
#[derive(Clone)]
pub(crate) struct Slot {
    pub(crate) cost: i32,
    /// Heap key: `cost + heuristic` for A*, plain `cost` for goal search.
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) direction: Option<Direction>,
    pub(crate) moves_left: i32,
    pub(crate) turns: i32,
    pub(crate) on_carrier: bool,
    pub(crate) generation: u32,
    /// On the frontier (true) or finalized (false).
    pub(crate) open: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            cost: 0,
            f: 0,
            parent: NO_PARENT,
            direction: None,
            moves_left: 0,
            turns: 0,
            on_carrier: false,
            generation: 0,
            open: false,
        }
    }
}

/// Heap reference into the slot arena. Ordered so that `BinaryHeap` (a
/// max-heap) pops the smallest `f` first, ties broken by ascending `x`
/// then ascending `y`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) struct HeapEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) pos: Position,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Coordinator for searches over one grid size.
///
/// Owns the slot arenas for the A* and goal-directed searches so repeated
/// queries reuse their allocations; the generation counters invalidate all
/// slots in O(1) at the start of each search. A `SearchSpace` is tied to
/// the dimensions it was built with and panics when handed a map of a
/// different size.
pub struct SearchSpace {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) astar_slots: Vec<Slot>,
    pub(crate) astar_generation: u32,
    pub(crate) goal_slots: Vec<Slot>,
    pub(crate) goal_generation: u32,
}

impl SearchSpace {
    /// Create a search space for a `width` x `height` grid.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            astar_slots: vec![Slot::default(); len],
            astar_generation: 0,
            goal_slots: vec![Slot::default(); len],
            goal_generation: 0,
        }
    }

    /// Create a search space sized for `map`.
    pub fn for_map<T>(map: &Map<T>) -> Self {
        Self::new(map.width(), map.height())
    }

    /// Grid width this space was built for.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height this space was built for.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Flat index of an in-bounds position.
    #[inline]
    pub(crate) fn flat(&self, p: Position) -> usize {
        (p.y as usize) * (self.width as usize) + p.x as usize
    }

    /// Position of a flat index.
    #[inline]
    pub(crate) fn position(&self, idx: usize) -> Position {
        Position::new(idx as i32 % self.width, idx as i32 / self.width)
    }

    pub(crate) fn check_map<T>(&self, map: &Map<T>) {
        assert!(
            map.width() == self.width && map.height() == self.height,
            "map is {}x{} but the search space was built for {}x{}",
            map.width(),
            map.height(),
            self.width,
            self.height,
        );
    }
}

/// Walk `parent` links from `terminal` back to the origin and return the
/// route in forward order, origin excluded.
///
/// Returns `None` when `terminal` *is* the origin (there is no first step).
/// A parent chain longer than the arena indicates corrupted bookkeeping;
/// it is logged and the walk truncated rather than aborted, since the
/// collected prefix still backtracks toward the origin.
pub(crate) fn backtrace(slots: &[Slot], width: i32, terminal: usize) -> Option<Vec<PathNode>> {
    let mut route = Vec::new();
    let mut idx = terminal;
    let mut steps = 0usize;
    while slots[idx].parent != NO_PARENT {
        if steps > slots.len() {
            log::warn!("path backtrace exceeded arena size; truncating route");
            break;
        }
        let slot = &slots[idx];
        route.push(PathNode {
            pos: Position::new(idx as i32 % width, idx as i32 / width),
            direction: slot.direction,
            cost: slot.cost,
            moves_left: slot.moves_left,
            turns: slot.turns,
            on_carrier: slot.on_carrier,
        });
        idx = slot.parent;
        steps += 1;
    }
    if route.is_empty() {
        return None;
    }
    route.reverse();
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_smallest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { idx: 0, f: 5, pos: Position::new(0, 0) });
        heap.push(HeapEntry { idx: 1, f: 2, pos: Position::new(3, 3) });
        heap.push(HeapEntry { idx: 2, f: 9, pos: Position::new(1, 1) });
        assert_eq!(heap.pop().map(|e| e.f), Some(2));
        assert_eq!(heap.pop().map(|e| e.f), Some(5));
        assert_eq!(heap.pop().map(|e| e.f), Some(9));
    }

    #[test]
    fn heap_ties_break_by_x_then_y() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { idx: 0, f: 3, pos: Position::new(2, 0) });
        heap.push(HeapEntry { idx: 1, f: 3, pos: Position::new(1, 5) });
        heap.push(HeapEntry { idx: 2, f: 3, pos: Position::new(1, 2) });
        assert_eq!(heap.pop().map(|e| e.pos), Some(Position::new(1, 2)));
        assert_eq!(heap.pop().map(|e| e.pos), Some(Position::new(1, 5)));
        assert_eq!(heap.pop().map(|e| e.pos), Some(Position::new(2, 0)));
    }

    #[test]
    fn backtrace_forward_order_excludes_origin() {
        // 3x1 arena: 0 -> 1 -> 2, origin at 0.
        let mut slots = vec![Slot::default(); 3];
        slots[1] = Slot {
            cost: 1,
            parent: 0,
            direction: Some(Direction::E),
            ..Slot::default()
        };
        slots[2] = Slot {
            cost: 2,
            parent: 1,
            direction: Some(Direction::E),
            ..Slot::default()
        };
        let route = backtrace(&slots, 3, 2).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0].pos, Position::new(1, 0));
        assert_eq!(route[1].pos, Position::new(2, 0));
        assert_eq!(route[1].cost, 2);
    }

    #[test]
    fn backtrace_of_origin_is_none() {
        let slots = vec![Slot::default(); 4];
        assert!(backtrace(&slots, 2, 0).is_none());
    }

    #[test]
    fn backtrace_survives_a_parent_cycle() {
        // 1 and 2 point at each other; the guard must truncate, not hang.
        let mut slots = vec![Slot::default(); 3];
        slots[1] = Slot { parent: 2, ..Slot::default() };
        slots[2] = Slot { parent: 1, ..Slot::default() };
        let route = backtrace(&slots, 3, 2);
        assert!(route.is_some());
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn zero_sized_space_panics() {
        SearchSpace::new(0, 5);
    }
}
