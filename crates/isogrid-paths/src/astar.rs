//! Point-to-point pathfinding (A*).

use std::collections::BinaryHeap;

use isogrid_core::{Direction, Map, Position, distance};

use crate::node::{HeapEntry, NO_PARENT, PathNode, SearchSpace, Slot, backtrace};
use crate::traits::{CostDecider, EdgeCost, Mover, Tile};

impl SearchSpace {
    /// Find the lowest-cost route for `mover` from `start` to `end`.
    ///
    /// When `carrier` is supplied the mover begins the search aboard it;
    /// the first land cell on the route that is unclaimed or owned by the
    /// mover's side is an embarkation boundary where the active mover
    /// switches from the carrier to the passenger, with the passenger's
    /// full movement allowance.
    ///
    /// Destination rule: an edge the cost decider rejects is still accepted
    /// when it leads into `end` itself, charged as the mover's entire
    /// remaining moves. Destination legality is deliberately not
    /// pre-validated — this is what lets callers plan a route whose final
    /// step is, say, an attack into an occupied cell.
    ///
    /// Returns the route from the first step after `start` to `end`, or
    /// `None` when no route exists. Panics when `start == end` or either
    /// position is out of bounds — those are caller errors, not search
    /// outcomes.
    pub fn find_path<T, M, C>(
        &mut self,
        map: &Map<T>,
        mover: &M,
        carrier: Option<&M>,
        start: Position,
        end: Position,
        decider: &mut C,
    ) -> Option<Vec<PathNode>>
    where
        T: Tile,
        M: Mover,
        C: CostDecider<T, M>,
    {
        self.check_map(map);
        assert!(map.is_valid(start), "start {start} out of bounds");
        assert!(map.is_valid(end), "end {end} out of bounds");
        assert!(start != end, "start and end must be distinct");

        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        let start_idx = self.flat(start);
        let end_idx = self.flat(end);

        self.astar_slots[start_idx] = Slot {
            cost: 0,
            f: distance(start, end),
            parent: NO_PARENT,
            direction: None,
            moves_left: carrier.map_or(mover.moves_left(), |c| c.moves_left()),
            turns: 0,
            on_carrier: carrier.is_some(),
            generation: cur_gen,
            open: true,
        };

        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry {
            idx: start_idx,
            f: self.astar_slots[start_idx].f,
            pos: start,
        });

        while let Some(entry) = heap.pop() {
            let ci = entry.idx;
            {
                let slot = &self.astar_slots[ci];
                if slot.generation != cur_gen || !slot.open {
                    // Stale heap entry, superseded by a cheaper one.
                    continue;
                }
            }
            if ci == end_idx {
                return backtrace(&self.astar_slots, self.width, ci);
            }
            self.astar_slots[ci].open = false;

            let cur = self.astar_slots[ci].clone();
            let cur_pos = entry.pos;
            let prev_pos = (cur.parent != NO_PARENT).then(|| self.position(cur.parent));
            let from_tile = map.tile(cur_pos);

            for dir in Direction::ALL {
                let npos = cur_pos.adjacent(dir);
                if !map.is_valid(npos) {
                    continue;
                }
                // No back-stepping onto the immediate predecessor.
                if prev_pos == Some(npos) {
                    continue;
                }
                let to_tile = map.tile(npos);

                let mut on_carrier = cur.on_carrier;
                let mut moves_left = cur.moves_left;
                if on_carrier
                    && to_tile.is_land()
                    && to_tile.owner().is_none_or(|o| o == mover.player())
                {
                    // Embarkation boundary: the passenger takes over with
                    // its full allowance.
                    on_carrier = false;
                    moves_left = mover.initial_moves();
                }
                // `on_carrier` is only ever set when a carrier was supplied.
                let active = if on_carrier {
                    carrier.expect("carrier state without a carrier")
                } else {
                    mover
                };

                let (extra, moves_after, new_turn) =
                    match decider.cost(active, from_tile, to_tile, moves_left, cur.turns) {
                        EdgeCost::Legal {
                            cost,
                            moves_left,
                            new_turn,
                        } => (cost, moves_left, new_turn),
                        EdgeCost::Illegal => {
                            if npos != end {
                                continue;
                            }
                            // Destination rule: accepted, at the price of
                            // every remaining move.
                            (moves_left, 0, false)
                        }
                    };

                let ncost = cur.cost + extra;
                let ni = self.flat(npos);
                let slot = &mut self.astar_slots[ni];
                if slot.generation == cur_gen && ncost >= slot.cost {
                    // An entry for this cell, open or closed, is already
                    // at least as cheap.
                    continue;
                }
                let f = ncost + distance(npos, end);
                *slot = Slot {
                    cost: ncost,
                    f,
                    parent: ci,
                    direction: Some(dir),
                    moves_left: moves_after,
                    turns: cur.turns + new_turn as i32,
                    on_carrier,
                    generation: cur_gen,
                    open: true,
                };
                heap.push(HeapEntry { idx: ni, f, pos: npos });
            }
        }

        None
    }
}
