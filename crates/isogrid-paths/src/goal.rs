//! Goal-directed bounded search (Dijkstra-style).

use std::collections::BinaryHeap;

use isogrid_core::{Direction, Map, Position};

use crate::node::{HeapEntry, NO_PARENT, PathNode, SearchSpace, Slot, backtrace};
use crate::traits::{CostDecider, EdgeCost, GoalDecider, Mover, Tile};

impl SearchSpace {
    /// Search outward from `start` for the nearest (or best) position the
    /// goal decider accepts, within a budget of `max_turns` elapsed turns.
    ///
    /// The open list is ordered by accumulated cost alone — there is no
    /// fixed destination to steer toward. Every popped node, the origin
    /// included, is shown to the goal decider; with
    /// [`has_sub_goals`](GoalDecider::has_sub_goals) the search keeps
    /// exploring after a match and the decider retains the best candidate.
    /// Popping a node beyond the turn budget ends the search — the
    /// frontier only gets more expensive from there.
    ///
    /// Carrier transitions follow the same rules as
    /// [`find_path`](SearchSpace::find_path); illegal edges are simply
    /// skipped (there is no destination to exempt).
    ///
    /// Returns the route to the best accepted goal, or `None` when the
    /// decider recorded nothing (a goal equal to `start` counts as
    /// nothing — there is no first step to take).
    pub fn search<T, M, C, G>(
        &mut self,
        map: &Map<T>,
        mover: &M,
        carrier: Option<&M>,
        start: Position,
        goal_decider: &mut G,
        cost_decider: &mut C,
        max_turns: i32,
    ) -> Option<Vec<PathNode>>
    where
        T: Tile,
        M: Mover,
        C: CostDecider<T, M>,
        G: GoalDecider<M>,
    {
        self.check_map(map);
        assert!(map.is_valid(start), "start {start} out of bounds");

        self.goal_generation = self.goal_generation.wrapping_add(1);
        let cur_gen = self.goal_generation;

        let start_idx = self.flat(start);
        self.goal_slots[start_idx] = Slot {
            cost: 0,
            f: 0,
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
            f: 0,
            pos: start,
        });

        while let Some(entry) = heap.pop() {
            let ci = entry.idx;
            {
                let slot = &self.goal_slots[ci];
                if slot.generation != cur_gen || !slot.open {
                    continue;
                }
            }
            let cur = self.goal_slots[ci].clone();
            if cur.turns > max_turns {
                // Everything still queued costs at least as much; the
                // bounded frontier is exhausted.
                break;
            }
            let cur_pos = entry.pos;

            let candidate = PathNode {
                pos: cur_pos,
                direction: cur.direction,
                cost: cur.cost,
                moves_left: cur.moves_left,
                turns: cur.turns,
                on_carrier: cur.on_carrier,
            };
            if goal_decider.check(mover, &candidate) && !goal_decider.has_sub_goals() {
                return backtrace(&self.goal_slots, self.width, ci);
            }

            self.goal_slots[ci].open = false;
            let prev_pos = (cur.parent != NO_PARENT).then(|| self.position(cur.parent));
            let from_tile = map.tile(cur_pos);

            for dir in Direction::ALL {
                let npos = cur_pos.adjacent(dir);
                if !map.is_valid(npos) {
                    continue;
                }
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
                    on_carrier = false;
                    moves_left = mover.initial_moves();
                }
                // `on_carrier` is only ever set when a carrier was supplied.
                let active = if on_carrier {
                    carrier.expect("carrier state without a carrier")
                } else {
                    mover
                };

                let EdgeCost::Legal {
                    cost: extra,
                    moves_left: moves_after,
                    new_turn,
                } = cost_decider.cost(active, from_tile, to_tile, moves_left, cur.turns)
                else {
                    continue;
                };

                let ncost = cur.cost + extra;
                let ni = self.flat(npos);
                let slot = &mut self.goal_slots[ni];
                if slot.generation == cur_gen && ncost >= slot.cost {
                    continue;
                }
                *slot = Slot {
                    cost: ncost,
                    f: ncost,
                    parent: ci,
                    direction: Some(dir),
                    moves_left: moves_after,
                    turns: cur.turns + new_turn as i32,
                    on_carrier,
                    generation: cur_gen,
                    open: true,
                };
                heap.push(HeapEntry {
                    idx: ni,
                    f: ncost,
                    pos: npos,
                });
            }
        }

        // Frontier exhausted (or over budget): fall back to the best the
        // decider recorded along the way.
        let best = goal_decider.goal()?.pos;
        let bi = self.flat(best);
        if self.goal_slots[bi].generation != cur_gen {
            // The decider returned a node this search never produced.
            log::warn!("goal decider recorded a position unknown to the search: {best}");
            return None;
        }
        backtrace(&self.goal_slots, self.width, bi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::BaseCostDecider;
    use crate::testutil::{TestMover, land_map};
    use crate::traits::Player;
    use isogrid_core::distance;
    use std::collections::HashSet;

    /// Accepts any of a fixed set of positions, keeping the cheapest.
    struct TargetDecider {
        targets: HashSet<Position>,
        sub_goals: bool,
        best: Option<PathNode>,
    }

    impl TargetDecider {
        fn new<I: IntoIterator<Item = Position>>(targets: I, sub_goals: bool) -> Self {
            Self {
                targets: targets.into_iter().collect(),
                sub_goals,
                best: None,
            }
        }
    }

    impl GoalDecider<TestMover> for TargetDecider {
        fn check(&mut self, _mover: &TestMover, node: &PathNode) -> bool {
            if !self.targets.contains(&node.pos) {
                return false;
            }
            if self.best.is_none_or(|b| node.cost < b.cost) {
                self.best = Some(*node);
            }
            true
        }

        fn has_sub_goals(&self) -> bool {
            self.sub_goals
        }

        fn goal(&self) -> Option<&PathNode> {
            self.best.as_ref()
        }
    }

    #[test]
    fn finds_nearest_target_and_stops() {
        let map = land_map(7, 7);
        let mover = TestMover::land(2, Player(1));
        let mut decider = TargetDecider::new([Position::new(6, 3)], false);

        let route = SearchSpace::for_map(&map)
            .search(
                &map,
                &mover,
                None,
                Position::new(0, 3),
                &mut decider,
                &mut BaseCostDecider,
                5,
            )
            .expect("target reachable in five turns");

        assert_eq!(route.last().map(|n| n.pos), Some(Position::new(6, 3)));
        assert!(route.iter().all(|n| n.turns <= 5));
    }

    #[test]
    fn never_returns_a_node_beyond_the_turn_budget() {
        let map = land_map(7, 7);
        let mover = TestMover::land(2, Player(1));
        let mut decider = TargetDecider::new([Position::new(6, 3)], false);

        // Two moves per turn, one turn allowed: a column-6 target is out of
        // reach from column 0.
        let route = SearchSpace::for_map(&map).search(
            &map,
            &mover,
            None,
            Position::new(0, 3),
            &mut decider,
            &mut BaseCostDecider,
            1,
        );
        assert!(route.is_none());
    }

    #[test]
    fn zero_turn_budget_reaches_immediate_neighbors_at_most() {
        let map = land_map(7, 7);
        // One move per turn: anything past the first step needs a new turn.
        let mover = TestMover::land(1, Player(1));
        let start = Position::new(3, 3);
        let everything: Vec<_> = map.positions().filter(|&p| p != start).collect();
        let mut decider = TargetDecider::new(everything, false);

        let route = SearchSpace::for_map(&map)
            .search(&map, &mover, None, start, &mut decider, &mut BaseCostDecider, 0)
            .expect("neighbors are in reach");

        assert_eq!(route.len(), 1);
        assert_eq!(distance(start, route[0].pos), 1);
    }

    #[test]
    fn sub_goals_keep_the_cheapest_of_several_matches() {
        let map = land_map(9, 9);
        let mover = TestMover::land(3, Player(1));
        let near = Position::new(2, 4);
        let far = Position::new(7, 4);
        let mut decider = TargetDecider::new([near, far], true);

        let route = SearchSpace::for_map(&map)
            .search(
                &map,
                &mover,
                None,
                Position::new(0, 4),
                &mut decider,
                &mut BaseCostDecider,
                4,
            )
            .expect("both targets reachable");

        assert_eq!(route.last().map(|n| n.pos), Some(near));
    }

    #[test]
    fn goal_equal_to_start_is_none() {
        let map = land_map(5, 5);
        let mover = TestMover::land(2, Player(1));
        let start = Position::new(2, 2);
        let mut decider = TargetDecider::new([start], false);

        let route = SearchSpace::for_map(&map).search(
            &map,
            &mover,
            None,
            start,
            &mut decider,
            &mut BaseCostDecider,
            3,
        );
        assert!(route.is_none());
    }

    #[test]
    fn nothing_recorded_is_none() {
        let map = land_map(5, 5);
        let mover = TestMover::land(2, Player(1));
        let mut decider = TargetDecider::new(std::iter::empty(), false);

        let route = SearchSpace::for_map(&map).search(
            &map,
            &mover,
            None,
            Position::new(0, 0),
            &mut decider,
            &mut BaseCostDecider,
            2,
        );
        assert!(route.is_none());
    }

    #[test]
    fn route_directions_replay_to_the_goal() {
        let map = land_map(7, 7);
        let mover = TestMover::land(2, Player(1));
        let start = Position::new(1, 1);
        let target = Position::new(5, 5);
        let mut decider = TargetDecider::new([target], false);

        let route = SearchSpace::for_map(&map)
            .search(&map, &mover, None, start, &mut decider, &mut BaseCostDecider, 9)
            .expect("target reachable");

        let mut cur = start;
        for node in &route {
            cur = cur.adjacent(node.direction.unwrap());
            assert_eq!(cur, node.pos);
        }
        assert_eq!(cur, target);
    }
}
