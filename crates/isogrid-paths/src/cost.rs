//! The default cost decider.

use crate::traits::{CostDecider, EdgeCost, Mover, Tile};

/// Default per-edge cost rules.
///
/// - Land movers may not enter water, naval movers may not enter land.
/// - A legal edge charges the destination tile's terrain cost, clamped to
///   the moves the mover has available (a mover may always finish a move it
///   can start).
/// - A mover arriving at an edge with zero moves left first replenishes to
///   its full allowance; the edge then reports `new_turn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseCostDecider;

impl<T: Tile, M: Mover> CostDecider<T, M> for BaseCostDecider {
    fn cost(&mut self, mover: &M, _from: &T, to: &T, moves_left: i32, _turns: i32) -> EdgeCost {
        if mover.is_naval() && to.is_land() {
            return EdgeCost::Illegal;
        }
        if !mover.is_naval() && !to.is_land() {
            return EdgeCost::Illegal;
        }
        let terrain = to.move_cost();
        if terrain <= 0 {
            return EdgeCost::Illegal;
        }

        let mut available = moves_left;
        let mut new_turn = false;
        if available == 0 {
            available = mover.initial_moves();
            new_turn = true;
        }
        let cost = terrain.min(available);
        EdgeCost::Legal {
            cost,
            moves_left: available - cost,
            new_turn,
        }
    }
}
