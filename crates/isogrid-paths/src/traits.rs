//! The engine's extension points.
//!
//! The searches know nothing about game rules. Everything rule-shaped —
//! terrain cost, legality, ownership, what counts as a goal — enters
//! through these traits, implemented by the caller and passed into
//! [`SearchSpace`](crate::SearchSpace) per search.

use crate::node::PathNode;

/// Opaque owner identity, used only for equality checks (embarkation
/// legality and the default cost rules).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player(pub u32);

/// Read-only tile properties the engine consults.
pub trait Tile {
    /// Base terrain cost of entering this tile. Passable terrain is
    /// `>= 1`; the default cost decider treats anything else as
    /// impassable.
    fn move_cost(&self) -> i32;

    /// Land or water.
    fn is_land(&self) -> bool;

    /// Who has claimed this tile (settlement or territory), if anyone.
    fn owner(&self) -> Option<Player>;
}

/// Read-only mover properties the engine consults.
pub trait Mover {
    /// Moves remaining in the current turn.
    fn moves_left(&self) -> i32;

    /// Full movement allowance at the start of a fresh turn.
    fn initial_moves(&self) -> i32;

    /// Naval movers travel water; land movers travel land.
    fn is_naval(&self) -> bool;

    /// The side this mover belongs to.
    fn player(&self) -> Player;
}

/// Outcome of evaluating one edge.
///
/// The cost, the mover's remaining moves after the edge, and whether taking
/// it consumed a fresh turn are returned together, so a decider needs no
/// observable state between calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeCost {
    /// The edge may be taken.
    Legal {
        /// Extra cost added to the route.
        cost: i32,
        /// The mover's remaining moves after taking the edge.
        moves_left: i32,
        /// Whether the edge began a new turn (moves were exhausted and
        /// replenished before it).
        new_turn: bool,
    },
    /// The edge may not be taken. During A* an illegal edge into the exact
    /// destination cell is still accepted; see
    /// [`SearchSpace::find_path`](crate::SearchSpace::find_path).
    Illegal,
}

/// Per-edge cost and legality.
///
/// Deciders may carry state across calls, which is why `cost` takes
/// `&mut self` — one instance serves at most one search at a time.
pub trait CostDecider<T: Tile, M: Mover> {
    /// Evaluate the edge `from -> to` for `mover`, which arrives at the
    /// edge with `moves_left` moves and `turns` elapsed turns.
    fn cost(&mut self, mover: &M, from: &T, to: &T, moves_left: i32, turns: i32) -> EdgeCost;
}

/// Goal predicate and accumulator for the bounded goal-directed search.
pub trait GoalDecider<M: Mover> {
    /// Whether `node` qualifies as a goal. A qualifying node is recorded by
    /// the decider (directly, or by comparison against the best recorded so
    /// far).
    fn check(&mut self, mover: &M, node: &PathNode) -> bool;

    /// When `true`, a successful [`check`](Self::check) does not stop the
    /// search: exploration continues within the turn budget looking for
    /// better goals. When `false`, the first accepted goal terminates the
    /// search.
    fn has_sub_goals(&self) -> bool;

    /// The best goal recorded so far.
    fn goal(&self) -> Option<&PathNode>;
}
