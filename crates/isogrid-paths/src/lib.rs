//! **isogrid-paths** — turn-aware pathfinding on the isometric offset grid.
//!
//! Two searches share one open/closed-list discipline, coordinated by
//! [`SearchSpace`]:
//!
//! - **A\*** point-to-point routing ([`SearchSpace::find_path`]), using the
//!   closed-form isometric distance as its heuristic.
//! - **Goal-directed bounded search** ([`SearchSpace::search`]), Dijkstra
//!   ordering with a turn budget and a caller-supplied [`GoalDecider`].
//!
//! Both track turn-based movement budgets per node and handle mid-route
//! embarkation onto / disembarkation off a carrying entity. Game rules stay
//! outside the engine: per-edge cost and legality come from a
//! [`CostDecider`] (with [`BaseCostDecider`] as the stock implementation),
//! goal acceptance from a [`GoalDecider`], and the grid's tile and mover
//! properties from the narrow [`Tile`] and [`Mover`] traits.

mod astar;
mod cost;
mod goal;
mod node;
mod traits;

pub use cost::BaseCostDecider;
pub use node::{PathNode, SearchSpace};
pub use traits::{CostDecider, EdgeCost, GoalDecider, Mover, Player, Tile};
