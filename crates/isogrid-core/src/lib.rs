//! **isogrid-core** — offset-coordinate geometry for an isometric strategy
//! grid.
//!
//! This crate provides the value types the rest of the *isogrid* ecosystem
//! builds on: [`Position`] and [`Direction`] with their row-parity-dependent
//! arithmetic, the closed-form isometric [`distance`], the [`Map`] tile
//! container, and the family of position iterators (whole-grid scan,
//! adjacency rings, and the expanding circle walk).

pub mod geom;
pub mod grid;
pub mod iter;

pub use geom::{Direction, Position, distance, is_valid};
pub use grid::Map;
pub use iter::{Adjacent, BorderAdjacent, Circle, WholeGrid};
