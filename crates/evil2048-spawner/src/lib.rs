//! Adversarial tile spawning.
//!
//! Instead of dropping a random tile into a random empty cell, the
//! [`AdversarialSpawner`] looks for the placement that hurts the player most:
//! it plugs the gaps of the most crowded row or column, prefers the gap that is
//! already surrounded by high tiles, and picks a value that cannot merge with
//! its neighbours immediately.
//!
//! The spawner is a pure function of the [`Grid`](evil2048_core::Grid): it keeps no
//! state between calls and uses no randomness.
//!
//! # Modules
//!
//! - [`candidates`]: narrowing the empty cells to the most blocking line
//! - [`score`]: ranking candidate cells by their neighbours
//! - [`spawner`]: [`AdversarialSpawner`] and the merge-avoiding value rule
//!
//! # Examples
//!
//! ```
//! use evil2048_core::Grid;
//! use evil2048_spawner::AdversarialSpawner;
//!
//! let mut grid = Grid::new(4);
//! let spawner = AdversarialSpawner::new();
//!
//! while grid.cells_available() {
//!     spawner.spawn_into(&mut grid);
//! }
//! assert_eq!(spawner.spawn(&grid), None);
//! ```

pub mod candidates;
pub mod score;
pub mod spawner;

pub use self::{
    candidates::{ScanAxis, blocking_line, candidate_cells, scan_axis},
    score::{NeighborScore, TieBreak},
    spawner::{AdversarialSpawner, SpawnerOptions, worst_value_for_cell},
};
