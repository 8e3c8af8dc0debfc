//! Core data structures for a 2048-style sliding tile puzzle.
//!
//! This crate provides the board state that move resolution, tile spawning and
//! persistence are built on.
//!
//! # Overview
//!
//! - [`position`]: [`Position`], a signed `(x, y)` cell coordinate
//! - [`tile`]: [`Tile`], an immutable numbered tile at a position
//! - [`grid`]: [`Grid`], the N×N board with bounds-safe occupancy queries
//! - [`line`]: [`Line`], a row or column of the board
//! - [`snapshot`]: [`Snapshot`], the serde-friendly projection of a grid
//!
//! # Examples
//!
//! ```
//! use evil2048_core::{Grid, Position, Tile};
//!
//! let mut grid = Grid::new(4);
//! let tile = Tile::new(Position::new(0, 0), 2);
//! grid.insert_tile(tile);
//!
//! // Slide the tile down its column to the last row.
//! grid.remove_tile(tile.position());
//! grid.insert_tile(tile.moved_to(Position::new(3, 0)));
//!
//! let restored = Grid::from_snapshot(&grid.serialize()).unwrap();
//! assert_eq!(restored.cell_content(Position::new(3, 0)).map(Tile::value), Some(2));
//! ```

pub mod grid;
pub mod line;
pub mod position;
pub mod snapshot;
pub mod tile;

pub use self::{
    grid::{AvailableCells, Cells, Grid, GridParseError},
    line::{Line, LinePositions},
    position::Position,
    snapshot::{PositionSnapshot, Snapshot, SnapshotError, TileSnapshot},
    tile::Tile,
};
