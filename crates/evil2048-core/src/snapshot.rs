//! Serializable board snapshots.
//!
//! A [`Snapshot`] is a plain projection of a [`Grid`] for a host's own persistence.
//! Its serde shape is fixed:
//!
//! ```text
//! { "size": N, "cells": [[null | { "position": { "x": X, "y": Y }, "value": V }, ...], ...] }
//! ```
//!
//! `cells[x]` is row `x`, and `cells[x][y]` holds the tile at `(x, y)`.

use serde::{Deserialize, Serialize};

use crate::{Grid, Line, Position, Tile};

/// Serializable form of a [`Grid`].
///
/// # Examples
///
/// ```
/// use evil2048_core::{Grid, Position, Tile};
///
/// let mut grid = Grid::new(2);
/// grid.insert_tile(Tile::new(Position::new(1, 0), 4));
///
/// let snapshot = grid.serialize();
/// assert_eq!(snapshot.size, 2);
/// assert_eq!(snapshot.cells[1][0].map(|tile| tile.value), Some(4));
///
/// let restored = Grid::from_snapshot(&snapshot).unwrap();
/// assert_eq!(restored, grid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board size N.
    pub size: usize,
    /// `size` rows of `size` cells each, indexed `cells[x][y]`.
    pub cells: Vec<Vec<Option<TileSnapshot>>>,
}

/// Serializable form of a [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Where the tile sits.
    pub position: PositionSnapshot,
    /// The tile value.
    pub value: u32,
}

/// Serializable form of a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Row coordinate.
    pub x: i32,
    /// Column coordinate.
    pub y: i32,
}

impl From<Position> for PositionSnapshot {
    fn from(pos: Position) -> Self {
        Self {
            x: pos.x(),
            y: pos.y(),
        }
    }
}

impl From<PositionSnapshot> for Position {
    fn from(pos: PositionSnapshot) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<Tile> for TileSnapshot {
    fn from(tile: Tile) -> Self {
        Self {
            position: tile.position().into(),
            value: tile.value(),
        }
    }
}

/// Errors that can occur when restoring a [`Grid`] from a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    /// The snapshot declares a zero-sized board.
    #[display("snapshot size must be positive")]
    ZeroSize,
    /// The snapshot declares a board larger than [`Grid::MAX_SIZE`].
    #[display("snapshot size {size} exceeds the supported maximum")]
    TooLarge {
        /// Declared size.
        size: usize,
    },
    /// The number of rows does not match the declared size.
    #[display("snapshot has {found} rows, expected {expected}")]
    RowCount {
        /// Declared size.
        expected: usize,
        /// Number of rows present.
        found: usize,
    },
    /// A row has the wrong number of cells.
    #[display("snapshot row {x} has {found} cells, expected {expected}")]
    RowLength {
        /// Index of the offending row.
        x: usize,
        /// Declared size.
        expected: usize,
        /// Number of cells present.
        found: usize,
    },
    /// A tile records a position different from the cell it is stored in.
    #[display("tile stored at {cell} claims position {tile}")]
    MisplacedTile {
        /// The cell holding the tile.
        cell: Position,
        /// The position recorded in the tile.
        tile: Position,
    },
    /// A tile has value zero.
    #[display("tile at {position} has value 0")]
    ZeroValue {
        /// The cell holding the tile.
        position: Position,
    },
}

impl Grid {
    /// Returns a snapshot of the current board.
    #[must_use]
    pub fn serialize(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Restores a grid from a snapshot.
    ///
    /// The board size is taken from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the snapshot is not one [`Grid::serialize`]
    /// could have produced: a size of zero (or above [`Grid::MAX_SIZE`]), a row
    /// count or row length different from the size, a tile whose recorded
    /// position differs from its cell, or a tile with value zero.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let size = snapshot.size;
        if size == 0 {
            return Err(SnapshotError::ZeroSize);
        }
        if size > Self::MAX_SIZE {
            return Err(SnapshotError::TooLarge { size });
        }
        if snapshot.cells.len() != size {
            return Err(SnapshotError::RowCount {
                expected: size,
                found: snapshot.cells.len(),
            });
        }

        let mut grid = Self::new(size);
        for (x, row) in snapshot.cells.iter().enumerate() {
            if row.len() != size {
                return Err(SnapshotError::RowLength {
                    x,
                    expected: size,
                    found: row.len(),
                });
            }
            for (cell, tile) in (Line::Row { x }).positions(size).zip(row) {
                let Some(tile) = tile else {
                    continue;
                };
                let recorded = Position::from(tile.position);
                if recorded != cell {
                    return Err(SnapshotError::MisplacedTile {
                        cell,
                        tile: recorded,
                    });
                }
                let tile = Tile::try_new(cell, tile.value)
                    .ok_or(SnapshotError::ZeroValue { position: cell })?;
                grid.insert_tile(tile);
            }
        }
        Ok(grid)
    }
}

impl From<&Grid> for Snapshot {
    fn from(grid: &Grid) -> Self {
        let size = grid.size();
        let mut cells = Vec::with_capacity(size);
        for x in 0..size {
            let row = Line::Row { x }
                .positions(size)
                .map(|pos| grid.cell_content(pos).map(TileSnapshot::from))
                .collect();
            cells.push(row);
        }
        Self { size, cells }
    }
}

impl TryFrom<&Snapshot> for Grid {
    type Error = SnapshotError;

    fn try_from(snapshot: &Snapshot) -> Result<Self, Self::Error> {
        Self::from_snapshot(snapshot)
    }
}

impl TryFrom<Snapshot> for Grid {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        Self::from_snapshot(&snapshot)
    }
}
