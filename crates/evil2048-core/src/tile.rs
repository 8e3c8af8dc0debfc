//! Numbered tiles.

use std::fmt;

use crate::Position;

/// A numbered tile placed at a board position.
///
/// Tiles are immutable. Sliding a tile is modelled by removing it from the grid
/// and inserting [`Tile::moved_to`] at the destination; merging inserts a new tile
/// with the combined value.
///
/// # Examples
///
/// ```
/// use evil2048_core::{Position, Tile};
///
/// let tile = Tile::new(Position::new(0, 1), 2);
/// let moved = tile.moved_to(Position::new(3, 1));
///
/// assert_eq!(moved.position(), Position::new(3, 1));
/// assert_eq!(moved.value(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    position: Position,
    value: u32,
}

impl Tile {
    /// Creates a new tile.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero.
    #[must_use]
    pub const fn new(position: Position, value: u32) -> Self {
        assert!(value > 0, "tile value must be positive");
        Self { position, value }
    }

    /// Creates a new tile, or returns `None` if `value` is zero.
    #[must_use]
    pub const fn try_new(position: Position, value: u32) -> Option<Self> {
        if value == 0 {
            return None;
        }
        Some(Self { position, value })
    }

    /// Returns the position the tile occupies.
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }

    /// Returns the tile value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Returns a tile with the same value at `position`.
    #[must_use]
    pub const fn moved_to(self, position: Position) -> Self {
        Self { position, ..self }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.value, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "tile value must be positive")]
    fn test_new_rejects_zero() {
        let _ = Tile::new(Position::new(0, 0), 0);
    }

    #[test]
    fn test_try_new() {
        assert_eq!(Tile::try_new(Position::new(0, 0), 0), None);
        assert_eq!(
            Tile::try_new(Position::new(1, 1), 4),
            Some(Tile::new(Position::new(1, 1), 4))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::new(Position::new(2, 0), 8).to_string(), "8@(2, 0)");
    }
}
