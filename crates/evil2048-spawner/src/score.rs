//! Neighbour-based ranking of candidate cells.

use evil2048_core::{Grid, Position};

/// How to rank candidates whose neighbour sums are equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TieBreak {
    /// Prefer the candidate with more occupied neighbours, then scan order.
    ///
    /// This is equivalent to adding a small fractional bonus per occupied
    /// neighbour to the integer sum.
    #[default]
    OccupiedNeighbors,
    /// Rank by the neighbour sum alone; the first candidate in scan order wins.
    ScanOrder,
}

/// How "surrounded" an empty cell is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NeighborScore {
    sum: u64,
    occupied: u8,
}

impl NeighborScore {
    /// Scores `pos` from its four orthogonal neighbours.
    ///
    /// Neighbours off the board count as empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use evil2048_core::{Grid, Position};
    /// use evil2048_spawner::NeighborScore;
    ///
    /// let grid: Grid = "
    ///     2 . 4
    ///     . 8 .
    ///     . . .
    /// "
    /// .parse()
    /// .unwrap();
    ///
    /// let score = NeighborScore::of(&grid, Position::new(0, 1));
    /// assert_eq!(score.sum(), 14);
    /// assert_eq!(score.occupied(), 3);
    /// ```
    #[must_use]
    pub fn of(grid: &Grid, pos: Position) -> Self {
        pos.neighbors()
            .into_iter()
            .filter_map(|neighbor| grid.cell_content(neighbor))
            .fold(Self::default(), |score, tile| Self {
                sum: score.sum + u64::from(tile.value()),
                occupied: score.occupied + 1,
            })
    }

    /// Returns the sum of the neighbouring tile values.
    #[must_use]
    pub fn sum(self) -> u64 {
        self.sum
    }

    /// Returns the number of occupied neighbours.
    #[must_use]
    pub fn occupied(self) -> u8 {
        self.occupied
    }

    /// Returns the ranking key under `tie_break`; higher ranks worse for the player.
    #[must_use]
    pub fn rank(self, tie_break: TieBreak) -> (u64, u8) {
        match tie_break {
            TieBreak::OccupiedNeighbors => (self.sum, self.occupied),
            TieBreak::ScanOrder => (self.sum, 0),
        }
    }
}
