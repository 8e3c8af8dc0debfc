//! Board coordinates.

use std::fmt;

/// A cell coordinate on the board.
///
/// `x` selects the row a cell belongs to and `y` the cell's place within that row
/// (its column). Both are signed so that positions just past the board edge, such
/// as the `x - 1` neighbour of a cell in row 0, can be expressed and queried
/// without special-casing. Whether a position actually lies on a board
/// is decided by [`Grid::within_bounds`](crate::Grid::within_bounds).
///
/// # Examples
///
/// ```
/// use evil2048_core::Position;
///
/// let pos = Position::new(1, 2);
/// assert_eq!(pos.x(), 1);
/// assert_eq!(pos.y(), 2);
/// assert_eq!(pos.to_string(), "(1, 2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the row coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Returns the column coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Returns the four orthogonally adjacent positions.
    ///
    /// The order is fixed: `x - 1`, `x + 1`, `y + 1`, `y - 1`. The returned
    /// positions are not clipped to any board; coordinates wrap at the `i32` range
    /// so that a neighbour of an extreme position is still a (far out of bounds)
    /// position rather than an overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use evil2048_core::Position;
    ///
    /// let neighbors = Position::new(0, 0).neighbors();
    /// assert_eq!(
    ///     neighbors,
    ///     [
    ///         Position::new(-1, 0),
    ///         Position::new(1, 0),
    ///         Position::new(0, 1),
    ///         Position::new(0, -1),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        let Self { x, y } = self;
        [
            Self::new(x.wrapping_sub(1), y),
            Self::new(x.wrapping_add(1), y),
            Self::new(x, y.wrapping_add(1)),
            Self::new(x, y.wrapping_sub(1)),
        ]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
