//! Rows and columns of the board.

use std::{fmt, iter::FusedIterator};

use crate::{Position, grid::to_coord};

/// A row or column of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// A row: every cell sharing the x coordinate.
    Row {
        /// Row index.
        x: usize,
    },
    /// A column: every cell sharing the y coordinate.
    Column {
        /// Column index.
        y: usize,
    },
}

impl Line {
    /// Returns all rows of a board of the given size, x = 0 first.
    pub fn rows(size: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..size).map(|x| Self::Row { x })
    }

    /// Returns all columns of a board of the given size, y = 0 first.
    pub fn columns(size: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..size).map(|y| Self::Column { y })
    }

    /// Returns the row or column index of this line.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row { x } => x,
            Self::Column { y } => y,
        }
    }

    /// Converts an offset along the line into an absolute [`Position`].
    ///
    /// Rows are walked by ascending y, columns by ascending x.
    #[must_use]
    pub fn position_at(self, offset: usize) -> Position {
        match self {
            Self::Row { x } => Position::new(to_coord(x), to_coord(offset)),
            Self::Column { y } => Position::new(to_coord(offset), to_coord(y)),
        }
    }

    /// Returns the positions on this line for a board of the given size.
    ///
    /// `size` must not exceed [`Grid::MAX_SIZE`](crate::Grid::MAX_SIZE).
    ///
    /// # Examples
    ///
    /// ```
    /// use evil2048_core::{Line, Position};
    ///
    /// let row: Vec<_> = Line::Row { x: 1 }.positions(3).collect();
    /// assert_eq!(
    ///     row,
    ///     [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
    /// );
    /// ```
    #[must_use]
    pub fn positions(self, size: usize) -> LinePositions {
        LinePositions {
            line: self,
            front: 0,
            back: size,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row { x } => write!(f, "row {x}"),
            Self::Column { y } => write!(f, "column {y}"),
        }
    }
}

/// Iterator over the positions of a [`Line`].
#[derive(Debug, Clone)]
pub struct LinePositions {
    line: Line,
    front: usize,
    back: usize,
}

impl Iterator for LinePositions {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let pos = self.line.position_at(self.front);
        self.front += 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for LinePositions {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.line.position_at(self.back))
    }
}

impl FusedIterator for LinePositions {}
impl ExactSizeIterator for LinePositions {}
