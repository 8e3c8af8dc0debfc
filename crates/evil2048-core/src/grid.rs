//! Board state.
//!
//! [`Grid`] owns an N×N array of optional [`Tile`]s and answers the cell-level
//! queries a move-resolution engine or a tile spawner needs. Positions outside the
//! board are valid queries and always report an empty cell, so neighbour lookups
//! at the board edge need no special handling.

use std::{fmt, iter::FusedIterator, str::FromStr};

use rand::{Rng, seq::IndexedRandom as _};

use crate::{Line, Position, Tile};

/// Converts a board index into a coordinate.
///
/// Board sizes are capped at [`Grid::MAX_SIZE`], so every index fits in an `i32`.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn to_coord(index: usize) -> i32 {
    debug_assert!(index < Grid::MAX_SIZE);
    index as i32
}

/// The board: a square array of cells, each either empty or holding one [`Tile`].
///
/// A row is every cell sharing the x coordinate (see [`Line`]). Cells are stored
/// row by row, so iteration visits `(0, 0), (0, 1), …, (0, N-1), (1, 0), …`. This
/// is the row-major order used throughout the crate.
///
/// A tile stored at `(x, y)` always reports `position() == (x, y)`; the grid takes
/// tiles by value and never hands out mutable access to them.
///
/// # Examples
///
/// ```
/// use evil2048_core::{Grid, Position, Tile};
///
/// let mut grid = Grid::new(4);
/// grid.insert_tile(Tile::new(Position::new(1, 2), 2));
///
/// assert_eq!(grid.cell_content(Position::new(1, 2)).map(Tile::value), Some(2));
/// assert!(grid.cell_available(Position::new(0, 0)));
/// assert!(grid.cell_available(Position::new(-1, 7))); // off the board
/// assert_eq!(grid.available_cells().count(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// The largest supported board size.
    pub const MAX_SIZE: usize = 1 << 12;

    /// Creates an empty grid of `size × size` cells.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`Grid::MAX_SIZE`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        assert!(
            size <= Self::MAX_SIZE,
            "grid size must be at most {}, got {size}",
            Self::MAX_SIZE
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Returns the board size N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x()).ok()?;
        let y = usize::try_from(pos.y()).ok()?;
        (x < self.size && y < self.size).then_some(x * self.size + y)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new(to_coord(index / self.size), to_coord(index % self.size))
    }

    /// Returns `true` if `pos` lies on the board.
    #[must_use]
    pub fn within_bounds(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Returns the tile at `pos`.
    ///
    /// Returns `None` if the cell is empty or `pos` is outside the board.
    #[must_use]
    pub fn cell_content(&self, pos: Position) -> Option<Tile> {
        self.index_of(pos).and_then(|index| self.cells[index])
    }

    /// Returns `true` if there is no tile at `pos`.
    ///
    /// Positions outside the board are reported as available.
    #[must_use]
    pub fn cell_available(&self, pos: Position) -> bool {
        self.cell_content(pos).is_none()
    }

    /// Returns `true` if a tile occupies `pos`.
    #[must_use]
    pub fn cell_occupied(&self, pos: Position) -> bool {
        self.cell_content(pos).is_some()
    }

    /// Stores `tile` at its own position and returns the tile it replaced.
    ///
    /// No occupancy check is made; callers that must not overwrite should check
    /// [`Grid::cell_available`] first.
    ///
    /// # Panics
    ///
    /// Panics if the tile's position is outside the board.
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        let Some(index) = self.index_of(tile.position()) else {
            panic!(
                "tile position {} is outside a {size}x{size} grid",
                tile.position(),
                size = self.size
            );
        };
        self.cells[index].replace(tile)
    }

    /// Clears the cell at `pos` and returns the tile it held.
    ///
    /// Empty cells and positions outside the board are left untouched.
    pub fn remove_tile(&mut self, pos: Position) -> Option<Tile> {
        let index = self.index_of(pos)?;
        self.cells[index].take()
    }

    /// Returns every cell with its content, in row-major order.
    #[must_use]
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            grid: self,
            front: 0,
            back: self.cells.len(),
        }
    }

    /// Returns every board position in row-major order.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator {
        let size = self.size;
        (0..size * size).map(move |index| {
            Position::new(to_coord(index / size), to_coord(index % size))
        })
    }

    /// Returns the tiles currently on the board, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        self.cells.iter().filter_map(|cell| *cell)
    }

    /// Returns the empty positions in row-major order.
    ///
    /// The iterator borrows the grid, so it always reflects the current state;
    /// call this again to restart.
    #[must_use]
    pub fn available_cells(&self) -> AvailableCells<'_> {
        AvailableCells { cells: self.cells() }
    }

    /// Returns `true` if at least one cell is empty.
    #[must_use]
    pub fn cells_available(&self) -> bool {
        self.available_cells().next().is_some()
    }

    /// Picks an empty position uniformly at random.
    ///
    /// Returns `None` if the board is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use evil2048_core::{Grid, Position, Tile};
    /// use rand::SeedableRng as _;
    ///
    /// let mut grid = Grid::new(2);
    /// grid.insert_tile(Tile::new(Position::new(0, 0), 2));
    ///
    /// let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(7);
    /// let pos = grid.random_available_cell(&mut rng).unwrap();
    /// assert!(grid.cell_available(pos));
    /// ```
    pub fn random_available_cell<R>(&self, rng: &mut R) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        let available = self.available_cells().collect::<Vec<_>>();
        available.choose(rng).copied()
    }

    /// Returns the number of tiles on `line`.
    #[must_use]
    pub fn line_occupancy(&self, line: Line) -> usize {
        line.positions(self.size)
            .filter(|&pos| self.cell_occupied(pos))
            .count()
    }

    /// Returns `true` if every cell of `line` holds a tile.
    #[must_use]
    pub fn line_full(&self, line: Line) -> bool {
        self.line_occupancy(line) == self.size
    }
}

/// Iterator over all cells of a [`Grid`] with their content.
///
/// Created by [`Grid::cells`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    grid: &'a Grid,
    front: usize,
    back: usize,
}

impl Iterator for Cells<'_> {
    type Item = (Position, Option<Tile>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some((self.grid.position_of(index), self.grid.cells[index]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Cells<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some((self.grid.position_of(self.back), self.grid.cells[self.back]))
    }
}

impl FusedIterator for Cells<'_> {}
impl ExactSizeIterator for Cells<'_> {}

/// Iterator over the empty positions of a [`Grid`].
///
/// Created by [`Grid::available_cells`].
#[derive(Debug, Clone)]
pub struct AvailableCells<'a> {
    cells: Cells<'a>,
}

impl Iterator for AvailableCells<'_> {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cells
            .find_map(|(pos, tile)| tile.is_none().then_some(pos))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cells.size_hint().1)
    }
}

impl FusedIterator for AvailableCells<'_> {}

impl fmt::Display for Grid {
    /// Renders the board one row per line, row 0 first, with `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .tiles()
            .map(|tile| tile.value().to_string().len())
            .max()
            .unwrap_or(1);
        for x in 0..self.size {
            if x > 0 {
                writeln!(f)?;
            }
            for (i, pos) in (Line::Row { x }).positions(self.size).enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match self.cell_content(pos) {
                    Some(tile) => write!(f, "{:>width$}", tile.value())?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
        }
        Ok(())
    }
}

/// Error returned when parsing a [`Grid`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The input contained no rows.
    #[display("grid text contains no rows")]
    Empty,
    /// A row had a different number of cells than there are rows.
    #[display("row {x} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        x: usize,
        /// Number of cells every row must have.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
    /// A cell token was neither `.` nor a non-negative integer.
    #[display("invalid cell {token:?} at {position}")]
    InvalidToken {
        /// The unparsable token.
        token: String,
        /// Where the token appeared.
        position: Position,
    },
    /// The grid is larger than [`Grid::MAX_SIZE`].
    #[display("grid has {size} rows, more than the supported maximum")]
    TooLarge {
        /// Number of rows found.
        size: usize,
    },
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses the format produced by [`Display`](fmt::Display).
    ///
    /// Each non-blank line is a row of whitespace-separated cells: the `x`-th line
    /// holds `(x, 0), (x, 1), …`. `.` or `0` marks an empty cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use evil2048_core::{Grid, Position};
    ///
    /// let grid: Grid = "
    ///     2 . .
    ///     . 4 .
    ///     . . 8
    /// "
    /// .parse()
    /// .unwrap();
    /// assert_eq!(grid.size(), 3);
    /// assert_eq!(grid.cell_content(Position::new(1, 1)).unwrap().value(), 4);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let size = rows.len();
        if size == 0 {
            return Err(GridParseError::Empty);
        }
        if size > Self::MAX_SIZE {
            return Err(GridParseError::TooLarge { size });
        }

        let mut grid = Self::new(size);
        for (x, row) in rows.into_iter().enumerate() {
            let tokens = row.split_whitespace().collect::<Vec<_>>();
            if tokens.len() != size {
                return Err(GridParseError::RaggedRow {
                    x,
                    expected: size,
                    found: tokens.len(),
                });
            }
            for (pos, token) in (Line::Row { x }).positions(size).zip(tokens) {
                if token == "." {
                    continue;
                }
                let value = token
                    .parse::<u32>()
                    .map_err(|_| GridParseError::InvalidToken {
                        token: token.to_owned(),
                        position: pos,
                    })?;
                if let Some(tile) = Tile::try_new(pos, value) {
                    grid.insert_tile(tile);
                }
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn tile(x: i32, y: i32, value: u32) -> Tile {
        Tile::new(Position::new(x, y), value)
    }

    mod construction {
        use super::*;

        #[test]
        fn test_new_is_empty() {
            let grid = Grid::new(4);
            assert_eq!(grid.size(), 4);
            assert_eq!(grid.available_cells().count(), 16);
            assert_eq!(grid.tiles().count(), 0);
        }

        #[test]
        #[should_panic(expected = "grid size must be positive")]
        fn test_new_rejects_zero() {
            let _ = Grid::new(0);
        }

        #[test]
        #[should_panic(expected = "grid size must be at most 4096")]
        fn test_new_rejects_oversized() {
            let _ = Grid::new(Grid::MAX_SIZE + 1);
        }

        #[test]
        fn test_single_cell_grid() {
            let mut grid = Grid::new(1);
            assert!(grid.cells_available());
            grid.insert_tile(tile(0, 0, 2));
            assert!(!grid.cells_available());
            assert_eq!(grid.available_cells().next(), None);
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn test_within_bounds() {
            let grid = Grid::new(3);
            assert!(grid.within_bounds(Position::new(0, 0)));
            assert!(grid.within_bounds(Position::new(2, 2)));
            assert!(!grid.within_bounds(Position::new(3, 0)));
            assert!(!grid.within_bounds(Position::new(0, 3)));
            assert!(!grid.within_bounds(Position::new(-1, 0)));
            assert!(!grid.within_bounds(Position::new(0, -1)));
        }

        #[test]
        fn test_out_of_bounds_is_empty() {
            let mut grid = Grid::new(2);
            for pos in grid.positions().collect::<Vec<_>>() {
                grid.insert_tile(Tile::new(pos, 2));
            }
            for pos in [
                Position::new(-1, 0),
                Position::new(2, 0),
                Position::new(0, 2),
                Position::new(i32::MIN, i32::MAX),
            ] {
                assert_eq!(grid.cell_content(pos), None);
                assert!(grid.cell_available(pos));
                assert!(!grid.cell_occupied(pos));
            }
        }

        #[test]
        fn test_insert_and_remove() {
            let mut grid = Grid::new(4);
            let t = tile(1, 3, 8);
            assert_eq!(grid.insert_tile(t), None);
            assert_eq!(grid.cell_content(t.position()), Some(t));
            assert!(grid.cell_occupied(t.position()));

            let replacement = tile(1, 3, 16);
            assert_eq!(grid.insert_tile(replacement), Some(t));
            assert_eq!(grid.cell_content(t.position()), Some(replacement));

            assert_eq!(grid.remove_tile(t.position()), Some(replacement));
            assert_eq!(grid.cell_content(t.position()), None);
            assert_eq!(grid.remove_tile(t.position()), None);
            assert_eq!(grid.remove_tile(Position::new(9, 9)), None);
        }

        #[test]
        #[should_panic(expected = "outside a 2x2 grid")]
        fn test_insert_out_of_bounds_panics() {
            let mut grid = Grid::new(2);
            grid.insert_tile(tile(2, 0, 2));
        }

        #[test]
        fn test_available_cells_order() {
            let mut grid = Grid::new(2);
            grid.insert_tile(tile(0, 1, 2));
            let cells = grid.available_cells().collect::<Vec<_>>();
            assert_eq!(
                cells,
                [Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
            );
            // restartable
            assert_eq!(grid.available_cells().collect::<Vec<_>>(), cells);
        }

        #[test]
        fn test_cells_iterates_row_major() {
            let mut grid = Grid::new(2);
            grid.insert_tile(tile(1, 0, 4));
            let cells = grid.cells().collect::<Vec<_>>();
            assert_eq!(
                cells,
                [
                    (Position::new(0, 0), None),
                    (Position::new(0, 1), None),
                    (Position::new(1, 0), Some(tile(1, 0, 4))),
                    (Position::new(1, 1), None),
                ]
            );
            assert_eq!(grid.cells().rev().next(), Some((Position::new(1, 1), None)));
        }

        #[test]
        fn test_line_occupancy() {
            let grid: Grid = "
                2 2 2
                . 4 .
                . . .
            "
            .parse()
            .unwrap();
            assert_eq!(grid.line_occupancy(Line::Row { x: 0 }), 3);
            assert!(grid.line_full(Line::Row { x: 0 }));
            assert_eq!(grid.line_occupancy(Line::Row { x: 1 }), 1);
            assert_eq!(grid.line_occupancy(Line::Column { y: 1 }), 2);
            assert_eq!(grid.line_occupancy(Line::Column { y: 2 }), 1);
            assert!(!grid.line_full(Line::Column { y: 0 }));
        }

        #[test]
        fn test_row_holds_cells_sharing_x() {
            let mut grid = Grid::new(3);
            grid.insert_tile(tile(1, 0, 2));
            grid.insert_tile(tile(1, 2, 4));
            assert_eq!(grid.line_occupancy(Line::Row { x: 1 }), 2);
            assert_eq!(grid.line_occupancy(Line::Row { x: 0 }), 0);
            assert_eq!(grid.line_occupancy(Line::Column { y: 0 }), 1);
            assert_eq!(grid.line_occupancy(Line::Column { y: 1 }), 0);
        }
    }

    mod random {
        use super::*;

        #[test]
        fn test_full_board_has_no_random_cell() {
            let mut grid = Grid::new(2);
            for pos in grid.positions().collect::<Vec<_>>() {
                grid.insert_tile(Tile::new(pos, 2));
            }
            let mut rng = Pcg64Mcg::seed_from_u64(0);
            assert_eq!(grid.random_available_cell(&mut rng), None);
        }

        #[test]
        fn test_random_cell_reaches_every_available_cell() {
            let mut grid = Grid::new(3);
            grid.insert_tile(tile(1, 1, 2));
            let mut rng = Pcg64Mcg::seed_from_u64(42);
            let mut seen = std::collections::HashSet::new();
            for _ in 0..1000 {
                let pos = grid.random_available_cell(&mut rng).unwrap();
                assert!(grid.cell_available(pos));
                seen.insert(pos);
            }
            assert_eq!(seen.len(), 8);
        }

        #[test]
        fn test_same_seed_same_cell() {
            let grid = Grid::new(4);
            let a = grid.random_available_cell(&mut Pcg64Mcg::seed_from_u64(9));
            let b = grid.random_available_cell(&mut Pcg64Mcg::seed_from_u64(9));
            assert_eq!(a, b);
        }
    }

    mod text {
        use super::*;

        #[test]
        fn test_display() {
            let mut grid = Grid::new(3);
            grid.insert_tile(tile(0, 0, 2));
            grid.insert_tile(tile(1, 2, 128));
            assert_eq!(grid.to_string(), "  2   .   .\n  .   . 128\n  .   .   .");
        }

        #[test]
        fn test_parse_display_agree() {
            let text = "2 . 4 .\n. . . 8\n16 . . .\n. 2 . 2";
            let grid: Grid = text.parse().unwrap();
            assert_eq!(grid.cell_content(Position::new(2, 0)), Some(tile(2, 0, 16)));
            assert_eq!(grid.cell_content(Position::new(1, 3)), Some(tile(1, 3, 8)));
            assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
        }

        #[test]
        fn test_parse_zero_is_empty() {
            let grid: Grid = "0 2\n2 0".parse().unwrap();
            assert!(grid.cell_available(Position::new(0, 0)));
            assert!(grid.cell_occupied(Position::new(1, 0)));
            assert!(grid.cell_occupied(Position::new(0, 1)));
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!("".parse::<Grid>(), Err(GridParseError::Empty));
            assert_eq!(
                "2 2\n2".parse::<Grid>(),
                Err(GridParseError::RaggedRow {
                    x: 1,
                    expected: 2,
                    found: 1
                })
            );
            assert_eq!(
                "2 x\n. .".parse::<Grid>(),
                Err(GridParseError::InvalidToken {
                    token: "x".to_owned(),
                    position: Position::new(0, 1),
                })
            );
        }
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1_usize..=6).prop_flat_map(|size| {
            proptest::collection::vec(proptest::option::of(1_u32..=2048), size * size).prop_map(
                move |values| {
                    let mut grid = Grid::new(size);
                    let positions = grid.positions().collect::<Vec<_>>();
                    for (pos, value) in positions.into_iter().zip(values) {
                        if let Some(value) = value {
                            grid.insert_tile(Tile::new(pos, value));
                        }
                    }
                    grid
                },
            )
        })
    }

    proptest! {
        #[test]
        fn prop_cell_content_never_panics(grid in arb_grid(), x in any::<i32>(), y in any::<i32>()) {
            let pos = Position::new(x, y);
            if !grid.within_bounds(pos) {
                prop_assert_eq!(grid.cell_content(pos), None);
            }
        }

        #[test]
        fn prop_available_cells_partition_board(grid in arb_grid()) {
            let available = grid.available_cells().collect::<Vec<_>>();
            let occupied = grid.tiles().map(Tile::position).collect::<Vec<_>>();
            prop_assert_eq!(available.len() + occupied.len(), grid.size() * grid.size());
            for pos in &available {
                prop_assert!(!occupied.contains(pos));
                prop_assert!(grid.within_bounds(*pos));
            }
            prop_assert_eq!(grid.cells_available(), !available.is_empty());
        }

        #[test]
        fn prop_tiles_sit_at_their_position(grid in arb_grid()) {
            for (pos, tile) in grid.cells() {
                if let Some(tile) = tile {
                    prop_assert_eq!(tile.position(), pos);
                }
            }
        }

        #[test]
        fn prop_queries_are_idempotent(grid in arb_grid()) {
            let first = grid.available_cells().collect::<Vec<_>>();
            let second = grid.available_cells().collect::<Vec<_>>();
            prop_assert_eq!(first, second);
            for pos in grid.positions() {
                prop_assert_eq!(grid.cell_content(pos), grid.cell_content(pos));
            }
        }

        #[test]
        fn prop_insert_then_remove(mut grid in arb_grid(), value in 1_u32..=4096) {
            let pos = Position::new(0, 0);
            let tile = Tile::new(pos, value);
            grid.insert_tile(tile);
            prop_assert_eq!(grid.cell_content(pos), Some(tile));
            prop_assert_eq!(grid.remove_tile(pos), Some(tile));
            prop_assert_eq!(grid.cell_content(pos), None);
        }
    }
}
