//! Candidate selection: narrowing the empty cells down to the most blocking line.
//!
//! The spawner only scores the empty cells of the line (row or column) that is
//! closest to being full without being full. Filling that line's last gaps is
//! what most restricts the player's next slide.
//!
//! A row is every cell sharing `x` and a column every cell sharing `y`, as
//! defined by [`Line`].

use evil2048_core::{Grid, Line, Position};

/// The axis along which lines are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ScanAxis {
    /// Compare rows.
    Rows,
    /// Compare columns.
    Columns,
}

impl ScanAxis {
    /// Returns the lines of this axis for a board of the given size, in ascending index
    /// order.
    pub fn lines(self, size: usize) -> impl Iterator<Item = Line> {
        (0..size).map(move |i| match self {
            Self::Rows => Line::Row { x: i },
            Self::Columns => Line::Column { y: i },
        })
    }
}

/// Chooses the axis to scan.
///
/// Columns are scanned only when strictly fewer columns than rows are full;
/// otherwise rows are scanned.
#[must_use]
pub fn scan_axis(grid: &Grid) -> ScanAxis {
    let size = grid.size();
    let full_rows = Line::rows(size).filter(|&line| grid.line_full(line)).count();
    let full_columns = Line::columns(size)
        .filter(|&line| grid.line_full(line))
        .count();
    log::trace!("full rows: {full_rows}, full columns: {full_columns}");
    if full_columns < full_rows {
        ScanAxis::Columns
    } else {
        ScanAxis::Rows
    }
}

/// Returns the line of `axis` holding the most tiles while still having a gap.
///
/// Lines that are empty or full are skipped; among the rest the first line with
/// the highest occupancy wins. Returns `None` if every line of the axis is either
/// empty or full.
#[must_use]
pub fn blocking_line(grid: &Grid, axis: ScanAxis) -> Option<Line> {
    let size = grid.size();
    let mut best: Option<(Line, usize)> = None;
    for line in axis.lines(size) {
        let count = grid.line_occupancy(line);
        if count == 0 || count == size {
            continue;
        }
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((line, count));
        }
    }
    best.map(|(line, _)| line)
}

/// Returns the empty cells worth scoring.
///
/// These are the empty cells of the [`blocking_line`] along the [`scan_axis`], in
/// ascending order along the line. If there is no such line (for example on an
/// empty board), every available cell of the board is a candidate, in row-major
/// order. The result is empty only when the board is full.
///
/// # Examples
///
/// ```
/// use evil2048_core::{Grid, Position};
/// use evil2048_spawner::candidate_cells;
///
/// let grid: Grid = "
///     2 4 .
///     . . .
///     . 2 .
/// "
/// .parse()
/// .unwrap();
///
/// // Row 0 has two tiles, more than any other row.
/// assert_eq!(candidate_cells(&grid), [Position::new(0, 2)]);
/// ```
#[must_use]
pub fn candidate_cells(grid: &Grid) -> Vec<Position> {
    let axis = scan_axis(grid);
    match blocking_line(grid, axis) {
        Some(line) => {
            log::trace!("scanning {axis:?}, blocking line is {line}");
            line.positions(grid.size())
                .filter(|&pos| grid.cell_available(pos))
                .collect()
        }
        None => {
            log::trace!("scanning {axis:?}, no partially filled line");
            grid.available_cells().collect()
        }
    }
}
