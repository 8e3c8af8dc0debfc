//! The spawner itself and the merge-avoiding value rule.

use evil2048_core::{Grid, Position, Tile};

use crate::{NeighborScore, TieBreak, candidate_cells};

/// Options controlling [`AdversarialSpawner`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnerOptions {
    /// How candidates with equal neighbour sums are ranked.
    pub tie_break: TieBreak,
}

/// Chooses the tile that is least helpful to the player.
///
/// The spawner holds no game state: each call inspects the grid afresh and the
/// result depends only on the grid and the options.
///
/// # Algorithm
///
/// 1. Narrow the empty cells to the gaps of the most blocking line
///    (see [`candidate_cells`]).
/// 2. Among those, pick the cell whose orthogonal neighbours add up to the
///    highest value (see [`NeighborScore`]); the first candidate wins ties.
/// 3. Spawn a 4 if that cell touches a 2 but no 4, so the new tile cannot merge
///    with its neighbour right away; otherwise spawn a 2.
///
/// # Examples
///
/// ```
/// use evil2048_core::{Grid, Position};
/// use evil2048_spawner::AdversarialSpawner;
///
/// let grid: Grid = "
///     . . . .
///     . 2 . .
///     . . . .
///     . . . .
/// "
/// .parse()
/// .unwrap();
///
/// let tile = AdversarialSpawner::new().spawn(&grid).unwrap();
/// assert_eq!(tile.position(), Position::new(1, 0));
/// assert_eq!(tile.value(), 4);
/// ```
#[derive(Debug, Default, Clone)]
pub struct AdversarialSpawner {
    options: SpawnerOptions,
}

impl AdversarialSpawner {
    /// Creates a spawner with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spawner with the given options.
    #[must_use]
    pub fn with_options(options: SpawnerOptions) -> Self {
        Self { options }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &SpawnerOptions {
        &self.options
    }

    /// Returns the tile to spawn next, or `None` if the board is full.
    #[must_use]
    pub fn spawn(&self, grid: &Grid) -> Option<Tile> {
        let candidates = candidate_cells(grid);
        let Some(pos) = self.worst_cell(grid, candidates) else {
            log::debug!("no empty cell to spawn into");
            return None;
        };
        let tile = Tile::new(pos, worst_value_for_cell(grid, pos));
        log::debug!("spawning {tile}");
        Some(tile)
    }

    /// Spawns the next tile directly into `grid` and returns it.
    ///
    /// Leaves the grid untouched and returns `None` if the board is full.
    pub fn spawn_into(&self, grid: &mut Grid) -> Option<Tile> {
        let tile = self.spawn(grid)?;
        grid.insert_tile(tile);
        Some(tile)
    }

    /// Returns the candidate with the highest [`NeighborScore`].
    ///
    /// Candidates are ranked according to the configured [`TieBreak`]; among
    /// equally ranked candidates the first one wins. Returns `None` if
    /// `candidates` is empty.
    pub fn worst_cell<I>(&self, grid: &Grid, candidates: I) -> Option<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        let tie_break = self.options.tie_break;
        let mut best: Option<(Position, (u64, u8))> = None;
        for pos in candidates {
            let rank = NeighborScore::of(grid, pos).rank(tie_break);
            log::trace!("candidate {pos}: {rank:?}");
            if best.is_none_or(|(_, best_rank)| rank > best_rank) {
                best = Some((pos, rank));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

/// Returns the value that denies an immediate merge at `pos`.
///
/// A cell next to a 2 but not next to any 4 gets a 4; every other cell gets a 2.
///
/// # Examples
///
/// ```
/// use evil2048_core::{Grid, Position};
/// use evil2048_spawner::worst_value_for_cell;
///
/// let grid: Grid = "
///     2 . 4
///     . . .
///     . . .
/// "
/// .parse()
/// .unwrap();
///
/// assert_eq!(worst_value_for_cell(&grid, Position::new(1, 0)), 4);
/// assert_eq!(worst_value_for_cell(&grid, Position::new(0, 1)), 2);
/// assert_eq!(worst_value_for_cell(&grid, Position::new(1, 1)), 2);
/// ```
#[must_use]
pub fn worst_value_for_cell(grid: &Grid, pos: Position) -> u32 {
    let mut touches_two = false;
    let mut touches_four = false;
    for tile in pos
        .neighbors()
        .into_iter()
        .filter_map(|neighbor| grid.cell_content(neighbor))
    {
        match tile.value() {
            2 => touches_two = true,
            4 => touches_four = true,
            _ => {}
        }
    }
    if touches_two && !touches_four { 4 } else { 2 }
}
