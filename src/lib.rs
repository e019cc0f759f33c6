//! This crate counts placements of a small binary "bug" pattern inside a larger
//! binary "landscape" pattern. A placement matches when every occupied bug cell
//! lands on an occupied landscape cell; landscape cells under empty bug cells are
//! unconstrained. Only exact translation alignment is searched: no rotations,
//! reflections, or partial matches.

/// Text-format grid loading (one row per line, `' '`/`'.'` empty, anything else
/// occupied).
///
/// # Example
/// ```
/// use bugscape::parse::grid_from_text;
///
/// let landscape = grid_from_text("X.X\n.X.\nX.X\n");
/// assert_eq!(landscape.row_count(), 3);
/// assert_eq!(landscape.col_count(), 3);
/// ```
pub mod parse;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::*;

// Determined through benchmarking typical use cases
const DEFAULT_SMALLVEC_SIZE: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid is empty (zero rows or zero columns)")]
    EmptyGrid,

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecLine<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;

/// The number of matching placements of a bug within a landscape.
pub type MatchCount = usize;

/// Configuration for the placement search.
///
/// # Example
/// ```
/// use bugscape::MatchConfig;
///
/// let config = MatchConfig::default();
/// assert_eq!(config.enable_parallel, true);
/// ```
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Enable parallel scanning of placement rows (default: true)
    pub enable_parallel: bool,
}

impl MatchConfig {
    /// Creates a new `MatchConfig` with the specified parameters.
    ///
    /// # Example
    /// ```
    /// use bugscape::MatchConfig;
    ///
    /// let config = MatchConfig::new(false);
    /// assert_eq!(config.enable_parallel, false);
    /// ```
    pub fn new(enable_parallel: bool) -> Self {
        Self { enable_parallel }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig::new(true)
    }
}

/// A rectangular boolean matrix of occupied (`true`) and empty (`false`) cells,
/// stored row-major with one `Vec<bool>` per row.
///
/// The field is public so collaborators (parsers, test fixtures) can build grids
/// directly; structural invariants are checked by [`Grid::validate`], which the
/// matcher runs on both inputs before searching.
///
/// # Example
/// ```
/// use bugscape::grid;
///
/// let landscape = grid!["X.X", ".X.", "X.X"];
/// assert_eq!(landscape.occupied_cells(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    pub rows: SmallVecLine<Vec<bool>>,
}

impl Grid {
    /// Creates a new `Grid` from pre-built rows without validation.
    pub fn new(rows: SmallVecLine<Vec<bool>>) -> Self {
        Self { rows }
    }

    /// Creates a new `Grid` by collecting rows from an iterator.
    ///
    /// # Example
    /// ```
    /// use bugscape::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec![true, false], vec![false, true]]);
    /// assert_eq!(grid.row_count(), 2);
    /// assert_eq!(grid.col_count(), 2);
    /// ```
    pub fn from_rows(rows: impl IntoIterator<Item = Vec<bool>>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns, taken from the first row.
    ///
    /// Only meaningful for grids that pass [`Grid::validate`].
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Returns whether the cell at `(row, col)` is occupied.
    ///
    /// # Panics
    /// Panics if `(row, col)` is out of bounds.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    /// Counts the occupied cells in the grid.
    ///
    /// # Example
    /// ```
    /// use bugscape::grid;
    ///
    /// let grid = grid!["X.", ".X"];
    /// assert_eq!(grid.occupied_cells(), 2);
    /// ```
    pub fn occupied_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&cell| cell).count())
            .sum()
    }

    /// Checks the structural invariants: at least one row, at least one column,
    /// and every row of identical length.
    ///
    /// # Errors
    /// Returns [`GridError::EmptyGrid`] or [`GridError::RaggedRow`].
    ///
    /// # Example
    /// ```
    /// use bugscape::{Grid, GridError, SmallVecLine};
    ///
    /// let grid = Grid::new(SmallVecLine::new());
    /// assert_eq!(grid.validate(), Err(GridError::EmptyGrid));
    /// ```
    pub fn validate(&self) -> Result<(), GridError> {
        let expected = match self.rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                error!(
                    "Invalid grid dimensions: rows={}, cols={}",
                    self.row_count(),
                    self.col_count()
                );
                return Err(GridError::EmptyGrid);
            }
        };

        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                error!(
                    "Ragged grid: row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    expected
                );
                return Err(GridError::RaggedRow {
                    row,
                    expected,
                    actual: cells.len(),
                });
            }
        }

        Ok(())
    }
}

/// Counts the placements of `bug` within `landscape` using the default
/// configuration.
///
/// A placement `(r, c)` matches when every occupied bug cell `(i, j)` lands on
/// an occupied landscape cell `(r + i, c + j)`. Empty bug cells impose no
/// constraint, so a bug with zero occupied cells matches every in-bounds
/// placement. A bug larger than the landscape in either dimension yields zero.
///
/// # Errors
/// Returns [`GridError`] if either grid is empty or non-rectangular.
///
/// # Example
/// ```
/// use bugscape::{count_matches, grid};
///
/// let landscape = grid!["X.X", ".X.", "X.X"];
/// let bug = grid!["X.", ".X"];
/// assert_eq!(count_matches(&bug, &landscape), Ok(2));
/// ```
pub fn count_matches(bug: &Grid, landscape: &Grid) -> Result<MatchCount, GridError> {
    count_matches_with_config(bug, landscape, &MatchConfig::default())
}

/// Counts the placements of `bug` within `landscape` with a custom
/// configuration.
///
/// The parallel and sequential paths enumerate the same placements and always
/// agree on the count.
///
/// # Errors
/// Returns [`GridError`] if either grid is empty or non-rectangular.
///
/// # Example
/// ```
/// use bugscape::{count_matches_with_config, grid, MatchConfig};
///
/// let landscape = grid!["XXXX"];
/// let bug = grid!["XX"];
/// let config = MatchConfig::new(false);
/// assert_eq!(count_matches_with_config(&bug, &landscape, &config), Ok(3));
/// ```
pub fn count_matches_with_config(
    bug: &Grid,
    landscape: &Grid,
    config: &MatchConfig,
) -> Result<MatchCount, GridError> {
    trace!("Counting matches with config: {:?}", config);
    bug.validate()?;
    landscape.validate()?;

    // A bug that does not fit has no valid placement.
    if bug.row_count() > landscape.row_count() || bug.col_count() > landscape.col_count() {
        debug!(
            "Bug ({}x{}) larger than landscape ({}x{}), zero placements",
            bug.row_count(),
            bug.col_count(),
            landscape.row_count(),
            landscape.col_count()
        );
        return Ok(0);
    }

    let row_span = landscape.row_count() - bug.row_count() + 1;

    // Placements in different rows are independent, so the outer loop can be
    // split across threads and the partial counts summed.
    let count = if config.enable_parallel {
        use rayon::prelude::*;
        (0..row_span)
            .into_par_iter()
            .map(|r| count_matches_in_row(bug, landscape, r))
            .sum()
    } else {
        (0..row_span)
            .map(|r| count_matches_in_row(bug, landscape, r))
            .sum()
    };

    Ok(count)
}

/// Counts matching placements with row offset `r`, scanning every column offset.
fn count_matches_in_row(bug: &Grid, landscape: &Grid, r: usize) -> MatchCount {
    trace!("Scanning placement row r={}", r);
    let col_span = landscape.col_count() - bug.col_count() + 1;
    (0..col_span)
        .filter(|&c| matches_at(bug, landscape, r, c))
        .count()
}

/// Tests whether `bug` matches `landscape` at the placement `(r, c)`.
///
/// Short-circuits on the first occupied bug cell that lands on an empty
/// landscape cell.
///
/// # Panics
/// Panics if the translated bug does not fit within the landscape bounds.
///
/// # Example
/// ```
/// use bugscape::{grid, matches_at};
///
/// let landscape = grid!["X.X", ".X.", "X.X"];
/// let bug = grid!["X.", ".X"];
/// assert!(matches_at(&bug, &landscape, 0, 0));
/// assert!(!matches_at(&bug, &landscape, 0, 1));
/// ```
pub fn matches_at(bug: &Grid, landscape: &Grid, r: usize, c: usize) -> bool {
    bug.rows.iter().enumerate().all(|(i, bug_row)| {
        bug_row
            .iter()
            .enumerate()
            .all(|(j, &occupied)| !occupied || landscape.rows[r + i][c + j])
    })
}

/// Creates a [`Grid`] from string-literal rows.
///
/// Each argument is one row; `' '` and `'.'` decode to empty cells, any other
/// character to occupied cells. Rows are taken verbatim, so the macro can also
/// build ragged grids for validation tests.
///
/// # Examples
///
/// ```rust
/// use bugscape::grid;
///
/// let bug = grid![
///     "X.",
///     ".X",
/// ];
/// assert_eq!(bug.row_count(), 2);
/// assert_eq!(bug.col_count(), 2);
/// assert!(bug.is_occupied(0, 0));
/// assert!(!bug.is_occupied(0, 1));
/// ```
#[macro_export]
macro_rules! grid {
    [$($line:expr),+ $(,)?] => {
        $crate::Grid::from_rows([$($line),+].into_iter().map(|line: &str| {
            line.chars()
                .map(|cell| !matches!(cell, ' ' | '.'))
                .collect::<Vec<bool>>()
        }))
    };
}
