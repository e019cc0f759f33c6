use crate::{Grid, SmallVecLine};
use tracing::*;

/// Decodes a single character: `' '` and `'.'` are empty, anything else occupied.
fn cell_occupied(cell: char) -> bool {
    !matches!(cell, ' ' | '.')
}

/// Builds a [`Grid`] from its text form.
///
/// Reading rules follow the original file format:
/// - one grid row per non-blank line; blank lines are skipped,
/// - trailing whitespace is stripped before a line is interpreted,
/// - short lines are padded on the right with empty cells to the longest line,
///   so text input always yields a rectangular grid.
///
/// Parsing never fails; the matcher validates the resulting grid structurally.
///
/// # Example
/// ```
/// use bugscape::parse::grid_from_text;
///
/// let grid = grid_from_text("X.X \n\n.X\n");
/// assert_eq!(grid.row_count(), 2);
/// assert_eq!(grid.col_count(), 3);
/// assert!(!grid.is_occupied(1, 2));
/// ```
pub fn grid_from_text(text: &str) -> Grid {
    trace!("Parsing grid from {} bytes of text", text.len());
    let mut rows: SmallVecLine<Vec<bool>> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(cell_occupied).collect())
        .collect();

    // Trailing blanks are insignificant in the text format, so shorter lines
    // are completed with empty cells.
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, false);
    }

    debug!("Parsed grid with {} rows, {} cols", rows.len(), width);
    Grid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_yaml_snapshot;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case('X', true; "marker is occupied")]
    #[test_case('#', true; "hash is occupied")]
    #[test_case('0', true; "digit is occupied")]
    #[test_case('.', false; "dot is empty")]
    #[test_case(' ', false; "space is empty")]
    fn test_cell_occupied(cell: char, expected: bool) {
        assert_eq!(cell_occupied(cell), expected);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let grid = grid_from_text("X.\n\n.X\n\n");
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
    }

    #[test]
    fn test_short_lines_are_padded() {
        let grid = grid_from_text("XXX\nX\n");
        assert_eq!(grid.col_count(), 3);
        assert!(grid.is_occupied(1, 0));
        assert!(!grid.is_occupied(1, 1));
        assert!(!grid.is_occupied(1, 2));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_trailing_whitespace_is_stripped() {
        let grid = grid_from_text("X.  \n.X\n");
        assert_eq!(grid.col_count(), 2);
        assert!(!grid.is_occupied(0, 1));
    }

    #[test]
    fn test_empty_text_gives_empty_grid() {
        let grid = grid_from_text("");
        assert_eq!(grid.row_count(), 0);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_parse_diagonal_landscape() {
        let grid = grid_from_text("X.X\n.X.\nX.X\n");

        // Assert inline YAML snapshot
        assert_yaml_snapshot!(grid, @r###"
        rows:
          - - true
            - false
            - true
          - - false
            - true
            - false
          - - true
            - false
            - true
        "###);
    }
}
