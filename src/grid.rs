use std::collections::TryReserveError;
use std::fmt;
use std::fs;
use std::mem;
use std::path::Path as FsPath;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::report::OutputSink;
use crate::{Result, WalkError};

/// A cell address in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid size as encoded in a source identifier such as `colorado_480x480.dat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    /// Parse `cols` and `rows` from the `_<cols>x<rows>.<ext>` suffix.
    ///
    /// `cols` sits between the last `_` and the last `x`; `rows` between
    /// that `x` and the last `.`. Both must be positive and the cell count
    /// must be addressable.
    pub fn parse(identifier: &str) -> Result<Self> {
        let invalid = || WalkError::InvalidDimensions {
            identifier: identifier.to_string(),
        };

        let underscore = identifier.rfind('_').ok_or_else(invalid)?;
        let delimiter = identifier.rfind('x').ok_or_else(invalid)?;
        let extension = identifier.rfind('.').ok_or_else(invalid)?;

        if !(underscore < delimiter && delimiter < extension) {
            return Err(invalid());
        }

        let cols: usize = identifier[underscore + 1..delimiter]
            .parse()
            .map_err(|_| invalid())?;
        let rows: usize = identifier[delimiter + 1..extension]
            .parse()
            .map_err(|_| invalid())?;

        let dimensions = Dimensions { rows, cols };
        if rows == 0 || cols == 0 || dimensions.cell_count().is_none() {
            return Err(invalid());
        }

        Ok(dimensions)
    }

    /// Number of cells, or `None` when the samples would not fit in memory
    /// the allocator can address.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows
            .checked_mul(self.cols)
            .filter(|&cells| {
                cells
                    .checked_mul(mem::size_of::<i32>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
    }
}

/// A loaded grid plus whatever went wrong while filling it.
#[derive(Debug)]
pub struct LoadReport {
    pub grid: ElevationGrid,
    /// Set when the body could not be read or stopped parsing early.
    /// The grid is still usable; unfilled cells are zero.
    pub issue: Option<WalkError>,
}

impl LoadReport {
    pub fn is_degraded(&self) -> bool {
        self.issue.is_some()
    }
}

/// Row-major elevation samples with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationGrid {
    grid: Vec<Vec<i32>>,
    pub rows: usize,
    pub cols: usize,
}

impl ElevationGrid {
    pub fn new(grid: Vec<Vec<i32>>) -> Result<Self> {
        let rows = grid.len();
        if rows == 0 {
            return Err(WalkError::InvalidShape);
        }

        let cols = grid[0].len();
        if cols == 0 {
            return Err(WalkError::InvalidShape);
        }

        if grid.iter().any(|row| row.len() != cols) {
            return Err(WalkError::InvalidShape);
        }

        Ok(ElevationGrid { grid, rows, cols })
    }

    /// All-zero grid of the given size, failing instead of aborting when
    /// the allocation cannot be made.
    pub fn zeroed(dimensions: Dimensions) -> std::result::Result<Self, TryReserveError> {
        let mut grid = Vec::new();
        grid.try_reserve_exact(dimensions.rows)?;
        for _ in 0..dimensions.rows {
            let mut row = Vec::new();
            row.try_reserve_exact(dimensions.cols)?;
            row.resize(dimensions.cols, 0);
            grid.push(row);
        }

        Ok(ElevationGrid {
            grid,
            rows: dimensions.rows,
            cols: dimensions.cols,
        })
    }

    /// Load a grid whose size is encoded in `source` and whose samples are
    /// the file's whitespace-separated integers.
    ///
    /// Only an unparsable identifier is an `Err`. An unreadable file or a
    /// bad token is reported to `sink`, logged, and returned in
    /// [`LoadReport::issue`] alongside a grid that is zero where unfilled.
    pub fn load(source: impl AsRef<FsPath>, sink: &mut dyn OutputSink) -> Result<LoadReport> {
        let source = source.as_ref();
        let identifier = source.to_string_lossy();
        let dimensions = Dimensions::parse(&identifier)?;

        debug!(
            rows = dimensions.rows,
            cols = dimensions.cols,
            source = %identifier,
            "Parsed grid dimensions"
        );

        let start = Instant::now();
        let mut grid = Self::zeroed(dimensions).map_err(|e| {
            warn!(error = %e, rows = dimensions.rows, cols = dimensions.cols, "Grid allocation failed");
            WalkError::InvalidDimensions {
                identifier: identifier.to_string(),
            }
        })?;

        let issue = match fs::read_to_string(source) {
            Ok(body) => grid.fill(&body).err(),
            Err(source) => Some(WalkError::Io {
                path: identifier.to_string(),
                source,
            }),
        };

        match &issue {
            Some(err) => {
                warn!(error = %err, "Grid load degraded; unfilled cells stay zero");
                sink.line(&Self::describe_issue(err));
            }
            None => info!(
                rows = grid.rows,
                cols = grid.cols,
                elapsed = ?start.elapsed(),
                "Grid loaded"
            ),
        }

        Ok(LoadReport { grid, issue })
    }

    /// Fill cells in row-major order from whitespace-separated integers.
    ///
    /// Short input leaves the tail at zero and excess input is ignored.
    /// Returns how many cells were filled, or the first token that was not
    /// an integer (cells from there on are left as they were).
    pub fn fill(&mut self, body: &str) -> Result<usize> {
        let capacity = self.rows * self.cols;
        let mut tokens = body.split_whitespace();

        for index in 0..capacity {
            let token = match tokens.next() {
                Some(token) => token,
                None => return Ok(index),
            };

            let value: i32 = token.parse().map_err(|_| WalkError::MalformedValue {
                token: token.to_string(),
                index,
            })?;

            self.grid[index / self.cols][index % self.cols] = value;
        }

        Ok(capacity)
    }

    fn describe_issue(err: &WalkError) -> String {
        match err {
            WalkError::Io { path, .. } => {
                format!("There was a problem opening or reading the file: {}", path)
            }
            _ => "Unable to parse values from file. Please make sure the data is intact.".to_string(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Elevation at `position`. Panics when out of bounds.
    pub fn elevation(&self, position: Position) -> i32 {
        self.grid[position.row][position.col]
    }

    pub fn as_rows(&self) -> &[Vec<i32>] {
        &self.grid
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Recorded;
    use std::io::Write;

    #[test]
    fn test_parse_dimensions() {
        let dims = Dimensions::parse("Colorado_844x480.dat").unwrap();
        assert_eq!(dims, Dimensions { rows: 480, cols: 844 });
        assert_eq!(dims.cell_count(), Some(844 * 480));
    }

    #[test]
    fn test_parse_dimensions_uses_last_separators() {
        let dims = Dimensions::parse("data/my_map_v2_3x7.dat").unwrap();
        assert_eq!(dims, Dimensions { rows: 7, cols: 3 });
    }

    #[test]
    fn test_parse_dimensions_rejects_bad_identifiers() {
        for bad in [
            "no_dimensions.dat",
            "map_3x3",
            "map3x3.dat",
            "map_ax3.dat",
            "map_3xb.dat",
            "map_0x3.dat",
            "map_3x0.dat",
            "map_-1x3.dat",
            "map_4000000000x4000000000.dat",
            "map_3000000000x1000000000.dat",
        ] {
            let err = Dimensions::parse(bad).unwrap_err();
            assert!(
                matches!(err, WalkError::InvalidDimensions { .. }),
                "{} should be rejected",
                bad
            );
            assert!(!err.is_degraded_load());
        }
    }

    #[test]
    fn test_new_rejects_ragged_and_empty() {
        assert!(ElevationGrid::new(vec![]).is_err());
        assert!(ElevationGrid::new(vec![vec![]]).is_err());
        assert!(ElevationGrid::new(vec![vec![1, 2], vec![3]]).is_err());
        let grid = ElevationGrid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(grid.dimensions(), Dimensions { rows: 2, cols: 2 });
    }

    #[test]
    fn test_cell_count_limits() {
        assert_eq!(Dimensions { rows: 3, cols: 4 }.cell_count(), Some(12));
        assert_eq!(Dimensions { rows: usize::MAX, cols: 2 }.cell_count(), None);
        assert_eq!(Dimensions { rows: 1, cols: usize::MAX / 4 }.cell_count(), None);
    }

    #[test]
    fn test_zeroed_reports_allocation_failure() {
        // Byte size exceeds isize::MAX, so the reservation fails without allocating
        let huge = Dimensions { rows: 1, cols: usize::MAX / 4 };
        assert!(ElevationGrid::zeroed(huge).is_err());

        let grid = ElevationGrid::zeroed(Dimensions { rows: 2, cols: 3 }).unwrap();
        assert_eq!(grid.as_rows(), &[vec![0, 0, 0], vec![0, 0, 0]]);
    }

    #[test]
    fn test_load_oversized_dimensions_is_fatal() {
        let mut sink = Recorded::new();
        let err = ElevationGrid::load("map_4000000000x4000000000.dat", &mut sink).unwrap_err();
        assert!(matches!(err, WalkError::InvalidDimensions { .. }));
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn test_fill_row_major() {
        let mut grid = ElevationGrid::zeroed(Dimensions { rows: 2, cols: 3 }).unwrap();
        let filled = grid.fill("1 2 3\n4 5 6\n").unwrap();
        assert_eq!(filled, 6);
        assert_eq!(grid.as_rows(), &[vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(grid.elevation(Position::new(1, 0)), 4);
    }

    #[test]
    fn test_fill_short_input_zero_pads() {
        let mut grid = ElevationGrid::zeroed(Dimensions { rows: 2, cols: 2 }).unwrap();
        let filled = grid.fill("7\n  -3").unwrap();
        assert_eq!(filled, 2);
        assert_eq!(grid.as_rows(), &[vec![7, -3], vec![0, 0]]);
    }

    #[test]
    fn test_fill_ignores_excess() {
        let mut grid = ElevationGrid::zeroed(Dimensions { rows: 1, cols: 2 }).unwrap();
        assert_eq!(grid.fill("1 2 3 4 5").unwrap(), 2);
        assert_eq!(grid.as_rows(), &[vec![1, 2]]);
    }

    #[test]
    fn test_fill_stops_at_malformed_token() {
        let mut grid = ElevationGrid::zeroed(Dimensions { rows: 2, cols: 2 }).unwrap();
        let err = grid.fill("1 2 oops 4").unwrap_err();
        match err {
            WalkError::MalformedValue { token, index } => {
                assert_eq!(token, "oops");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(grid.as_rows(), &[vec![1, 2], vec![0, 0]]);
    }

    #[test]
    fn test_fill_rejects_out_of_range_integers() {
        let mut grid = ElevationGrid::zeroed(Dimensions { rows: 1, cols: 2 }).unwrap();
        assert!(grid.fill("5 99999999999").is_err());
        assert_eq!(grid.as_rows(), &[vec![5, 0]]);
    }

    #[test]
    fn test_contains_bounds() {
        let grid = ElevationGrid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert!(grid.contains(Position::new(1, 1)));
        assert!(!grid.contains(Position::new(2, 0)));
        assert!(!grid.contains(Position::new(1, 2)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ridge_3x2.dat");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "1 2 3").unwrap();
        writeln!(file, "4 5").unwrap();

        let mut sink = Recorded::new();
        let report = ElevationGrid::load(&path, &mut sink).unwrap();
        assert!(!report.is_degraded());
        assert!(sink.lines.is_empty());
        assert_eq!(report.grid.as_rows(), &[vec![1, 2, 3], vec![4, 5, 0]]);
    }

    #[test]
    fn test_load_missing_file_is_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent_2x2.dat");

        let mut sink = Recorded::new();
        let report = ElevationGrid::load(&path, &mut sink).unwrap();
        assert!(matches!(report.issue, Some(WalkError::Io { .. })));
        assert!(report.issue.as_ref().unwrap().is_degraded_load());
        assert!(sink.contains("There was a problem opening or reading the file"));
        assert_eq!(report.grid.as_rows(), &[vec![0, 0], vec![0, 0]]);
    }

    #[test]
    fn test_load_malformed_file_is_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken_2x1.dat");
        std::fs::write(&path, "8 x").unwrap();

        let mut sink = Recorded::new();
        let report = ElevationGrid::load(&path, &mut sink).unwrap();
        assert!(matches!(report.issue, Some(WalkError::MalformedValue { .. })));
        assert!(sink.contains("Unable to parse values from file"));
        assert_eq!(report.grid.as_rows(), &[vec![8, 0]]);
    }

    #[test]
    fn test_load_bad_identifier_is_fatal() {
        let mut sink = Recorded::new();
        let err = ElevationGrid::load("nodims.dat", &mut sink).unwrap_err();
        assert!(matches!(err, WalkError::InvalidDimensions { .. }));
    }
}
