//! Minimum/maximum search with first-occurrence tie-break.
//!
//! Every scan runs left to right (row-major for grids) and only replaces
//! the running extreme with a strictly more extreme value, so among equal
//! extremes the earliest index always wins.
//!
//! All searches require a non-empty input and panic otherwise.

use crate::grid::{ElevationGrid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremeMode {
    Min,
    Max,
}

impl ExtremeMode {
    /// Whether `candidate` should displace `current`. Equal never does.
    #[inline]
    pub fn is_more_extreme<T: Ord>(self, candidate: &T, current: &T) -> bool {
        match self {
            ExtremeMode::Min => candidate < current,
            ExtremeMode::Max => candidate > current,
        }
    }
}

/// An extreme value and where it first occurs in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extreme<T> {
    pub value: T,
    pub position: Position,
}

/// Index and value of the first extreme in `sequence`.
pub fn locate<T: Ord + Copy>(sequence: &[T], mode: ExtremeMode) -> (usize, T) {
    let (first, rest) = sequence
        .split_first()
        .expect("extreme search requires a non-empty sequence");

    let mut best = (0, *first);
    for (offset, value) in rest.iter().enumerate() {
        if mode.is_more_extreme(value, &best.1) {
            best = (offset + 1, *value);
        }
    }
    best
}

pub fn find<T: Ord + Copy>(sequence: &[T], mode: ExtremeMode) -> T {
    locate(sequence, mode).1
}

pub fn find_index<T: Ord + Copy>(sequence: &[T], mode: ExtremeMode) -> usize {
    locate(sequence, mode).0
}

/// First extreme over rows-of-rows.
///
/// Each row's extreme is found first, then rows are compared with the same
/// strictly-more rule, so the winner is the lowest row-major index.
pub fn locate_in_grid<T, R>(rows: &[R], mode: ExtremeMode) -> Extreme<T>
where
    T: Ord + Copy,
    R: AsRef<[T]>,
{
    let (first, rest) = rows
        .split_first()
        .expect("extreme search requires at least one row");

    let (col, value) = locate(first.as_ref(), mode);
    let mut best = Extreme {
        value,
        position: Position::new(0, col),
    };

    for (offset, row) in rest.iter().enumerate() {
        let (col, value) = locate(row.as_ref(), mode);
        if mode.is_more_extreme(&value, &best.value) {
            best = Extreme {
                value,
                position: Position::new(offset + 1, col),
            };
        }
    }
    best
}

pub fn find_in_grid<T, R>(rows: &[R], mode: ExtremeMode) -> T
where
    T: Ord + Copy,
    R: AsRef<[T]>,
{
    locate_in_grid(rows, mode).value
}

pub fn find_index_in_grid<T, R>(rows: &[R], mode: ExtremeMode) -> Position
where
    T: Ord + Copy,
    R: AsRef<[T]>,
{
    locate_in_grid(rows, mode).position
}

impl ElevationGrid {
    pub fn extreme(&self, mode: ExtremeMode) -> Extreme<i32> {
        locate_in_grid(self.as_rows(), mode)
    }

    /// Lowest elevation (the base) and where it first occurs.
    pub fn lowest(&self) -> Extreme<i32> {
        self.extreme(ExtremeMode::Min)
    }

    /// Highest elevation (the peak) and where it first occurs.
    pub fn highest(&self) -> Extreme<i32> {
        self.extreme(ExtremeMode::Max)
    }
}
