use std::fmt;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::config::DISABLE_MIDDLE_PRIORITY_FLAG;
use crate::extreme::{locate, ExtremeMode};
use crate::grid::{ElevationGrid, Position};

/// Row movement for one step to the next column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Forward,
    Down,
}

impl Direction {
    pub fn delta(self) -> i8 {
        match self {
            Direction::Up => -1,
            Direction::Forward => 0,
            Direction::Down => 1,
        }
    }
}

/// How to break ties between equally cheap next steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Forward wins any tie it is part of; only an up/down tie is random.
    #[default]
    MiddlePriority,
    /// A two-way tie between forward and up (or down) is a coin flip,
    /// unless the row sits on the edge that makes the sideways move
    /// impossible, in which case forward is kept.
    DisableMiddlePriority,
}

impl TieBreak {
    /// Policy selected by an optional raw argument. Only an exact match of
    /// the designated flag string disables middle priority.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(DISABLE_MIDDLE_PRIORITY_FLAG) => TieBreak::DisableMiddlePriority,
            _ => TieBreak::MiddlePriority,
        }
    }
}

/// One move and the elevation change it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub direction: Direction,
    pub change: u64,
}

impl PathStep {
    pub fn delta(&self) -> i8 {
        self.direction.delta()
    }
}

/// A greedy left-to-right walk, one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub start_row: usize,
    pub cells: Vec<Position>,
    pub steps: Vec<PathStep>,
    pub cost: u64,
}

impl Path {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {:6} -> row {:6}  cost {:8}",
            self.start_row,
            self.end().row,
            self.cost
        )
    }
}

/// Every row's path plus the cheapest and costliest of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    pub paths: Vec<Path>,
    pub best_index: usize,
    pub worst_index: usize,
}

impl PathSet {
    pub fn best(&self) -> &Path {
        &self.paths[self.best_index]
    }

    pub fn worst(&self) -> &Path {
        &self.paths[self.worst_index]
    }

    pub fn costs(&self) -> Vec<u64> {
        self.paths.iter().map(|path| path.cost).collect()
    }
}

pub struct PathTracer<'a> {
    grid: &'a ElevationGrid,
    policy: TieBreak,
}

impl<'a> PathTracer<'a> {
    pub fn new(grid: &'a ElevationGrid, policy: TieBreak) -> Self {
        PathTracer { grid, policy }
    }

    /// Trace one path starting at `(start_row, 0)`.
    ///
    /// `rng` is only drawn from when a tie has to be broken at random.
    /// Panics if `start_row` is outside the grid.
    pub fn trace<R: Rng + ?Sized>(&self, start_row: usize, rng: &mut R) -> Path {
        assert!(
            self.grid.contains(Position::new(start_row, 0)),
            "start row {} outside grid of {} rows",
            start_row,
            self.grid.rows
        );

        let mut cells = Vec::with_capacity(self.grid.cols);
        let mut steps = Vec::with_capacity(self.grid.cols.saturating_sub(1));
        let mut row = start_row;
        let mut cost = 0u64;

        for col in 0..self.grid.cols - 1 {
            cells.push(Position::new(row, col));

            let step = self.next_step(row, col, rng);
            cost += step.change;
            row = match step.direction {
                Direction::Up => row - 1,
                Direction::Forward => row,
                Direction::Down => row + 1,
            };
            steps.push(step);
        }
        cells.push(Position::new(row, self.grid.cols - 1));

        Path {
            start_row,
            cells,
            steps,
            cost,
        }
    }

    /// Trace from every row and pick the cheapest and costliest paths.
    pub fn trace_all<R: Rng + ?Sized>(&self, rng: &mut R) -> PathSet {
        let start = Instant::now();

        let paths: Vec<Path> = (0..self.grid.rows)
            .map(|row| self.trace(row, &mut *rng))
            .collect();

        let costs: Vec<u64> = paths.iter().map(|path| path.cost).collect();
        let (best_index, best_cost) = locate(&costs, ExtremeMode::Min);
        let (worst_index, worst_cost) = locate(&costs, ExtremeMode::Max);

        info!(
            paths = paths.len(),
            best_row = best_index,
            best_cost,
            worst_row = worst_index,
            worst_cost,
            elapsed = ?start.elapsed(),
            "Traced all paths"
        );

        PathSet {
            paths,
            best_index,
            worst_index,
        }
    }

    fn next_step<R: Rng + ?Sized>(&self, row: usize, col: usize, rng: &mut R) -> PathStep {
        let current = i64::from(self.grid.elevation(Position::new(row, col)));
        let change_to = |r: usize| {
            current.abs_diff(i64::from(self.grid.elevation(Position::new(r, col + 1))))
        };

        // Off-grid moves cost the same as forward so they can never win a tie
        let fwd = change_to(row);
        let up = if row > 0 { change_to(row - 1) } else { fwd };
        let down = if row + 1 < self.grid.rows {
            change_to(row + 1)
        } else {
            fwd
        };

        let direction = choose_direction(
            Candidates { fwd, up, down },
            self.policy,
            row == 0,
            row + 1 == self.grid.rows,
            rng,
        );

        let change = match direction {
            Direction::Up => up,
            Direction::Forward => fwd,
            Direction::Down => down,
        };

        debug!(row, col, ?direction, change, "Step");
        PathStep { direction, change }
    }
}

/// Elevation changes for the three possible moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    pub fwd: u64,
    pub up: u64,
    pub down: u64,
}

impl Candidates {
    pub fn min(&self) -> u64 {
        self.fwd.min(self.up).min(self.down)
    }
}

/// Pick the next move for a set of candidate changes.
///
/// At most one coin flip is drawn from `rng`, and only when the chosen
/// policy leaves a genuine two-way tie open.
pub fn choose_direction<R: Rng + ?Sized>(
    candidates: Candidates,
    policy: TieBreak,
    top_edge: bool,
    bottom_edge: bool,
    rng: &mut R,
) -> Direction {
    let Candidates { fwd, up, down } = candidates;
    let m = candidates.min();

    if policy == TieBreak::DisableMiddlePriority && fwd == m && up != down {
        if up == m {
            if top_edge || rng.gen::<bool>() {
                return Direction::Forward;
            }
            return Direction::Up;
        }
        if down == m {
            if bottom_edge || rng.gen::<bool>() {
                return Direction::Forward;
            }
            return Direction::Down;
        }
    }

    if m == fwd {
        return Direction::Forward;
    }

    if up == m && down == m {
        return if rng.gen::<bool>() {
            Direction::Up
        } else {
            Direction::Down
        };
    }

    if up == m {
        return Direction::Up;
    }

    Direction::Down
}
