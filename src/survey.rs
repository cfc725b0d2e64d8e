use std::time::Instant;

use rand::Rng;
use tracing::{info, info_span};

use crate::config::WalkConfig;
use crate::extreme::Extreme;
use crate::grid::{ElevationGrid, LoadReport};
use crate::path::{PathSet, PathTracer, TieBreak};
use crate::report::OutputSink;
use crate::Result;

/// Everything computed about a grid: its extremes and every row's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    pub highest: Extreme<i32>,
    pub lowest: Extreme<i32>,
    pub paths: PathSet,
}

impl Survey {
    /// Run extremes and path tracing over a loaded grid and print the
    /// summary to `sink`.
    pub fn run<R: Rng + ?Sized>(
        grid: &ElevationGrid,
        policy: TieBreak,
        rng: &mut R,
        sink: &mut dyn OutputSink,
    ) -> Self {
        let _span = info_span!("survey", rows = grid.rows, cols = grid.cols, ?policy).entered();
        let start = Instant::now();

        let highest = grid.highest();
        let lowest = grid.lowest();
        info!(
            max = highest.value,
            peak = %highest.position,
            min = lowest.value,
            base = %lowest.position,
            "Found grid extremes"
        );

        sink.line("");
        sink.line(&format!("HIGHEST point of elevation on the map: {}", highest.value));
        sink.line(&format!("LOWEST point of elevation on the map: {}", lowest.value));
        sink.line("");

        let paths = PathTracer::new(grid, policy).trace_all(rng);

        sink.line(&format!(
            "Total elevation change on the path of LEAST resistance: {}",
            paths.best().cost
        ));
        sink.line(&format!(
            "Total elevation change on the path of MOST resistance: {}",
            paths.worst().cost
        ));
        sink.line("");

        info!(elapsed = ?start.elapsed(), "Survey complete");

        Survey {
            highest,
            lowest,
            paths,
        }
    }

    /// Load the configured source and survey it.
    ///
    /// Fails only when the source name carries no usable dimensions; a
    /// degraded load is surveyed as-is and returned alongside.
    pub fn from_config(config: &WalkConfig, sink: &mut dyn OutputSink) -> Result<(LoadReport, Self)> {
        let report = ElevationGrid::load(&config.source, sink)?;
        let mut rng = config.rng();
        let survey = Survey::run(&report.grid, config.tie_break, &mut rng, sink);
        Ok((report, survey))
    }
}
