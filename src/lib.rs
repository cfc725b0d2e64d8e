//! Terrain Walk
//!
//! Loads a grid of integer elevation samples, finds its peak and base,
//! traces a greedy "path of least resistance" from every row and picks the
//! cheapest and costliest of them, then maps everything to display colors.
//!
//! The crate stops at a data boundary ([`scene::Scene`]); painting is left
//! to whatever presentation layer consumes it.

pub mod color;
pub mod config;
pub mod extreme;
pub mod grid;
pub mod logging;
pub mod path;
pub mod report;
pub mod scene;
pub mod survey;

pub use color::Color;
pub use config::WalkConfig;
pub use extreme::{Extreme, ExtremeMode};
pub use grid::{Dimensions, ElevationGrid, LoadReport, Position};
pub use path::{Path, PathSet, PathTracer, TieBreak};
pub use report::OutputSink;
pub use scene::Scene;
pub use survey::Survey;

use thiserror::Error;

/// Errors that can occur while loading terrain
#[derive(Debug, Error)]
pub enum WalkError {
    /// Grid dimensions could not be read from the source identifier.
    /// Nothing can be allocated without them, so this one is fatal.
    #[error("unable to parse grid dimensions from '{identifier}' (expected a '_<cols>x<rows>.<ext>' suffix)")]
    InvalidDimensions { identifier: String },

    /// An in-memory grid was empty or had rows of differing length
    #[error("grid must be non-empty and rectangular")]
    InvalidShape,

    /// The elevation body could not be opened or read
    #[error("problem opening or reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A body token was not an integer; cells from `index` onward stay zero
    #[error("malformed elevation value '{token}' at cell {index}")]
    MalformedValue { token: String, index: usize },
}

impl WalkError {
    /// Whether the pipeline can carry on with a zero-filled grid.
    pub fn is_degraded_load(&self) -> bool {
        matches!(
            self,
            WalkError::Io { .. } | WalkError::MalformedValue { .. }
        )
    }
}

/// Result type for terrain loading
pub type Result<T> = std::result::Result<T, WalkError>;
