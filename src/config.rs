//! Run configuration shared by the binary and embedding callers.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::path::TieBreak;

/// Argument that switches path tracing to [`TieBreak::DisableMiddlePriority`].
pub const DISABLE_MIDDLE_PRIORITY_FLAG: &str = "--disable-middle-priority";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// Elevation file; its name carries the `_<cols>x<rows>.<ext>` suffix.
    pub source: PathBuf,
    pub tie_break: TieBreak,
    /// Fixed seed for tie-break draws. Without one every run draws fresh
    /// entropy, so tied walks may differ between runs.
    pub seed: Option<u64>,
}

impl WalkConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        WalkConfig {
            source: source.into(),
            tie_break: TieBreak::default(),
            seed: None,
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
