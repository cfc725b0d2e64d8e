//! Read-only drawing data handed to a presentation layer.
//!
//! Nothing here paints. A [`Scene`] lists what to draw and in which order:
//! background, the per-cell elevation raster, every path overlay (ordinary
//! first, then best, then worst so they end up on top), and the peak and
//! base markers.

use crate::color::{self, Color};
use crate::grid::{ElevationGrid, Position};
use crate::survey::Survey;

pub const WINDOW_TITLE: &str = "What A Lovely Place For A Walk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRole {
    Ordinary,
    Best,
    Worst,
}

impl PathRole {
    pub fn color(self) -> Color {
        match self {
            PathRole::Ordinary => color::NORMAL_PATH,
            PathRole::Best => color::BEST_PATH,
            PathRole::Worst => color::WORST_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathOverlay {
    pub role: PathRole,
    pub color: Color,
    pub start_row: usize,
    pub cells: Vec<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Highest elevation (drawn as a flag)
    Peak,
    /// Lowest elevation (drawn as a tent)
    Base,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Position,
    pub elevation: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: &'static str,
    pub width: usize,
    pub height: usize,
    pub background: Color,
    /// `height` rows of `width` colors
    pub cells: Vec<Vec<Color>>,
    pub overlays: Vec<PathOverlay>,
    pub markers: Vec<Marker>,
}

impl Scene {
    pub fn build(grid: &ElevationGrid, survey: &Survey) -> Self {
        let (min, max) = (survey.lowest.value, survey.highest.value);

        let cells = grid
            .as_rows()
            .iter()
            .map(|row| row.iter().map(|&v| color::color_for(v, min, max)).collect())
            .collect();

        let paths = &survey.paths;
        let mut overlays: Vec<PathOverlay> = paths
            .paths
            .iter()
            .map(|path| PathOverlay {
                role: PathRole::Ordinary,
                color: PathRole::Ordinary.color(),
                start_row: path.start_row,
                cells: path.cells.clone(),
            })
            .collect();

        for (role, path) in [(PathRole::Best, paths.best()), (PathRole::Worst, paths.worst())] {
            overlays.push(PathOverlay {
                role,
                color: role.color(),
                start_row: path.start_row,
                cells: path.cells.clone(),
            });
        }

        let markers = vec![
            Marker {
                kind: MarkerKind::Peak,
                position: survey.highest.position,
                elevation: survey.highest.value,
            },
            Marker {
                kind: MarkerKind::Base,
                position: survey.lowest.position,
                elevation: survey.lowest.value,
            },
        ];

        Scene {
            title: WINDOW_TITLE,
            width: grid.cols,
            height: grid.rows,
            background: color::BACKGROUND,
            cells,
            overlays,
            markers,
        }
    }

    pub fn color_at(&self, position: Position) -> Option<Color> {
        self.cells.get(position.row)?.get(position.col).copied()
    }

    pub fn overlays_with_role(&self, role: PathRole) -> impl Iterator<Item = &PathOverlay> {
        self.overlays.iter().filter(move |overlay| overlay.role == role)
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.kind == kind)
    }
}
