use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::hash::cell_hash;

/// Rule assigning each cell its heading at layout time.
///
/// Every variant is a pure function of `(row, col)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum InitialRotation {
    /// Same heading for every cell.
    Constant {
        /// Heading in degrees.
        degrees: f32,
    },
    /// Heading increases by `step` per row and per column.
    Diagonal {
        /// Degrees added per row/column step.
        step: f32,
    },
    /// Alternating headings in a checkerboard.
    Checkerboard {
        /// Heading of even cells.
        even: f32,
        /// Heading of odd cells.
        odd: f32,
    },
    /// Stable pseudo-random heading per cell.
    Scattered {
        /// Hash seed.
        seed: u64,
    },
}

impl InitialRotation {
    /// Heading in degrees for the cell at `(row, col)`.
    #[must_use]
    pub fn angle_at(&self, row: u32, col: u32) -> f32 {
        match *self {
            InitialRotation::Constant { degrees } => degrees,
            InitialRotation::Diagonal { step } => (row + col) as f32 * step,
            InitialRotation::Checkerboard { even, odd } => {
                if (row + col) % 2 == 0 {
                    even
                } else {
                    odd
                }
            }
            InitialRotation::Scattered { seed } => {
                cell_hash(row, col, seed) * 360.0
            }
        }
    }
}

impl Default for InitialRotation {
    fn default() -> Self {
        Self::Constant { degrees: 0.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Grid", inline)]
#[serde(default)]
/// Grid arrangement: counts, spacing and placement.
pub struct GridOptions {
    /// Explicit row count; derived when unset.
    #[schemars(title = "Rows", range(min = 1, max = 50))]
    pub rows: Option<u32>,
    /// Explicit column count; derived when unset.
    #[schemars(title = "Columns", range(min = 1, max = 50))]
    pub cols: Option<u32>,
    /// Requested cell spacing in pixels; defaults to 40 when unset.
    #[schemars(title = "Spacing", range(min = 4.0, max = 400.0))]
    pub spacing: Option<f32>,
    /// Margin kept clear on every side of the container.
    #[schemars(title = "Margin", range(min = 0.0, max = 200.0))]
    pub margin: f32,
    /// Columns-per-row hint used when only one count is explicit.
    #[schemars(skip)]
    pub aspect_ratio: Option<f32>,
    /// Number of consecutive cells grouped into one flock.
    #[schemars(title = "Flock Size", range(min = 1, max = 2500))]
    pub flock_size: Option<u32>,
    /// Rule producing each cell's initial heading.
    #[schemars(skip)]
    pub initial_rotation: InitialRotation,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            spacing: None,
            margin: 20.0,
            aspect_ratio: None,
            flock_size: Some(25),
            initial_rotation: InitialRotation::default(),
        }
    }
}
