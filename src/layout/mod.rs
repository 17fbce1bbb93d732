//! Grid layout: container size + [`GridOptions`] → positioned items.
//!
//! Layout is a pure function of its inputs. The engine calls it whenever the
//! container or grid options change and replaces its item array wholesale.

mod flock;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use self::flock::FlockIndex;
use crate::animation::angle::normalize_angle;
use crate::item::AnimatedVectorItem;
use crate::options::GridOptions;

/// Spacing used when none (or an invalid one) is configured.
pub const DEFAULT_SPACING: f32 = 40.0;
/// Smallest spacing the layout will produce.
pub const MIN_SPACING: f32 = 4.0;
/// Largest spacing as a fraction of the smaller available extent.
pub const MAX_SPACING_FRACTION: f32 = 0.5;
/// Hard cap on resolved rows.
pub const MAX_ROWS: u32 = 50;
/// Hard cap on resolved columns.
pub const MAX_COLS: u32 = 50;
/// Flock size used when the grid options leave it unset.
pub const DEFAULT_FLOCK_SIZE: u32 = 25;

/// Resolved grid dimensions, for renderers and debug overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Resolved row count (0 for an unready container).
    pub rows: u32,
    /// Resolved column count (0 for an unready container).
    pub cols: u32,
    /// Distance between neighboring anchors, in pixels.
    pub spacing: f32,
    /// Pixel extent of the populated block (`cols × spacing`,
    /// `rows × spacing`).
    pub extent: Vec2,
    /// Top-left corner of the populated block.
    pub origin: Vec2,
    /// Whether the row/column cap was applied.
    pub capped: bool,
}

/// Output of a layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    /// Resolved dimensions.
    pub dims: GridDimensions,
    /// Items in row-major order, out-of-bounds anchors removed.
    pub items: Vec<AnimatedVectorItem>,
    /// Flock buckets over `items`.
    pub flocks: FlockIndex,
}

impl GridLayout {
    /// Whether the layout has no items (e.g. zero-size container).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lay out a grid using the options' own rotation rule.
#[must_use]
pub fn build_grid(width: f32, height: f32, grid: &GridOptions) -> GridLayout {
    build_grid_with(width, height, grid, |row, col| {
        grid.initial_rotation.angle_at(row, col)
    })
}

/// Lay out a grid with a caller-supplied initial rotation rule. Rule output
/// is normalized to `[0, 360)`.
///
/// A zero (or invalid) width/height is the "not yet measurable" state and
/// yields an empty layout.
pub fn build_grid_with(
    width: f32,
    height: f32,
    grid: &GridOptions,
    rotation: impl Fn(u32, u32) -> f32,
) -> GridLayout {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0
    {
        return GridLayout::default();
    }

    let margin = if grid.margin.is_finite() {
        grid.margin.max(0.0)
    } else {
        0.0
    };
    let available = Vec2::new(
        available_extent(width, margin),
        available_extent(height, margin),
    );

    let resolved = resolve_counts(available, grid);
    let (rows, cols, spacing) = (resolved.rows, resolved.cols, resolved.spacing);

    let extent = Vec2::new(cols as f32 * spacing, rows as f32 * spacing);
    let origin = (Vec2::new(width, height) - extent) * 0.5;
    let first_anchor = origin + Vec2::splat(spacing * 0.5);

    let flock_size = grid
        .flock_size
        .unwrap_or(DEFAULT_FLOCK_SIZE)
        .max(1);

    let mut items = Vec::with_capacity((rows * cols) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let base =
                first_anchor + Vec2::new(c as f32, r as f32) * spacing;
            if base.x < 0.0 || base.x > width || base.y < 0.0 || base.y > height
            {
                continue;
            }
            let index = r * cols + c;
            items.push(AnimatedVectorItem::new(
                index,
                r,
                c,
                base,
                normalize_angle(rotation(r, c)),
                index / flock_size,
            ));
        }
    }

    log::debug!(
        "grid layout {width}x{height}: {rows}x{cols} @ {spacing:.1}px, {} items",
        items.len()
    );

    let flocks = FlockIndex::build(&items);
    GridLayout {
        dims: GridDimensions {
            rows,
            cols,
            spacing,
            extent,
            origin,
            capped: resolved.capped,
        },
        items,
        flocks,
    }
}

/// Container extent minus margins, or the full extent when margins leave
/// nothing.
fn available_extent(extent: f32, margin: f32) -> f32 {
    let shrunk = extent - 2.0 * margin;
    if shrunk > 0.0 {
        shrunk
    } else {
        extent
    }
}

struct ResolvedCounts {
    rows: u32,
    cols: u32,
    spacing: f32,
    capped: bool,
}

fn positive_count(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v > 0)
}

fn positive_f32(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Count from a float, at least 1.
fn to_count(value: f32) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.min(u32::MAX as f32) as u32
    } else {
        1
    }
}

fn resolve_counts(available: Vec2, grid: &GridOptions) -> ResolvedCounts {
    let requested = positive_f32(grid.spacing).unwrap_or(DEFAULT_SPACING);
    let aspect = positive_f32(grid.aspect_ratio);
    let fit = |rows: u32, cols: u32| {
        (available.x / cols as f32).min(available.y / rows as f32)
    };

    let (rows, cols, spacing) =
        match (positive_count(grid.rows), positive_count(grid.cols)) {
            (Some(rows), Some(cols)) => (rows, cols, fit(rows, cols)),
            (Some(rows), None) => {
                let cols = match aspect {
                    Some(aspect) => to_count((rows as f32 * aspect).round()),
                    None => {
                        let row_spacing = available.y / rows as f32;
                        to_count((available.x / row_spacing).floor())
                    }
                };
                (rows, cols, fit(rows, cols))
            }
            (None, Some(cols)) => {
                let rows = match aspect {
                    Some(aspect) => to_count((cols as f32 / aspect).round()),
                    None => {
                        let col_spacing = available.x / cols as f32;
                        to_count((available.y / col_spacing).floor())
                    }
                };
                (rows, cols, fit(rows, cols))
            }
            (None, None) => (
                to_count((available.y / requested).floor()),
                to_count((available.x / requested).floor()),
                requested,
            ),
        };

    let capped = rows > MAX_ROWS || cols > MAX_COLS;
    let (rows, cols, spacing) = if capped {
        let capped_rows = rows.min(MAX_ROWS);
        let capped_cols = cols.min(MAX_COLS);
        log::warn!(
            "grid {rows}x{cols} exceeds the {MAX_ROWS}x{MAX_COLS} cap, \
             clamping to {capped_rows}x{capped_cols}"
        );
        (capped_rows, capped_cols, fit(capped_rows, capped_cols))
    } else {
        (rows, cols, spacing)
    };

    let ceiling = available.x.min(available.y) * MAX_SPACING_FRACTION;
    let spacing = spacing.min(ceiling).max(MIN_SPACING);

    ResolvedCounts {
        rows,
        cols,
        spacing,
        capped,
    }
}
