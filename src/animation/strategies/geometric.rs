//! Closed-form patterns over grid coordinates.

use glam::Vec2;

use crate::animation::angle::heading_of;
use crate::animation::context::{FrameContext, StrategyOutput};
use crate::animation::kind::{GeometricLayout, GeometricPatternParams};
use crate::item::AnimatedVectorItem;

/// Heading from `(row, col, time)` for the selected layout.
#[must_use]
pub fn geometric_pattern(
    params: &GeometricPatternParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let t = ctx.time_secs();
    let spin = params.rotation_speed * t;

    // Cell coordinates relative to the grid center.
    let cell = Vec2::new(
        item.c as f32 - (ctx.cols.max(1) - 1) as f32 * 0.5,
        item.r as f32 - (ctx.rows.max(1) - 1) as f32 * 0.5,
    );
    let dist = cell.length();
    let theta = heading_of(cell).unwrap_or(0.0);

    let angle = match params.pattern {
        GeometricLayout::Spiral => {
            theta + (dist * params.density).to_degrees() + spin
        }
        GeometricLayout::Radial => theta + spin,
        GeometricLayout::Concentric => {
            let wave = (dist * params.density - t * params.rotation_speed.to_radians()).sin();
            theta + 90.0 + 45.0 * wave
        }
        GeometricLayout::Grid => {
            let checker = if (item.r + item.c) % 2 == 0 { 0.0 } else { 90.0 };
            checker + spin
        }
    };
    StrategyOutput::angle(angle)
}
