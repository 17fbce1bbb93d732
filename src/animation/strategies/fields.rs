//! Field strategies: coherent noise and hashed directional flow.

use std::f32::consts::TAU;

use noise::NoiseFn;

use crate::animation::context::{FrameContext, StrategyOutput, StrategyRuntime};
use crate::animation::kind::{DirectionalFlowParams, PerlinFlowParams};
use crate::item::AnimatedVectorItem;
use crate::util::hash::spatial_hash;

/// Heading from 3D Perlin noise at `(x·scale, y·scale, t·speed)`.
pub fn perlin_flow(
    params: &PerlinFlowParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
    runtime: &mut StrategyRuntime,
) -> StrategyOutput {
    let defaults = PerlinFlowParams::default();
    let scale = if params.noise_scale.is_finite() {
        params.noise_scale
    } else {
        defaults.noise_scale
    };
    let speed = if params.time_evolution_speed.is_finite() {
        params.time_evolution_speed
    } else {
        defaults.time_evolution_speed
    };

    let t = ctx.time_ms / 1000.0;
    let sample = runtime.perlin(params.seed).get([
        f64::from(item.base.x) * scale,
        f64::from(item.base.y) * scale,
        t * speed,
    ]);
    StrategyOutput::angle(sample as f32 * params.angle_multiplier)
}

/// Uniform flow plus a bounded per-position turbulence wobble.
#[must_use]
pub fn directional_flow(
    params: &DirectionalFlowParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let phase = spatial_hash(item.base, params.seed) * TAU;
    let wobble = (ctx.time_secs() * params.turbulence_speed + phase).sin();
    StrategyOutput::angle(params.flow_angle + params.turbulence.abs() * wobble)
}
