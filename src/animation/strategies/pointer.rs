//! Pointer-reactive field.

use crate::animation::angle::{heading_of, shortest_angular_delta};
use crate::animation::context::{FrameContext, StrategyOutput};
use crate::animation::kind::{MouseInteractionParams, PointerEffect};
use crate::item::{AnimatedVectorItem, AnimationState};

/// Heading held while the pointer has no effect on `item`.
#[must_use]
pub fn rest_angle(item: &AnimatedVectorItem) -> f32 {
    match item.animation_state {
        AnimationState::Pointer { rest_angle } => rest_angle,
        _ => item.initial_angle,
    }
}

/// Blend from the rest heading toward the effect heading by the falloff
/// weight.
#[must_use]
pub fn mouse_interaction(
    params: &MouseInteractionParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let rest = rest_angle(item);
    let Some(pointer) = ctx.pointer else {
        return StrategyOutput::angle(rest);
    };

    let radius = if params.interaction_radius.is_finite()
        && params.interaction_radius > 0.0
    {
        params.interaction_radius
    } else {
        MouseInteractionParams::default().interaction_radius
    };
    let to_pointer = pointer - item.base;
    let distance = to_pointer.length();
    if distance > radius {
        return StrategyOutput::angle(rest);
    }

    let effect = match params.effect {
        PointerEffect::Attract => heading_of(to_pointer),
        PointerEffect::Repel => heading_of(-to_pointer),
        PointerEffect::Align => heading_of(pointer - ctx.center()),
        PointerEffect::Swirl => heading_of(-to_pointer).map(|h| h + 90.0),
    };
    let Some(effect) = effect else {
        return StrategyOutput::angle(rest);
    };

    let strength = if params.strength.is_finite() {
        params.strength
    } else {
        0.0
    };
    let weight =
        (params.falloff.weight(distance / radius) * strength).clamp(0.0, 1.0);
    StrategyOutput::angle(rest + weight * shortest_angular_delta(rest, effect))
        .with_scale(1.0 + 0.5 * weight)
}
