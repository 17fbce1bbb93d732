//! Dispatch from [`AnimationKind`] to its motion function.

use rand::Rng;

use super::context::{FrameContext, StrategyOutput, StrategyRuntime};
use super::kind::AnimationKind;
use super::strategies::{
    basic, fields, flocking, geometric, orbital, pointer, waves,
};
use crate::item::{AnimatedVectorItem, AnimationState};

/// Evaluate the active strategy for one item.
pub fn evaluate(
    kind: &AnimationKind,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
    runtime: &mut StrategyRuntime,
) -> StrategyOutput {
    match kind {
        AnimationKind::None => basic::none(item),
        AnimationKind::StaticAngle(p) => basic::static_angle(p),
        AnimationKind::RandomStatic => basic::random_static(item),
        AnimationKind::RandomLoop(p) => {
            basic::random_loop(p, item, ctx, runtime)
        }
        AnimationKind::SmoothWaves(p) => waves::smooth_waves(p, item, ctx),
        AnimationKind::SeaWaves(p) => waves::sea_waves(p, item, ctx),
        AnimationKind::PerlinFlow(p) => {
            fields::perlin_flow(p, item, ctx, runtime)
        }
        AnimationKind::DirectionalFlow(p) => {
            fields::directional_flow(p, item, ctx)
        }
        AnimationKind::TangenteClasica(p) => {
            orbital::tangente_clasica(p, item, ctx)
        }
        AnimationKind::Vortex(p) => orbital::vortex(p, item, ctx),
        AnimationKind::Lissajous(p) => waves::lissajous(p, item, ctx),
        AnimationKind::GeometricPattern(p) => {
            geometric::geometric_pattern(p, item, ctx)
        }
        AnimationKind::MouseInteraction(p) => {
            pointer::mouse_interaction(p, item, ctx)
        }
        AnimationKind::Flocking(p) => flocking::flocking(p, item, ctx),
        // Pulses are layered on by the engine; between pulses the heading
        // rests.
        AnimationKind::CenterPulse(_) => {
            StrategyOutput::angle(pulse_rest_angle(item))
        }
    }
}

/// Heading a pulse-driven item returns to between pulses.
#[must_use]
pub fn pulse_rest_angle(item: &AnimatedVectorItem) -> f32 {
    match item.animation_state {
        AnimationState::Pulse { rest_angle } => rest_angle,
        _ => item.current_angle,
    }
}

/// Fresh per-item state for a newly selected kind.
///
/// Called for every item on a kind switch and after a re-layout; the
/// previous strategy's state is discarded.
pub fn initial_state(
    kind: &AnimationKind,
    item: &AnimatedVectorItem,
    now_ms: f64,
    rng: &mut impl Rng,
) -> AnimationState {
    match kind {
        AnimationKind::RandomLoop(p) => basic::random_loop_seed(p, now_ms, rng),
        AnimationKind::MouseInteraction(_) => AnimationState::Pointer {
            rest_angle: item.current_angle,
        },
        AnimationKind::CenterPulse(_) => AnimationState::Pulse {
            rest_angle: item.current_angle,
        },
        _ => AnimationState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::animation::kind::{CenterPulseParams, MouseInteractionParams, RandomLoopParams};
    use crate::layout::FlockIndex;

    #[test]
    fn every_tag_dispatches() {
        let items = vec![AnimatedVectorItem::new(0, 0, 0, Vec2::new(10.0, 10.0), 45.0, 0)];
        let flocks = FlockIndex::build(&items);
        let ctx = FrameContext {
            pointer: Some(Vec2::new(20.0, 20.0)),
            size: Vec2::new(100.0, 100.0),
            rows: 1,
            cols: 1,
            time_ms: 250.0,
            items: &items,
            flocks: &flocks,
        };
        let mut runtime = StrategyRuntime::new(3);
        for tag in AnimationKind::TAGS {
            let kind = AnimationKind::from_tag(tag);
            let out = evaluate(&kind, &items[0], &ctx, &mut runtime);
            assert!(out.target_angle.is_finite(), "{tag}");
            assert!(out.easing_scale.is_finite(), "{tag}");
        }
    }

    #[test]
    fn initial_state_matches_kind() {
        let mut item = AnimatedVectorItem::new(0, 0, 0, Vec2::ZERO, 10.0, 0);
        item.current_angle = 33.0;
        let mut runtime = StrategyRuntime::new(0);

        let state = initial_state(
            &AnimationKind::MouseInteraction(MouseInteractionParams::default()),
            &item,
            0.0,
            &mut runtime.rng,
        );
        assert_eq!(state, AnimationState::Pointer { rest_angle: 33.0 });

        let state = initial_state(
            &AnimationKind::CenterPulse(CenterPulseParams::default()),
            &item,
            0.0,
            &mut runtime.rng,
        );
        assert_eq!(state, AnimationState::Pulse { rest_angle: 33.0 });

        let state = initial_state(
            &AnimationKind::RandomLoop(RandomLoopParams::default()),
            &item,
            500.0,
            &mut runtime.rng,
        );
        assert!(matches!(
            state,
            AnimationState::RandomLoop { next_random_time } if next_random_time >= 500.0
        ));

        assert_eq!(
            initial_state(&AnimationKind::None, &item, 0.0, &mut runtime.rng),
            AnimationState::Idle
        );
    }

    #[test]
    fn center_pulse_rests_between_pulses() {
        let mut item = AnimatedVectorItem::new(0, 0, 0, Vec2::ZERO, 10.0, 0);
        item.current_angle = 80.0;
        item.animation_state = AnimationState::Pulse { rest_angle: 12.0 };
        let flocks = FlockIndex::default();
        let ctx = FrameContext {
            pointer: None,
            size: Vec2::ONE,
            rows: 1,
            cols: 1,
            time_ms: 0.0,
            items: &[],
            flocks: &flocks,
        };
        let out = evaluate(
            &AnimationKind::CenterPulse(CenterPulseParams::default()),
            &item,
            &ctx,
            &mut StrategyRuntime::new(0),
        );
        assert_eq!(out.target_angle, 12.0);
    }
}
