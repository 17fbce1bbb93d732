//! Constant-target strategies and the random retarget loop.

use rand::Rng;

use crate::animation::context::{FrameContext, StrategyOutput, StrategyRuntime};
use crate::animation::kind::{RandomLoopParams, StaticAngleParams};
use crate::item::{AnimatedVectorItem, AnimationState};

/// Hold the current heading.
#[must_use]
pub fn none(item: &AnimatedVectorItem) -> StrategyOutput {
    StrategyOutput::angle(item.current_angle)
}

/// Converge on one configured heading.
#[must_use]
pub fn static_angle(params: &StaticAngleParams) -> StrategyOutput {
    let angle = if params.angle.is_finite() {
        params.angle
    } else {
        StaticAngleParams::default().angle
    };
    StrategyOutput::angle(angle)
}

/// Return to the layout heading.
#[must_use]
pub fn random_static(item: &AnimatedVectorItem) -> StrategyOutput {
    StrategyOutput::angle(item.initial_angle)
}

fn interval(params: &RandomLoopParams) -> f64 {
    if params.interval_ms.is_finite() && params.interval_ms > 0.0 {
        params.interval_ms
    } else {
        RandomLoopParams::default().interval_ms
    }
}

/// Seed a random-loop schedule, staggered so items do not all retarget on
/// the same tick.
pub fn random_loop_seed(
    params: &RandomLoopParams,
    now_ms: f64,
    rng: &mut impl Rng,
) -> AnimationState {
    AnimationState::RandomLoop {
        next_random_time: now_ms + rng.random_range(0.0..interval(params)),
    }
}

/// Re-roll a random heading whenever the item's deadline passes.
pub fn random_loop(
    params: &RandomLoopParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
    runtime: &mut StrategyRuntime,
) -> StrategyOutput {
    let factor = params.transition_duration_factor;
    let easing_scale = if factor.is_finite() && factor > 0.0 {
        1.0 / factor
    } else {
        1.0
    };

    let due = match item.animation_state {
        AnimationState::RandomLoop { next_random_time } => {
            ctx.time_ms >= next_random_time
        }
        _ => true,
    };

    let mut output = StrategyOutput::angle(item.target_angle);
    output.easing_scale = easing_scale;
    if due {
        output.target_angle = runtime.rng.random_range(0.0..360.0);
        output.state = Some(AnimationState::RandomLoop {
            next_random_time: ctx.time_ms + interval(params),
        });
    }
    output
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::layout::FlockIndex;

    fn ctx_at<'a>(
        time_ms: f64,
        items: &'a [AnimatedVectorItem],
        flocks: &'a FlockIndex,
    ) -> FrameContext<'a> {
        FrameContext {
            pointer: None,
            size: Vec2::new(100.0, 100.0),
            rows: 1,
            cols: 1,
            time_ms,
            items,
            flocks,
        }
    }

    #[test]
    fn constant_targets() {
        let mut item = AnimatedVectorItem::new(0, 0, 0, Vec2::ZERO, 15.0, 0);
        item.current_angle = 200.0;
        assert_eq!(none(&item).target_angle, 200.0);
        assert_eq!(random_static(&item).target_angle, 15.0);
        let params = StaticAngleParams { angle: 270.0 };
        assert_eq!(static_angle(&params).target_angle, 270.0);
        let params = StaticAngleParams { angle: f32::NAN };
        assert_eq!(static_angle(&params).target_angle, 45.0);
    }

    #[test]
    fn random_loop_retargets_only_when_due() {
        let params = RandomLoopParams {
            interval_ms: 500.0,
            transition_duration_factor: 2.0,
        };
        let mut runtime = StrategyRuntime::new(1);
        let flocks = FlockIndex::default();
        let mut item = AnimatedVectorItem::new(0, 0, 0, Vec2::ZERO, 0.0, 0);
        item.target_angle = 77.0;
        item.animation_state = AnimationState::RandomLoop {
            next_random_time: 1000.0,
        };

        let early = random_loop(&params, &item, &ctx_at(999.0, &[], &flocks), &mut runtime);
        assert_eq!(early.target_angle, 77.0);
        assert_eq!(early.state, None);
        assert_eq!(early.easing_scale, 0.5);

        let due = random_loop(&params, &item, &ctx_at(1000.0, &[], &flocks), &mut runtime);
        assert!((0.0..360.0).contains(&due.target_angle));
        assert_eq!(
            due.state,
            Some(AnimationState::RandomLoop {
                next_random_time: 1500.0
            })
        );
    }

    #[test]
    fn random_loop_seed_is_staggered_within_interval() {
        let params = RandomLoopParams::default();
        let mut runtime = StrategyRuntime::new(9);
        for _ in 0..50 {
            let AnimationState::RandomLoop { next_random_time } =
                random_loop_seed(&params, 100.0, &mut runtime.rng)
            else {
                panic!("expected random loop state");
            };
            assert!((100.0..100.0 + params.interval_ms).contains(&next_random_time));
        }
    }
}
