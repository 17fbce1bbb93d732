//! Sinusoidal strategies: smooth waves, sea waves and lissajous.

use crate::animation::context::{FrameContext, StrategyOutput};
use crate::animation::kind::{LissajousParams, SeaWavesParams, SmoothWavesParams};
use crate::item::AnimatedVectorItem;

/// Two travelling sines, one per axis, averaged.
#[must_use]
pub fn smooth_waves(
    params: &SmoothWavesParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let t = ctx.time_secs() * params.wave_speed;
    let f = params.wave_frequency;
    let wave = 0.5
        * ((item.base.x * f + t).sin() + (item.base.y * f - t * 0.8).cos());
    StrategyOutput::angle(params.base_angle + params.wave_amplitude * wave)
}

/// Swell plus ripple; choppiness sharpens crests and flattens troughs.
#[must_use]
pub fn sea_waves(
    params: &SeaWavesParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let t = ctx.time_secs() * params.wave_speed;
    let p = item.base;
    let chop = params.choppiness.clamp(0.0, 1.0);

    let swell =
        (p.x * params.base_frequency + p.y * params.base_frequency * 0.3 + t).sin();
    let skewed = if swell >= 0.0 {
        swell * (1.0 + chop)
    } else {
        swell * (1.0 - chop)
    };
    let ripple = (p.x * params.ripple_frequency - t * 2.3).sin()
        * (p.y * params.ripple_frequency + t * 1.7).cos();

    let angle = params.base_angle
        + params.base_amplitude * skewed
        + params.ripple_amplitude * ripple;
    let crest = skewed.max(0.0);
    StrategyOutput::angle(angle).with_scale(1.0 + 0.5 * chop * crest)
}

/// `ax·sin(fx·t + x·k) + ay·sin(fy·t + y·k + φ)`.
#[must_use]
pub fn lissajous(
    params: &LissajousParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let t = ctx.time_secs() * params.time_speed;
    let k = params.spatial_scale;
    let x_term = params.amplitude_x * (params.frequency_x * t + item.base.x * k).sin();
    let y_term = params.amplitude_y
        * (params.frequency_y * t
            + item.base.y * k
            + params.phase_offset.to_radians())
        .sin();
    StrategyOutput::angle(x_term + y_term)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::layout::FlockIndex;

    fn ctx(time_ms: f64, flocks: &FlockIndex) -> FrameContext<'_> {
        FrameContext {
            pointer: None,
            size: Vec2::new(400.0, 400.0),
            rows: 4,
            cols: 4,
            time_ms,
            items: &[],
            flocks,
        }
    }

    fn item_at(x: f32, y: f32) -> AnimatedVectorItem {
        AnimatedVectorItem::new(0, 0, 0, Vec2::new(x, y), 0.0, 0)
    }

    #[test]
    fn smooth_waves_stay_within_amplitude() {
        let flocks = FlockIndex::default();
        let params = SmoothWavesParams {
            base_angle: 90.0,
            ..SmoothWavesParams::default()
        };
        for step in 0..100 {
            let item = item_at(step as f32 * 7.0, step as f32 * 3.0);
            let out = smooth_waves(&params, &item, &ctx(step as f64 * 33.0, &flocks));
            assert!((out.target_angle - 90.0).abs() <= params.wave_amplitude + 1e-3);
        }
    }

    #[test]
    fn smooth_waves_move_over_time() {
        let flocks = FlockIndex::default();
        let params = SmoothWavesParams::default();
        let item = item_at(50.0, 50.0);
        let a = smooth_waves(&params, &item, &ctx(0.0, &flocks)).target_angle;
        let b = smooth_waves(&params, &item, &ctx(500.0, &flocks)).target_angle;
        assert!((a - b).abs() > 1e-3);
    }

    #[test]
    fn sea_wave_crests_exceed_troughs() {
        let flocks = FlockIndex::default();
        let params = SeaWavesParams {
            ripple_amplitude: 0.0,
            choppiness: 0.5,
            ..SeaWavesParams::default()
        };
        let (mut max, mut min) = (f32::MIN, f32::MAX);
        for step in 0..400 {
            let item = item_at(step as f32 * 2.0, 0.0);
            let out = sea_waves(&params, &item, &ctx(0.0, &flocks));
            max = max.max(out.target_angle);
            min = min.min(out.target_angle);
        }
        // Crest reaches amp·1.5, trough only amp·0.5.
        assert!(max > params.base_amplitude * 1.4);
        assert!(min > -params.base_amplitude * 0.6);
    }

    #[test]
    fn lissajous_matches_closed_form() {
        let flocks = FlockIndex::default();
        let params = LissajousParams {
            spatial_scale: 0.0,
            ..LissajousParams::default()
        };
        let item = item_at(10.0, 10.0);
        // t = 0: x term is 0, y term is 90·sin(90°) = 90.
        let out = lissajous(&params, &item, &ctx(0.0, &flocks));
        assert!((out.target_angle - 90.0).abs() < 1e-3);
    }
}
