//! Orbital strategies over an item's polar position around a center.

use crate::animation::angle::heading_of;
use crate::animation::context::{FrameContext, StrategyOutput};
use crate::animation::kind::{TangenteClasicaParams, VortexParams};
use crate::item::AnimatedVectorItem;

/// Length boost per unit of vortex strength at full influence.
const VORTEX_LENGTH_GAIN: f32 = 10.0;

/// Perpendicular to the radius, plus optional uniform spin.
#[must_use]
pub fn tangente_clasica(
    params: &TangenteClasicaParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let center = ctx.resolve_center(params.center);
    // An item sitting on the center has no radius: keep its heading.
    let Some(radial) = heading_of(item.base - center) else {
        return StrategyOutput::angle(item.current_angle);
    };
    let spin = params.rotation_speed * ctx.time_secs();
    StrategyOutput::angle(radial + params.direction.tangent_offset() + spin)
}

/// Influence of a vortex at distance `d`, in `[0, 1]`.
///
/// `(1 - min(d / r, 1))^exponent` with `r` the half diagonal of the
/// container.
#[must_use]
pub fn vortex_influence(d: f32, half_diagonal: f32, exponent: f32) -> f32 {
    if half_diagonal <= 0.0 || !d.is_finite() {
        return 0.0;
    }
    let exponent = if exponent.is_finite() {
        exponent.max(0.0)
    } else {
        VortexParams::default().falloff_exponent
    };
    (1.0 - (d / half_diagonal).min(1.0)).powf(exponent)
}

/// Tangential swirl whose strength decays with distance from the center.
#[must_use]
pub fn vortex(
    params: &VortexParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let center = ctx.resolve_center(params.center);
    let offset = item.base - center;
    let Some(radial) = heading_of(offset) else {
        return StrategyOutput::angle(item.current_angle);
    };

    let influence = vortex_influence(
        offset.length(),
        ctx.half_diagonal(),
        params.falloff_exponent,
    );
    let tangent = params.direction.tangent_offset();
    let pull = tangent.signum() * params.inward_pull * influence;
    let strength = params.strength.max(0.0);

    StrategyOutput::angle(radial + tangent + pull)
        .with_scale(1.0 + strength * VORTEX_LENGTH_GAIN * influence)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::animation::angle::{direction_of, normalize_angle};
    use crate::animation::kind::{CenterMode, SwirlDirection};
    use crate::layout::FlockIndex;

    fn ctx(pointer: Option<Vec2>, flocks: &FlockIndex) -> FrameContext<'_> {
        FrameContext {
            pointer,
            size: Vec2::new(800.0, 600.0),
            rows: 10,
            cols: 10,
            time_ms: 0.0,
            items: &[],
            flocks,
        }
    }

    fn item_at(p: Vec2) -> AnimatedVectorItem {
        AnimatedVectorItem::new(0, 0, 0, p, 0.0, 0)
    }

    #[test]
    fn vortex_is_tangential_in_every_quadrant() {
        let flocks = FlockIndex::default();
        let center = Vec2::new(400.0, 300.0);
        let c = ctx(Some(center), &flocks);
        let params = VortexParams {
            strength: 0.05,
            ..VortexParams::default()
        };
        for offset in [
            Vec2::new(120.0, -80.0),
            Vec2::new(-150.0, -40.0),
            Vec2::new(-60.0, 200.0),
            Vec2::new(90.0, 90.0),
        ] {
            let out = vortex(&params, &item_at(center + offset), &c);
            let heading = direction_of(out.target_angle);
            let radius = offset.normalize();
            assert!(heading.dot(radius).abs() < 1e-4, "offset {offset:?}");
        }
    }

    #[test]
    fn vortex_directions_are_opposite() {
        let flocks = FlockIndex::default();
        let c = ctx(Some(Vec2::new(400.0, 300.0)), &flocks);
        let item = item_at(Vec2::new(500.0, 300.0));
        let cw = vortex(&VortexParams::default(), &item, &c);
        let ccw = vortex(
            &VortexParams {
                direction: SwirlDirection::CounterClockwise,
                ..VortexParams::default()
            },
            &item,
            &c,
        );
        // Right of center: clockwise on screen (y down) points down.
        assert!((normalize_angle(cw.target_angle) - 90.0).abs() < 1e-4);
        assert!((normalize_angle(ccw.target_angle) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn vortex_falls_back_to_container_center() {
        let flocks = FlockIndex::default();
        let item = item_at(Vec2::new(400.0, 200.0));
        let with_pointer = vortex(
            &VortexParams::default(),
            &item,
            &ctx(Some(Vec2::new(400.0, 300.0)), &flocks),
        );
        let without = vortex(&VortexParams::default(), &item, &ctx(None, &flocks));
        assert_eq!(with_pointer, without);
    }

    #[test]
    fn vortex_influence_golden_values() {
        // Half diagonal of 800x600 is 500.
        let cases = [
            (0.0, 1.5, 1.0),
            (250.0, 1.0, 0.5),
            (250.0, 2.0, 0.25),
            (375.0, 1.5, 0.125),
            (500.0, 1.5, 0.0),
            (900.0, 1.5, 0.0),
        ];
        for (d, exponent, expected) in cases {
            let got = vortex_influence(d, 500.0, exponent);
            assert!((got - expected).abs() < 1e-5, "d={d} e={exponent}: {got}");
        }
        assert_eq!(vortex_influence(10.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn vortex_length_boost_decays_outward() {
        let flocks = FlockIndex::default();
        let c = ctx(Some(Vec2::new(400.0, 300.0)), &flocks);
        let params = VortexParams {
            strength: 0.05,
            falloff_exponent: 1.0,
            ..VortexParams::default()
        };
        let near = vortex(&params, &item_at(Vec2::new(400.0, 250.0)), &c);
        let far = vortex(&params, &item_at(Vec2::new(400.0, 50.0)), &c);
        // d = 50: influence 0.9, boost 1 + 0.05·10·0.9
        assert!((near.scale.unwrap_or_default() - 1.45).abs() < 1e-4);
        assert!(far.scale.unwrap_or_default() < near.scale.unwrap_or_default());
    }

    #[test]
    fn inward_pull_tilts_toward_center() {
        let flocks = FlockIndex::default();
        let c = ctx(Some(Vec2::new(400.0, 300.0)), &flocks);
        let params = VortexParams {
            inward_pull: 30.0,
            falloff_exponent: 0.0,
            ..VortexParams::default()
        };
        let offset = Vec2::new(100.0, 0.0);
        let out = vortex(&params, &item_at(Vec2::new(400.0, 300.0) + offset), &c);
        assert!(direction_of(out.target_angle).dot(-offset.normalize()) > 0.4);
    }

    #[test]
    fn tangente_follows_fixed_center_and_spin() {
        let flocks = FlockIndex::default();
        let mut c = ctx(None, &flocks);
        let params = TangenteClasicaParams {
            center: CenterMode::Fixed { x: 0.0, y: 0.0 },
            rotation_speed: 10.0,
            ..TangenteClasicaParams::default()
        };
        let item = item_at(Vec2::new(100.0, 0.0));
        assert!((tangente_clasica(&params, &item, &c).target_angle - 90.0).abs() < 1e-4);
        c.time_ms = 2000.0;
        assert!((tangente_clasica(&params, &item, &c).target_angle - 110.0).abs() < 1e-4);

        let mut centered = item_at(Vec2::ZERO);
        centered.current_angle = 33.0;
        assert_eq!(tangente_clasica(&params, &centered, &c).target_angle, 33.0);
    }
}
