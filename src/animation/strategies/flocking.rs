//! Boids-style heading consensus restricted to flock buckets.

use glam::Vec2;

use crate::animation::angle::{direction_of, heading_of};
use crate::animation::context::{FrameContext, StrategyOutput};
use crate::animation::kind::FlockingParams;
use crate::item::AnimatedVectorItem;

/// Separation, alignment and cohesion over same-flock neighbors within the
/// perception radius, steering from the item's own heading.
#[must_use]
pub fn flocking(
    params: &FlockingParams,
    item: &AnimatedVectorItem,
    ctx: &FrameContext<'_>,
) -> StrategyOutput {
    let perception = params.perception_radius.max(0.0);
    let too_close = params.separation_distance.max(0.0);

    let mut separation = Vec2::ZERO;
    let mut heading_sum = Vec2::ZERO;
    let mut centroid = Vec2::ZERO;
    let mut neighbors = 0_u32;

    let members = ctx.flocks.members(item.flock_id);
    for other in members.iter().filter_map(|&idx| ctx.items.get(idx)) {
        if other.id == item.id {
            continue;
        }
        let away = item.base - other.base;
        let distance = away.length();
        if distance > perception || distance <= f32::EPSILON {
            continue;
        }
        neighbors += 1;
        heading_sum += direction_of(other.current_angle);
        centroid += other.base;
        if distance < too_close {
            // Stronger push the closer the neighbor.
            separation += away / distance * (1.0 - distance / too_close);
        }
    }

    if neighbors == 0 {
        return StrategyOutput::angle(item.current_angle);
    }

    let n = neighbors as f32;
    let alignment = (heading_sum / n).normalize_or_zero();
    let cohesion = (centroid / n - item.base).normalize_or_zero();
    let separation = separation.normalize_or_zero();

    let steer = direction_of(item.current_angle)
        + separation * params.separation_weight
        + alignment * params.alignment_weight
        + cohesion * params.cohesion_weight;

    StrategyOutput::angle(heading_of(steer).unwrap_or(item.current_angle))
}
