//! The per-cell animated entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Variant-specific mutable animation state.
///
/// Owned by whichever strategy is active; replaced wholesale when the
/// animation kind changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnimationState {
    /// The active strategy keeps no per-entity state.
    #[default]
    Idle,
    /// Random-loop retarget schedule.
    RandomLoop {
        /// Simulated time (ms) at which the next random target is rolled.
        next_random_time: f64,
    },
    /// Pointer interaction: the heading held while the pointer is absent or
    /// out of range.
    Pointer {
        /// Angle captured when the interaction strategy became active.
        rest_angle: f32,
    },
    /// Pulse-driven animation: the pre-pulse heading.
    Pulse {
        /// Angle captured when the pulse strategy became active.
        rest_angle: f32,
    },
}

/// One grid cell's animated vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedVectorItem {
    /// Stable identifier: `row * cols + col` of the resolved grid.
    pub id: u32,
    /// Grid row.
    pub r: u32,
    /// Grid column.
    pub c: u32,
    /// Anchor position in container pixels. Fixed for the layout's lifetime.
    pub base: Vec2,
    /// Heading assigned at layout time.
    pub initial_angle: f32,
    /// Rendered heading, in `[0, 360)`.
    pub current_angle: f32,
    /// Rendered heading before the last smoothing step.
    pub previous_angle: f32,
    /// Heading the smoothing step converges toward.
    pub target_angle: f32,
    /// Multiplier on the configured vector length.
    pub length_factor: f32,
    /// Multiplier on the configured stroke width.
    pub width_factor: f32,
    /// State owned by the active animation strategy.
    pub animation_state: AnimationState,
    /// Flock bucket used by neighbor-aware strategies.
    pub flock_id: u32,
    /// Reserved extension slot; never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<serde_json::Value>,
}

impl AnimatedVectorItem {
    /// A fresh item at rest with all headings set to `initial_angle`.
    #[must_use]
    pub fn new(
        id: u32,
        r: u32,
        c: u32,
        base: Vec2,
        initial_angle: f32,
        flock_id: u32,
    ) -> Self {
        Self {
            id,
            r,
            c,
            base,
            initial_angle,
            current_angle: initial_angle,
            previous_angle: initial_angle,
            target_angle: initial_angle,
            length_factor: 1.0,
            width_factor: 1.0,
            animation_state: AnimationState::Idle,
            flock_id,
            custom_data: None,
        }
    }

    /// Anchor x coordinate.
    #[inline]
    #[must_use]
    pub fn base_x(&self) -> f32 {
        self.base.x
    }

    /// Anchor y coordinate.
    #[inline]
    #[must_use]
    pub fn base_y(&self) -> f32 {
        self.base.y
    }
}
