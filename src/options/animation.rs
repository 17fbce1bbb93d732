use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::kind::AnimationKind;
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pulse", inline)]
#[serde(default)]
/// Shape and limits of pulse envelopes.
pub struct PulseOptions {
    /// Envelope length in simulated milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 50.0, max = 10000.0))]
    pub duration_ms: f64,
    /// Heading offset at the envelope peak, in degrees.
    #[schemars(title = "Max Angle Offset", range(min = 0.0, max = 180.0))]
    pub max_angle_offset: f32,
    /// Length multiplier at the envelope peak.
    #[schemars(title = "Max Length Factor", range(min = 1.0, max = 4.0))]
    pub max_length_factor: f32,
    /// Default peak intensity for triggers that do not specify one.
    #[schemars(title = "Intensity", range(min = 0.0, max = 1.0))]
    pub intensity: f32,
    /// Fraction of the envelope spent rising.
    #[schemars(skip)]
    pub rise_fraction: f32,
    /// Maximum overlapping continuous pulses; further pulses are rejected.
    #[schemars(title = "Max Active Pulses", range(min = 1, max = 16))]
    pub max_active_pulses: u32,
    /// Attenuation applied per older overlapping pulse.
    #[schemars(title = "Fade Out Factor", range(min = 0.0, max = 1.0))]
    pub fade_out_factor: f32,
    /// Emit a batch-complete event after the per-entity events.
    #[schemars(skip)]
    pub notify_batch: bool,
    /// Curve of the rising phase.
    #[schemars(skip)]
    pub rise_easing: EasingFunction,
    /// Curve of the decaying phase (evaluated as `1 - f(t)`).
    #[schemars(skip)]
    pub decay_easing: EasingFunction,
}

impl Default for PulseOptions {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            max_angle_offset: 45.0,
            max_length_factor: 1.6,
            intensity: 1.0,
            rise_fraction: 0.3,
            rise_easing: EasingFunction::QuadraticOut,
            decay_easing: EasingFunction::QuadraticIn,
            max_active_pulses: 3,
            fade_out_factor: 0.6,
            notify_batch: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Strategy selection and engine-wide animation parameters.
pub struct AnimationOptions {
    /// Fraction of the remaining angular gap closed per tick (0 freezes).
    #[schemars(title = "Easing", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub easing_factor: f32,
    /// Simulated time per real time.
    #[schemars(title = "Time Scale", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub time_scale: f32,
    /// Stop advancing time and evaluating strategies.
    #[schemars(title = "Paused")]
    pub paused: bool,
    /// Modulate vector length from motion.
    #[schemars(title = "Dynamic Length")]
    pub dynamic_length: bool,
    /// Modulate stroke width from motion.
    #[schemars(title = "Dynamic Width")]
    pub dynamic_width: bool,
    /// Scale of the dynamic length/width modulation.
    #[schemars(title = "Dynamic Intensity", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub dynamic_intensity: f32,
    /// Minimum milliseconds between ticks (0 = every display refresh).
    #[schemars(title = "Throttle (ms)", range(min = 0.0, max = 1000.0))]
    pub throttle_ms: f64,
    /// Seed for random strategies.
    #[schemars(skip)]
    pub seed: u64,
    /// Pulse envelope options.
    pub pulse: PulseOptions,
    /// Active strategy and its parameters.
    #[schemars(skip)]
    pub kind: AnimationKind,
}

impl AnimationOptions {
    /// Easing factor clamped to `[0, 1]`; invalid values fall back to the
    /// default.
    #[must_use]
    pub fn resolved_easing(&self) -> f32 {
        if self.easing_factor.is_finite() {
            self.easing_factor.clamp(0.0, 1.0)
        } else {
            Self::default().easing_factor
        }
    }

    /// Time scale clamped to be non-negative; invalid values fall back to 1.
    #[must_use]
    pub fn resolved_time_scale(&self) -> f32 {
        if self.time_scale.is_finite() {
            self.time_scale.max(0.0)
        } else {
            1.0
        }
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            easing_factor: 0.1,
            time_scale: 1.0,
            paused: false,
            dynamic_length: false,
            dynamic_width: false,
            dynamic_intensity: 1.0,
            throttle_ms: 0.0,
            seed: 0x5EED,
            pulse: PulseOptions::default(),
            kind: AnimationKind::None,
        }
    }
}
