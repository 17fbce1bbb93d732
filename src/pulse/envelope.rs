//! Pulse envelope shape and the per-entity composite sample.

use crate::options::PulseOptions;

/// Envelope value at `progress` in `[0, 1)`, peaking at `intensity`.
///
/// Rises through `rise_easing` for the first `rise_fraction` of the pulse,
/// then decays as `1 - decay_easing` over the remainder.
#[must_use]
pub fn envelope(options: &PulseOptions, progress: f32, intensity: f32) -> f32 {
    if !(0.0..1.0).contains(&progress) {
        return 0.0;
    }
    let rise = if options.rise_fraction.is_finite() {
        options.rise_fraction.clamp(0.0, 1.0)
    } else {
        PulseOptions::default().rise_fraction
    };
    let shape = if progress < rise {
        options.rise_easing.evaluate(progress / rise.max(f32::EPSILON))
    } else {
        let decay_t = (progress - rise) / (1.0 - rise).max(f32::EPSILON);
        1.0 - options.decay_easing.evaluate(decay_t)
    };
    shape * intensity.max(0.0)
}

/// Combined pulse effect on one entity at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseSample {
    /// Combined envelope after attenuation, clamped to `[0, 1]`.
    pub envelope: f32,
    /// Degrees added to the strategy's target heading.
    pub angle_offset: f32,
    /// Multiplier on the entity's length.
    pub length_factor: f32,
}

impl PulseSample {
    /// No pulse effect.
    pub const NEUTRAL: PulseSample = PulseSample {
        envelope: 0.0,
        angle_offset: 0.0,
        length_factor: 1.0,
    };

    /// Sample for a combined envelope value.
    #[must_use]
    pub fn from_envelope(options: &PulseOptions, envelope: f32) -> Self {
        let envelope = envelope.clamp(0.0, 1.0);
        if envelope <= 0.0 {
            return Self::NEUTRAL;
        }
        Self {
            envelope,
            angle_offset: options.max_angle_offset * envelope,
            length_factor: 1.0 + (options.max_length_factor - 1.0) * envelope,
        }
    }

    /// Whether this sample changes anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.envelope > 0.0
    }
}
