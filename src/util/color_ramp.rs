//! Normalized value → RGBA color mapping.
//!
//! Gradient color modes sample a [`ColorRamp`] with a per-vector `t` derived
//! from its grid position or heading.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A color ramp defined by N evenly-spaced RGBA color stops.
/// `t = 0` maps to the first color, `t = 1` maps to the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ColorRamp {
    stops: Vec<[f32; 4]>,
}

impl ColorRamp {
    /// Build a ramp from explicit stops. An empty list yields the default
    /// ramp.
    #[must_use]
    pub fn new(stops: Vec<[f32; 4]>) -> Self {
        if stops.is_empty() {
            return Self::default();
        }
        Self { stops }
    }

    /// The ramp's color stops.
    #[must_use]
    pub fn stops(&self) -> &[[f32; 4]] {
        &self.stops
    }

    /// Interpolate the ramp at position `t` in [0, 1].
    #[must_use]
    pub fn sample(&self, t: f32) -> [f32; 4] {
        match self.stops.len() {
            0 => [1.0, 1.0, 1.0, 1.0],
            1 => self.stops[0],
            len => {
                let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
                let n = len - 1;
                let scaled = t * n as f32;
                let idx = (scaled as usize).min(n - 1);
                let frac = scaled - idx as f32;

                let a = &self.stops[idx];
                let b = &self.stops[idx + 1];
                [
                    a[0] + (b[0] - a[0]) * frac,
                    a[1] + (b[1] - a[1]) * frac,
                    a[2] + (b[2] - a[2]) * frac,
                    a[3] + (b[3] - a[3]) * frac,
                ]
            }
        }
    }
}

impl Default for ColorRamp {
    /// Teal → violet → coral
    fn default() -> Self {
        Self {
            stops: vec![
                [0.10, 0.75, 0.80, 1.0],
                [0.45, 0.30, 0.85, 1.0],
                [0.95, 0.40, 0.35, 1.0],
            ],
        }
    }
}
