//! Easing curves shared by pulse envelopes and pointer falloff.
//!
//! All curves map `[0, 1]` onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`, so
//! they can be used both as progress easing (pulse rise/decay) and, inverted
//! as `1 - f(t)`, as distance falloff.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Normalized exponential ease-out: `(1 - e^(-rate·t)) / (1 - e^(-rate))`.
    ExponentialOut {
        /// Steepness of the curve. Values near zero degrade to linear.
        rate: f32,
    },
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing function: CubicHermite with c1=0.33, c2=1.0 for natural
    /// ease-out feel.
    pub const DEFAULT: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::SqrtOut => t.sqrt(),
            EasingFunction::ExponentialOut { rate } => {
                if rate.abs() < 1e-4 {
                    return t;
                }
                (1.0 - (-rate * t).exp()) / (1.0 - (-rate).exp())
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_hermite_ease_out_shape() {
        let hermite = EasingFunction::DEFAULT;
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!(hermite.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_exponential_out_normalized() {
        let exp = EasingFunction::ExponentialOut { rate: 4.0 };
        assert!(exp.evaluate(0.0).abs() < 1e-6);
        assert!((exp.evaluate(1.0) - 1.0).abs() < 1e-6);
        // Front-loaded: most of the progress happens early.
        assert!(exp.evaluate(0.25) > 0.5);

        let flat = EasingFunction::ExponentialOut { rate: 0.0 };
        assert_eq!(flat.evaluate(0.3), 0.3);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&EasingFunction::QuadraticOut)
            .unwrap();
        assert_eq!(json, r#"{"kind":"quadratic_out"}"#);
        let parsed: EasingFunction =
            serde_json::from_str(r#"{"kind":"exponential_out","rate":2.0}"#)
                .unwrap();
        assert_eq!(parsed, EasingFunction::ExponentialOut { rate: 2.0 });
    }
}
