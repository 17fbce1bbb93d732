use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color_ramp::ColorRamp;

/// Primitive drawn for each vector.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VectorShape {
    /// Plain stroke.
    #[default]
    Line,
    /// Stroke with an arrow head at the tip.
    Arrow,
    /// Filled triangle pointing along the heading.
    Triangle,
    /// Round dot at the anchor, one stroke width across.
    Dot,
}

/// Point of the vector that stays fixed at the anchor while it rotates.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationOrigin {
    /// Tail sits on the anchor.
    Start,
    /// Midpoint sits on the anchor.
    #[default]
    Center,
    /// Tip sits on the anchor.
    End,
}

impl RotationOrigin {
    /// Fraction of the vector length lying behind the anchor.
    #[must_use]
    pub fn tail_fraction(self) -> f32 {
        match self {
            RotationOrigin::Start => 0.0,
            RotationOrigin::Center => 0.5,
            RotationOrigin::End => 1.0,
        }
    }
}

/// Stroke end-cap style.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    /// Flat, ends exactly at the endpoint.
    Butt,
    /// Semicircular cap.
    #[default]
    Round,
    /// Square cap extending half the stroke width.
    Square,
}

/// Quantity a gradient is sampled along.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GradientAxis {
    /// Left → right across the container.
    #[default]
    Horizontal,
    /// Top → bottom across the container.
    Vertical,
    /// Top-left → bottom-right.
    Diagonal,
    /// Container center → corners.
    Radial,
    /// Current heading, 0° → 360°.
    Angle,
}

/// Static color descriptor. Per-entity callbacks are supplied at runtime via
/// [`DynamicColorFn`](crate::frame::DynamicColorFn).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMode {
    /// One color for every vector.
    Solid {
        /// Linear RGBA.
        rgba: [f32; 4],
    },
    /// Color sampled from a ramp.
    Gradient {
        /// Gradient stops.
        ramp: ColorRamp,
        /// Sampling axis.
        axis: GradientAxis,
    },
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Solid {
            rgba: VectorOptions::FALLBACK_COLOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Vector", inline)]
#[serde(default)]
/// Appearance of each vector primitive.
pub struct VectorOptions {
    /// Primitive shape.
    #[schemars(title = "Shape")]
    pub shape: VectorShape,
    /// Base length in pixels.
    #[schemars(title = "Length", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub length: f32,
    /// Base stroke width in pixels.
    #[schemars(title = "Stroke Width", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub stroke_width: f32,
    /// Pivot of rotation.
    #[schemars(title = "Rotation Origin")]
    pub rotation_origin: RotationOrigin,
    /// Stroke cap.
    #[schemars(title = "Stroke Cap")]
    pub stroke_cap: StrokeCap,
    /// Color descriptor.
    #[schemars(skip)]
    pub color: ColorMode,
}

impl VectorOptions {
    /// Color used when a per-entity color cannot be computed.
    pub const FALLBACK_COLOR: [f32; 4] = [0.85, 0.88, 0.92, 1.0];
}

impl Default for VectorOptions {
    fn default() -> Self {
        Self {
            shape: VectorShape::Line,
            length: 24.0,
            stroke_width: 2.0,
            rotation_origin: RotationOrigin::Center,
            stroke_cap: StrokeCap::Round,
            color: ColorMode::default(),
        }
    }
}
