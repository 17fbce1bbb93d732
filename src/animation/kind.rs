//! Animation kinds and their typed parameter payloads.
//!
//! Each variant of [`AnimationKind`] selects one motion function from the
//! catalog. Parameters serialize flattened next to the `type` tag so presets
//! read naturally:
//!
//! ```toml
//! [animation.kind]
//! type = "vortex"
//! strength = 0.05
//! ```

use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::util::easing::EasingFunction;

/// Fixed heading for every vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StaticAngleParams {
    /// Heading in degrees.
    pub angle: f32,
}

impl Default for StaticAngleParams {
    fn default() -> Self {
        Self { angle: 45.0 }
    }
}

/// Independent random retargeting per vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RandomLoopParams {
    /// Time between retargets, in simulated milliseconds.
    pub interval_ms: f64,
    /// Stretches (>1) or shortens (<1) the visual transition by dividing the
    /// easing factor.
    pub transition_duration_factor: f32,
}

impl Default for RandomLoopParams {
    fn default() -> Self {
        Self {
            interval_ms: 2000.0,
            transition_duration_factor: 1.0,
        }
    }
}

/// Smooth sinusoidal waves across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SmoothWavesParams {
    /// Spatial frequency in radians per pixel.
    pub wave_frequency: f32,
    /// Peak deviation from `base_angle`, in degrees.
    pub wave_amplitude: f32,
    /// Temporal speed in radians per second.
    pub wave_speed: f32,
    /// Heading the waves oscillate around.
    pub base_angle: f32,
}

impl Default for SmoothWavesParams {
    fn default() -> Self {
        Self {
            wave_frequency: 0.02,
            wave_amplitude: 30.0,
            wave_speed: 1.5,
            base_angle: 0.0,
        }
    }
}

/// Ocean-like waves: swell, ripples and crest/trough asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SeaWavesParams {
    /// Swell spatial frequency (radians per pixel).
    pub base_frequency: f32,
    /// Swell amplitude in degrees.
    pub base_amplitude: f32,
    /// Ripple spatial frequency (radians per pixel).
    pub ripple_frequency: f32,
    /// Ripple amplitude in degrees.
    pub ripple_amplitude: f32,
    /// Crest sharpening / trough flattening, 0 = symmetric.
    pub choppiness: f32,
    /// Temporal speed in radians per second.
    pub wave_speed: f32,
    /// Heading the sea oscillates around.
    pub base_angle: f32,
}

impl Default for SeaWavesParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.015,
            base_amplitude: 35.0,
            ripple_frequency: 0.06,
            ripple_amplitude: 8.0,
            choppiness: 0.35,
            wave_speed: 1.2,
            base_angle: 0.0,
        }
    }
}

/// Headings sampled from a coherent 3D noise field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PerlinFlowParams {
    /// Pixel → noise space scale.
    pub noise_scale: f64,
    /// Noise-space units advanced per simulated second.
    pub time_evolution_speed: f64,
    /// Degrees per unit of noise output.
    pub angle_multiplier: f32,
    /// Noise seed.
    pub seed: u32,
}

impl Default for PerlinFlowParams {
    fn default() -> Self {
        Self {
            noise_scale: 0.005,
            time_evolution_speed: 0.15,
            angle_multiplier: 360.0,
            seed: 0,
        }
    }
}

/// A uniform flow with bounded per-vector turbulence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DirectionalFlowParams {
    /// Flow heading in degrees.
    pub flow_angle: f32,
    /// Maximum turbulence offset in degrees.
    pub turbulence: f32,
    /// Turbulence oscillation speed in radians per second.
    pub turbulence_speed: f32,
    /// Spatial hash seed.
    pub seed: u64,
}

impl Default for DirectionalFlowParams {
    fn default() -> Self {
        Self {
            flow_angle: 45.0,
            turbulence: 20.0,
            turbulence_speed: 1.0,
            seed: 0,
        }
    }
}

/// Where orbital strategies place their center.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum CenterMode {
    /// Container center.
    #[default]
    Container,
    /// Current pointer, falling back to the container center.
    Pointer,
    /// Fixed position in container pixels.
    Fixed {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
}

/// Rotational sense of orbital motion (screen space, y down).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
    Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SwirlDirection {
    /// Clockwise on screen.
    #[default]
    Clockwise,
    /// Counter-clockwise on screen.
    CounterClockwise,
}

impl SwirlDirection {
    /// Offset from the outward radial heading to the tangent heading.
    #[must_use]
    pub fn tangent_offset(self) -> f32 {
        match self {
            SwirlDirection::Clockwise => 90.0,
            SwirlDirection::CounterClockwise => -90.0,
        }
    }
}

/// Classic tangent field: every vector perpendicular to its radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TangenteClasicaParams {
    /// Orbit sense.
    pub direction: SwirlDirection,
    /// Additional uniform spin, degrees per simulated second.
    pub rotation_speed: f32,
    /// Orbit center.
    pub center: CenterMode,
}

impl Default for TangenteClasicaParams {
    fn default() -> Self {
        Self {
            direction: SwirlDirection::Clockwise,
            rotation_speed: 0.0,
            center: CenterMode::Container,
        }
    }
}

/// Swirl whose intensity decays with radial distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VortexParams {
    /// Swirl sense.
    pub direction: SwirlDirection,
    /// Peak intensity at the center; drives the length boost.
    pub strength: f32,
    /// Exponent applied to the normalized radial falloff.
    pub falloff_exponent: f32,
    /// Degrees the heading tilts toward the center at full intensity.
    pub inward_pull: f32,
    /// Vortex center.
    pub center: CenterMode,
}

impl Default for VortexParams {
    fn default() -> Self {
        Self {
            direction: SwirlDirection::Clockwise,
            strength: 0.05,
            falloff_exponent: 1.5,
            inward_pull: 0.0,
            center: CenterMode::Pointer,
        }
    }
}

/// Two independent sinusoids combined into one heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LissajousParams {
    /// Temporal frequency of the x term (radians per second).
    pub frequency_x: f32,
    /// Temporal frequency of the y term (radians per second).
    pub frequency_y: f32,
    /// Amplitude of the x term in degrees.
    pub amplitude_x: f32,
    /// Amplitude of the y term in degrees.
    pub amplitude_y: f32,
    /// Phase of the y term relative to x, in degrees.
    pub phase_offset: f32,
    /// Global time multiplier.
    pub time_speed: f32,
    /// Spatial phase per pixel (radians per pixel).
    pub spatial_scale: f32,
}

impl Default for LissajousParams {
    fn default() -> Self {
        Self {
            frequency_x: 1.0,
            frequency_y: 2.0,
            amplitude_x: 90.0,
            amplitude_y: 90.0,
            phase_offset: 90.0,
            time_speed: 1.0,
            spatial_scale: 0.01,
        }
    }
}

/// Layouts available to the geometric pattern strategy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
    Default,
)]
#[serde(rename_all = "snake_case")]
pub enum GeometricLayout {
    /// Headings twist with distance from the grid center.
    #[default]
    Spiral,
    /// Headings point away from the grid center.
    Radial,
    /// Rings of alternating tilt travelling outward.
    Concentric,
    /// Alternating orthogonal headings per cell.
    Grid,
}

/// Closed-form patterns over `(row, col, time)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeometricPatternParams {
    /// Layout selector.
    pub pattern: GeometricLayout,
    /// Uniform rotation in degrees per simulated second.
    pub rotation_speed: f32,
    /// Pattern density in radians per cell.
    pub density: f32,
}

impl Default for GeometricPatternParams {
    fn default() -> Self {
        Self {
            pattern: GeometricLayout::Spiral,
            rotation_speed: 30.0,
            density: 0.5,
        }
    }
}

/// Effect a pointer has on nearby vectors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
    Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PointerEffect {
    /// Point toward the pointer.
    #[default]
    Attract,
    /// Point away from the pointer.
    Repel,
    /// Share the heading from the container center to the pointer.
    Align,
    /// Orbit around the pointer.
    Swirl,
}

/// Distance falloff curve shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
    Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `1 - d`
    Linear,
    /// `(1 - d)²`
    #[default]
    Quadratic,
    /// Normalized `e^(-4d)`
    Exponential,
}

impl Falloff {
    /// Easing curve whose complement is this falloff.
    #[must_use]
    pub fn curve(self) -> EasingFunction {
        match self {
            Falloff::Linear => EasingFunction::Linear,
            Falloff::Quadratic => EasingFunction::QuadraticOut,
            Falloff::Exponential => EasingFunction::ExponentialOut { rate: 4.0 },
        }
    }

    /// Weight at normalized distance `d` (0 at the source, 1 at the edge of
    /// the radius). Always in `[0, 1]`, 1 at `d = 0`, 0 at `d >= 1`.
    #[must_use]
    pub fn weight(self, d: f32) -> f32 {
        if !d.is_finite() {
            return 0.0;
        }
        1.0 - self.curve().evaluate(d)
    }
}

/// Pointer-reactive field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MouseInteractionParams {
    /// Effect type.
    pub effect: PointerEffect,
    /// Radius in pixels beyond which the pointer has no effect.
    pub interaction_radius: f32,
    /// Effect weight at the pointer, clamped to `[0, 1]` after falloff.
    pub strength: f32,
    /// Falloff curve over `interaction_radius`.
    pub falloff: Falloff,
}

impl Default for MouseInteractionParams {
    fn default() -> Self {
        Self {
            effect: PointerEffect::Attract,
            interaction_radius: 150.0,
            strength: 1.0,
            falloff: Falloff::Quadratic,
        }
    }
}

/// Boids-style heading consensus within a flock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FlockingParams {
    /// Radius (pixels) within which same-flock members are neighbors.
    pub perception_radius: f32,
    /// Neighbors closer than this push the heading away.
    pub separation_distance: f32,
    /// Weight of the separation vector.
    pub separation_weight: f32,
    /// Weight of the mean neighbor heading.
    pub alignment_weight: f32,
    /// Weight of the direction to the neighbor centroid.
    pub cohesion_weight: f32,
}

impl Default for FlockingParams {
    fn default() -> Self {
        Self {
            perception_radius: 80.0,
            separation_distance: 30.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
        }
    }
}

/// Pulses radiating from the container center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CenterPulseParams {
    /// Fire a new pulse every `pulse_interval_ms` instead of waiting for
    /// triggers.
    pub continuous: bool,
    /// Interval between continuous pulses (simulated ms).
    pub pulse_interval_ms: f64,
    /// Ring propagation speed in pixels per simulated ms; 0 = every vector
    /// starts at once.
    pub propagation_speed: f32,
}

impl Default for CenterPulseParams {
    fn default() -> Self {
        Self {
            continuous: false,
            pulse_interval_ms: 1500.0,
            propagation_speed: 0.5,
        }
    }
}

/// The closed set of animation strategies.
///
/// Deserialization goes through [`from_tag`](AnimationKind::from_tag), so an
/// unknown `type` resolves to [`None`](AnimationKind::None) with a warning.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationKind {
    /// Headings stay where they are. Also the target of unknown tags.
    #[default]
    None,
    /// Every vector converges to one fixed heading.
    StaticAngle(StaticAngleParams),
    /// Every vector returns to its layout heading.
    RandomStatic,
    /// Independent periodic random retargeting.
    RandomLoop(RandomLoopParams),
    /// Smooth sinusoidal waves.
    SmoothWaves(SmoothWavesParams),
    /// Swell + ripple + choppiness.
    SeaWaves(SeaWavesParams),
    /// Coherent noise field.
    PerlinFlow(PerlinFlowParams),
    /// Uniform flow with hashed turbulence.
    DirectionalFlow(DirectionalFlowParams),
    /// Perpendicular-to-radius field.
    TangenteClasica(TangenteClasicaParams),
    /// Distance-attenuated swirl.
    Vortex(VortexParams),
    /// Two combined sinusoids.
    Lissajous(LissajousParams),
    /// Spiral / radial / concentric / grid patterns.
    GeometricPattern(GeometricPatternParams),
    /// Pointer-reactive field.
    MouseInteraction(MouseInteractionParams),
    /// Flock heading consensus.
    Flocking(FlockingParams),
    /// Pulse-driven; headings rest between pulses.
    CenterPulse(CenterPulseParams),
}

impl AnimationKind {
    /// Every tag accepted by [`from_tag`](Self::from_tag).
    pub const TAGS: [&'static str; 15] = [
        "none",
        "staticAngle",
        "randomStatic",
        "randomLoop",
        "smoothWaves",
        "seaWaves",
        "perlinFlow",
        "directionalFlow",
        "tangenteClasica",
        "vortex",
        "lissajous",
        "geometricPattern",
        "mouseInteraction",
        "flocking",
        "centerPulse",
    ];

    /// Default-parameterized kind for a tag. Unknown tags resolve to
    /// [`AnimationKind::None`] with a warning.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "none" => Self::None,
            "staticAngle" => Self::StaticAngle(StaticAngleParams::default()),
            "randomStatic" => Self::RandomStatic,
            "randomLoop" => Self::RandomLoop(RandomLoopParams::default()),
            "smoothWaves" => Self::SmoothWaves(SmoothWavesParams::default()),
            "seaWaves" => Self::SeaWaves(SeaWavesParams::default()),
            "perlinFlow" => Self::PerlinFlow(PerlinFlowParams::default()),
            "directionalFlow" => {
                Self::DirectionalFlow(DirectionalFlowParams::default())
            }
            "tangenteClasica" => {
                Self::TangenteClasica(TangenteClasicaParams::default())
            }
            "vortex" => Self::Vortex(VortexParams::default()),
            "lissajous" => Self::Lissajous(LissajousParams::default()),
            "geometricPattern" => {
                Self::GeometricPattern(GeometricPatternParams::default())
            }
            "mouseInteraction" => {
                Self::MouseInteraction(MouseInteractionParams::default())
            }
            "flocking" => Self::Flocking(FlockingParams::default()),
            "centerPulse" => Self::CenterPulse(CenterPulseParams::default()),
            other => {
                log::warn!("Unknown animation type '{other}', using 'none'");
                Self::None
            }
        }
    }

    /// Kind for `tag` with parameters read from the tagged map `value`.
    /// Parameterless and unknown tags go through [`from_tag`](Self::from_tag).
    fn from_tagged(
        tag: &str,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        fn params<T: DeserializeOwned>(
            value: serde_json::Value,
        ) -> Result<T, serde_json::Error> {
            serde_json::from_value(value)
        }

        Ok(match tag {
            "staticAngle" => Self::StaticAngle(params(value)?),
            "randomLoop" => Self::RandomLoop(params(value)?),
            "smoothWaves" => Self::SmoothWaves(params(value)?),
            "seaWaves" => Self::SeaWaves(params(value)?),
            "perlinFlow" => Self::PerlinFlow(params(value)?),
            "directionalFlow" => Self::DirectionalFlow(params(value)?),
            "tangenteClasica" => Self::TangenteClasica(params(value)?),
            "vortex" => Self::Vortex(params(value)?),
            "lissajous" => Self::Lissajous(params(value)?),
            "geometricPattern" => Self::GeometricPattern(params(value)?),
            "mouseInteraction" => Self::MouseInteraction(params(value)?),
            "flocking" => Self::Flocking(params(value)?),
            "centerPulse" => Self::CenterPulse(params(value)?),
            other => Self::from_tag(other),
        })
    }

    /// Serialized tag of this kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StaticAngle(_) => "staticAngle",
            Self::RandomStatic => "randomStatic",
            Self::RandomLoop(_) => "randomLoop",
            Self::SmoothWaves(_) => "smoothWaves",
            Self::SeaWaves(_) => "seaWaves",
            Self::PerlinFlow(_) => "perlinFlow",
            Self::DirectionalFlow(_) => "directionalFlow",
            Self::TangenteClasica(_) => "tangenteClasica",
            Self::Vortex(_) => "vortex",
            Self::Lissajous(_) => "lissajous",
            Self::GeometricPattern(_) => "geometricPattern",
            Self::MouseInteraction(_) => "mouseInteraction",
            Self::Flocking(_) => "flocking",
            Self::CenterPulse(_) => "centerPulse",
        }
    }

    /// Whether two kinds select the same strategy, ignoring parameters.
    #[must_use]
    pub fn same_strategy(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl<'de> Deserialize<'de> for AnimationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| D::Error::missing_field("type"))?;
        Self::from_tagged(&tag, value).map_err(D::Error::custom)
    }
}
