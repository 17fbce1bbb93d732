//! Read-only per-tick inputs and the mutable runtime shared by strategies.

use glam::Vec2;
use noise::Perlin;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::kind::CenterMode;
use crate::item::AnimatedVectorItem;
use crate::item::AnimationState;
use crate::layout::FlockIndex;

/// Ambient data visible to every strategy during one tick.
///
/// Built by the engine before evaluation and dropped before any item is
/// mutated, so `items` is always the consistent pre-tick snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Pointer in container pixels, `None` when outside or unknown.
    pub pointer: Option<Vec2>,
    /// Container size in pixels.
    pub size: Vec2,
    /// Resolved grid rows.
    pub rows: u32,
    /// Resolved grid columns.
    pub cols: u32,
    /// Elapsed simulated time in milliseconds.
    pub time_ms: f64,
    /// Every item of the current layout, pre-tick.
    pub items: &'a [AnimatedVectorItem],
    /// Flock buckets over `items`.
    pub flocks: &'a FlockIndex,
}

impl FrameContext<'_> {
    /// Elapsed simulated time in seconds.
    #[inline]
    #[must_use]
    pub fn time_secs(&self) -> f32 {
        (self.time_ms / 1000.0) as f32
    }

    /// Container center.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Half the container diagonal; the largest meaningful radius from the
    /// center.
    #[inline]
    #[must_use]
    pub fn half_diagonal(&self) -> f32 {
        self.size.length() * 0.5
    }

    /// Resolve an orbit center.
    #[must_use]
    pub fn resolve_center(&self, mode: CenterMode) -> Vec2 {
        match mode {
            CenterMode::Container => self.center(),
            CenterMode::Pointer => self.pointer.unwrap_or_else(|| self.center()),
            CenterMode::Fixed { x, y } => Vec2::new(x, y),
        }
    }
}

/// Mutable resources owned by the engine and lent to strategies.
#[derive(Debug, Clone)]
pub struct StrategyRuntime {
    /// Source of randomness for random strategies.
    pub rng: StdRng,
    noise: Option<(u32, Perlin)>,
}

impl StrategyRuntime {
    /// Runtime seeded for reproducible random strategies.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            noise: None,
        }
    }

    /// Re-seed the random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Perlin generator for `seed`, rebuilt only when the seed changes.
    pub fn perlin(&mut self, seed: u32) -> &Perlin {
        let noise = match self.noise.take() {
            Some((cached, perlin)) if cached == seed => (cached, perlin),
            _ => (seed, Perlin::new(seed)),
        };
        &self.noise.insert(noise).1
    }
}

/// What a strategy wants for one item this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyOutput {
    /// Goal heading in degrees (not necessarily normalized).
    pub target_angle: f32,
    /// Strategy-provided intensity for dynamic length/width (1 = neutral).
    pub scale: Option<f32>,
    /// Multiplier on the engine easing factor for this item.
    pub easing_scale: f32,
    /// Replacement animation state, if the strategy changed it.
    pub state: Option<AnimationState>,
}

impl StrategyOutput {
    /// Plain heading with no scale, easing or state changes.
    #[must_use]
    pub fn angle(target_angle: f32) -> Self {
        Self {
            target_angle,
            scale: None,
            easing_scale: 1.0,
            state: None,
        }
    }

    /// Attach a dynamic scale intensity.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}
