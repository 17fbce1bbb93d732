//! The per-frame driver.
//!
//! [`VectorGridEngine`] owns the item array between ticks. Each
//! [`tick`](VectorGridEngine::tick) rebuilds a stale layout, advances
//! simulated time, evaluates the active strategy for every item, layers
//! pulses on top, smooths headings and writes dynamic scale. Pointer,
//! resize and option changes are recorded between ticks and take effect on
//! the next one.

mod command;
mod input;
mod options;
mod queries;

use glam::Vec2;

pub use self::command::VectorGridCommand;
use crate::animation::angle::{normalize_angle, shortest_angular_delta, smooth_angle};
use crate::animation::catalog;
use crate::animation::context::{FrameContext, StrategyOutput, StrategyRuntime};
use crate::animation::kind::AnimationKind;
use crate::culling::{CullingFilter, VectorGeometry};
use crate::frame::ColorResolver;
use crate::item::AnimatedVectorItem;
use crate::layout::{build_grid, GridLayout};
use crate::options::Options;
use crate::pulse::{ContinuousPulse, Propagation, PulseController, PulseEvent};

/// Angular speed (degrees per tick) at which the velocity-derived dynamic
/// scale saturates.
const VELOCITY_FULL_SCALE: f32 = 10.0;

/// Most pulse events held for [`VectorGridEngine::take_pulse_events`];
/// older ones are dropped first.
pub const MAX_BUFFERED_PULSE_EVENTS: usize = 4096;

/// Grid animation engine.
#[derive(Debug)]
pub struct VectorGridEngine {
    options: Options,
    size: Vec2,
    layout: GridLayout,
    layout_stale: bool,
    pointer: Option<Vec2>,
    time_ms: f64,
    runtime: StrategyRuntime,
    pulses: PulseController,
    culling: CullingFilter,
    colors: ColorResolver,
    geometry: VectorGeometry,
    scratch: Vec<StrategyOutput>,
    pulse_events: Vec<PulseEvent>,
    active_preset: Option<String>,
    ticks: u64,
}

impl VectorGridEngine {
    /// Engine for a container that is not measured yet. Call
    /// [`resize`](Self::resize) once dimensions are known.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let mut engine = Self {
            runtime: StrategyRuntime::new(options.animation.seed),
            pulses: PulseController::new(options.animation.pulse.clone()),
            culling: CullingFilter::new(options.culling.clone()),
            colors: ColorResolver::new(options.vector.color.clone()),
            geometry: VectorGeometry::from_options(&options.vector),
            options,
            size: Vec2::ZERO,
            layout: GridLayout::default(),
            layout_stale: true,
            pointer: None,
            time_ms: 0.0,
            scratch: Vec::new(),
            pulse_events: Vec::new(),
            active_preset: None,
            ticks: 0,
        };
        engine.sync_continuous_pulses();
        engine
    }

    /// Engine with known container dimensions and its layout built.
    #[must_use]
    pub fn with_size(options: Options, width: f32, height: f32) -> Self {
        let mut engine = Self::new(options);
        engine.resize(width, height);
        engine.ensure_layout();
        engine
    }

    /// Advance by `dt_ms` of real time and return the updated items.
    ///
    /// While paused nothing is evaluated and the items keep their last
    /// state; a stale layout is still rebuilt so culling and rendering can
    /// run on it.
    pub fn tick(&mut self, dt_ms: f64) -> &[AnimatedVectorItem] {
        self.ensure_layout();
        if self.options.animation.paused {
            return &self.layout.items;
        }

        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.time_ms +=
            dt * f64::from(self.options.animation.resolved_time_scale());
        self.ticks += 1;

        let events = self.pulses.update(self.time_ms, &self.layout.items);
        self.buffer_pulse_events(events);

        self.evaluate_strategies();
        self.apply_outputs();
        &self.layout.items
    }

    /// Rebuild the layout if a resize or grid change marked it stale.
    pub(crate) fn ensure_layout(&mut self) {
        if !self.layout_stale {
            return;
        }
        self.layout_stale = false;
        self.layout = build_grid(self.size.x, self.size.y, &self.options.grid);
        self.pulses.clear();
        self.reset_animation_states();
        self.sync_continuous_pulses();
        log::info!(
            "layout rebuilt: {}x{} grid, {} vectors in {}x{}",
            self.layout.dims.rows,
            self.layout.dims.cols,
            self.layout.items.len(),
            self.size.x,
            self.size.y
        );
    }

    /// Keep events for polling hosts. A listener already received them.
    fn buffer_pulse_events(&mut self, events: Vec<PulseEvent>) {
        if self.pulses.has_listener() {
            return;
        }
        self.pulse_events.extend(events);
        let excess = self
            .pulse_events
            .len()
            .saturating_sub(MAX_BUFFERED_PULSE_EVENTS);
        if excess > 0 {
            let _ = self.pulse_events.drain(..excess);
        }
    }

    /// Discard every item's strategy state and seed the active kind's
    /// defaults.
    fn reset_animation_states(&mut self) {
        let kind = &self.options.animation.kind;
        for item in &mut self.layout.items {
            item.animation_state = catalog::initial_state(
                kind,
                item,
                self.time_ms,
                &mut self.runtime.rng,
            );
        }
    }

    /// Fill the scratch buffer from the pre-tick snapshot.
    fn evaluate_strategies(&mut self) {
        let ctx = FrameContext {
            pointer: self.pointer,
            size: self.size,
            rows: self.layout.dims.rows,
            cols: self.layout.dims.cols,
            time_ms: self.time_ms,
            items: &self.layout.items,
            flocks: &self.layout.flocks,
        };
        let kind = &self.options.animation.kind;
        let runtime = &mut self.runtime;
        self.scratch.clear();
        self.scratch.extend(
            ctx.items
                .iter()
                .map(|item| catalog::evaluate(kind, item, &ctx, runtime)),
        );
    }

    /// Compose pulses, smooth and write scale into every item.
    fn apply_outputs(&mut self) {
        let anim = &self.options.animation;
        let easing = anim.resolved_easing();
        let intensity = if anim.dynamic_intensity.is_finite() {
            anim.dynamic_intensity.max(0.0)
        } else {
            1.0
        };

        for (item, out) in self.layout.items.iter_mut().zip(&self.scratch) {
            let pulse = self.pulses.sample(item.id, self.time_ms);
            let target = out.target_angle + pulse.angle_offset;
            let target = if target.is_finite() {
                normalize_angle(target)
            } else {
                item.target_angle
            };

            let item_easing = (easing * out.easing_scale).clamp(0.0, 1.0);
            item.previous_angle = item.current_angle;
            item.target_angle = target;
            item.current_angle = smooth_angle(item.current_angle, target, item_easing);
            if let Some(state) = out.state {
                item.animation_state = state;
            }

            let velocity =
                shortest_angular_delta(item.previous_angle, item.current_angle).abs();
            let motion = out
                .scale
                .unwrap_or_else(|| 1.0 + (velocity / VELOCITY_FULL_SCALE).min(1.0));
            let dynamic = (1.0 + (motion - 1.0) * intensity).max(0.0);

            let length = if anim.dynamic_length { dynamic } else { 1.0 };
            item.length_factor = length * pulse.length_factor;
            item.width_factor = if anim.dynamic_width { dynamic } else { 1.0 };
        }
    }

    /// Ring propagation for pulses under the `centerPulse` kind.
    fn pulse_propagation(&self) -> Option<Propagation> {
        match &self.options.animation.kind {
            AnimationKind::CenterPulse(p) => Some(Propagation {
                center: self.size * 0.5,
                speed: p.propagation_speed,
            }),
            _ => None,
        }
    }

    /// Align the continuous pulse schedule with the active kind.
    fn sync_continuous_pulses(&mut self) {
        let schedule = match &self.options.animation.kind {
            AnimationKind::CenterPulse(p) if p.continuous => {
                Some(ContinuousPulse {
                    interval_ms: p.pulse_interval_ms,
                    propagation: self.pulse_propagation(),
                })
            }
            _ => None,
        };
        self.pulses.set_continuous(schedule, self.time_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::kind::{
        CenterPulseParams, StaticAngleParams, VortexParams,
    };
    use crate::item::AnimationState;
    use crate::options::{GridOptions, InitialRotation};
    use crate::pulse::PulseTarget;

    fn options(kind: AnimationKind) -> Options {
        let mut options = Options::default();
        options.grid = GridOptions {
            rows: Some(6),
            cols: Some(8),
            margin: 0.0,
            initial_rotation: InitialRotation::Scattered { seed: 11 },
            ..GridOptions::default()
        };
        options.animation.kind = kind;
        options
    }

    fn engine(kind: AnimationKind) -> VectorGridEngine {
        VectorGridEngine::with_size(options(kind), 800.0, 600.0)
    }

    #[test]
    fn none_never_moves() {
        let mut engine = engine(AnimationKind::None);
        for _ in 0..120 {
            let _ = engine.tick(16.0);
        }
        assert_eq!(engine.items().len(), 48);
        for item in engine.items() {
            assert_eq!(item.current_angle, item.initial_angle);
            assert_eq!(item.length_factor, 1.0);
        }
    }

    #[test]
    fn unready_container_yields_no_items() {
        let mut engine = VectorGridEngine::new(options(AnimationKind::None));
        assert!(engine.tick(16.0).is_empty());
        engine.resize(800.0, 600.0);
        assert_eq!(engine.tick(16.0).len(), 48);
    }

    #[test]
    fn static_angle_converges() {
        let mut engine = engine(AnimationKind::StaticAngle(StaticAngleParams {
            angle: 10.0,
        }));
        for _ in 0..300 {
            let _ = engine.tick(16.0);
        }
        for item in engine.items() {
            assert!(shortest_angular_delta(item.current_angle, 10.0).abs() < 0.01);
            assert!((0.0..360.0).contains(&item.current_angle));
        }
    }

    #[test]
    fn pause_freezes_time_and_state() {
        let mut opts = options(AnimationKind::StaticAngle(StaticAngleParams {
            angle: 180.0,
        }));
        opts.animation.paused = true;
        let mut engine = VectorGridEngine::with_size(opts, 800.0, 600.0);
        let before = engine.snapshot();
        for _ in 0..10 {
            let _ = engine.tick(16.0);
        }
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.time_ms(), 0.0);

        let _ = engine.toggle_pause();
        let _ = engine.tick(16.0);
        assert!(engine.time_ms() > 0.0);
        assert_ne!(engine.snapshot(), before);
    }

    #[test]
    fn time_scale_multiplies_elapsed() {
        let mut opts = options(AnimationKind::None);
        opts.animation.time_scale = 2.5;
        let mut engine = VectorGridEngine::with_size(opts, 800.0, 600.0);
        let _ = engine.tick(100.0);
        assert!((engine.time_ms() - 250.0).abs() < 1e-9);
        let _ = engine.tick(f64::NAN);
        assert!((engine.time_ms() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn kind_switch_reseeds_state() {
        let mut engine = engine(AnimationKind::None);
        let _ = engine.tick(16.0);
        let mut opts = engine.options().clone();
        opts.animation.kind = AnimationKind::from_tag("mouseInteraction");
        engine.set_options(opts);
        for item in engine.items() {
            assert_eq!(
                item.animation_state,
                AnimationState::Pointer {
                    rest_angle: item.current_angle
                }
            );
        }

        let mut opts = engine.options().clone();
        opts.animation.kind = AnimationKind::None;
        engine.set_options(opts);
        assert!(engine
            .items()
            .iter()
            .all(|i| i.animation_state == AnimationState::Idle));
    }

    #[test]
    fn vortex_boosts_length_when_dynamic() {
        let mut opts = options(AnimationKind::Vortex(VortexParams::default()));
        opts.animation.dynamic_length = true;
        let mut engine = VectorGridEngine::with_size(opts, 800.0, 600.0);
        engine.set_pointer(Some(Vec2::new(400.0, 300.0)));
        let _ = engine.tick(16.0);
        assert!(engine.items().iter().all(|i| i.length_factor >= 1.0));
        assert!(engine.items().iter().any(|i| i.length_factor > 1.2));
        assert!(engine.items().iter().all(|i| i.width_factor == 1.0));
    }

    #[test]
    fn pulse_offsets_then_returns_to_baseline() {
        let mut opts = options(AnimationKind::CenterPulse(CenterPulseParams {
            propagation_speed: 0.0,
            ..CenterPulseParams::default()
        }));
        opts.animation.easing_factor = 1.0;
        opts.animation.pulse.duration_ms = 200.0;
        let mut engine = VectorGridEngine::with_size(opts, 800.0, 600.0);
        let _ = engine.tick(16.0);
        let rest = engine.items()[0].current_angle;

        assert!(engine.trigger_pulse(&PulseTarget::One(0), None).is_some());
        let _ = engine.tick(60.0);
        let pulsed = &engine.items()[0];
        assert!(shortest_angular_delta(rest, pulsed.current_angle).abs() > 1.0);
        assert!(pulsed.length_factor > 1.0);
        assert_eq!(engine.items()[1].length_factor, 1.0);

        for _ in 0..10 {
            let _ = engine.tick(50.0);
        }
        let settled = &engine.items()[0];
        assert!(shortest_angular_delta(rest, settled.current_angle).abs() < 1e-3);
        assert_eq!(settled.length_factor, 1.0);
        let events = engine.take_pulse_events();
        let completions = events
            .iter()
            .filter(|e| matches!(e, PulseEvent::EntityComplete { id: 0, .. }))
            .count();
        assert_eq!(completions, 1);
    }

    fn continuous_pulse_options() -> Options {
        let mut opts = options(AnimationKind::CenterPulse(CenterPulseParams {
            continuous: true,
            pulse_interval_ms: 100.0,
            propagation_speed: 0.0,
        }));
        opts.animation.pulse.duration_ms = 200.0;
        opts
    }

    #[test]
    fn polled_pulse_events_stay_bounded() {
        let mut engine =
            VectorGridEngine::with_size(continuous_pulse_options(), 800.0, 600.0);
        for _ in 0..1000 {
            let _ = engine.tick(16.0);
        }
        let events = engine.take_pulse_events();
        assert_eq!(events.len(), MAX_BUFFERED_PULSE_EVENTS);
        assert!(engine.take_pulse_events().is_empty());
    }

    #[test]
    fn listener_receives_events_instead_of_buffer() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let mut engine =
            VectorGridEngine::with_size(continuous_pulse_options(), 800.0, 600.0);
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);
        engine.set_pulse_listener(Some(Box::new(move |_event: &PulseEvent| {
            let _ = counter.fetch_add(1, Ordering::Relaxed);
        })));
        for _ in 0..200 {
            let _ = engine.tick(16.0);
        }
        assert!(delivered.load(Ordering::Relaxed) > 0);
        assert!(engine.take_pulse_events().is_empty());
    }

    #[test]
    fn resize_marks_layout_stale() {
        let mut engine = engine(AnimationKind::None);
        let _ = engine.tick(16.0);
        let spacing = engine.grid_dimensions().spacing;
        engine.resize(400.0, 300.0);
        // Applied on the next tick, not immediately.
        assert_eq!(engine.grid_dimensions().spacing, spacing);
        let _ = engine.tick(16.0);
        assert!((engine.grid_dimensions().spacing - spacing / 2.0).abs() < 1e-4);
    }
}
