//! Transient pulses layered over the base animation.
//!
//! A pulse is a batch of entities sharing a start time. Each entity moves
//! through [`PulsePhase::Triggered`] (propagation delay pending) and
//! [`PulsePhase::Active`] (envelope running) before returning to idle, at
//! which point exactly one [`PulseEvent::EntityComplete`] is emitted for it.
//!
//! Explicit triggers restart: an entity that is already pulsing is moved to
//! the new batch and its envelope starts over. Continuous pulses instead
//! overlap, attenuated by `fade_out_factor` per older pulse.

mod envelope;

use glam::Vec2;
use rustc_hash::FxHashMap;

pub use self::envelope::{envelope, PulseSample};
use crate::item::AnimatedVectorItem;
use crate::options::PulseOptions;

/// Which entities a trigger addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PulseTarget {
    /// A single entity id.
    One(u32),
    /// A list of entity ids. Unknown ids are ignored.
    Many(Vec<u32>),
    /// Every entity in the current layout.
    All,
}

/// Pulse lifecycle of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PulsePhase {
    /// No pulse affects the entity.
    Idle,
    /// Triggered, waiting for the propagation front to arrive.
    Triggered,
    /// Envelope running.
    Active {
        /// Fraction of the duration elapsed, in `[0, 1)`.
        progress: f32,
    },
}

/// Completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseEvent {
    /// One entity's envelope finished.
    EntityComplete {
        /// Entity id.
        id: u32,
        /// Batch the entity belonged to.
        pulse_id: u64,
    },
    /// Every entity of a batch finished.
    BatchComplete {
        /// Batch id returned by [`PulseController::trigger`].
        pulse_id: u64,
    },
}

/// Ring propagation from a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    /// Point the ring expands from.
    pub center: Vec2,
    /// Pixels per simulated millisecond; 0 = instant.
    pub speed: f32,
}

impl Propagation {
    /// Delay (ms) before the ring reaches `point`.
    #[must_use]
    pub fn delay_ms(&self, point: Vec2) -> f64 {
        if self.speed.is_finite() && self.speed > 0.0 {
            f64::from(point.distance(self.center) / self.speed)
        } else {
            0.0
        }
    }
}

/// Continuous pulse schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousPulse {
    /// Interval between pulses (simulated ms).
    pub interval_ms: f64,
    /// Ring propagation for scheduled pulses.
    pub propagation: Option<Propagation>,
}

/// One batch of pulsing entities.
#[derive(Debug, Clone)]
struct Pulse {
    id: u64,
    start_ms: f64,
    intensity: f32,
    /// Entity id → propagation delay (ms).
    entities: FxHashMap<u32, f64>,
}

impl Pulse {
    fn elapsed(&self, id: u32, now_ms: f64) -> Option<f64> {
        self.entities
            .get(&id)
            .map(|delay| now_ms - self.start_ms - delay)
    }
}

/// Callback invoked for every [`PulseEvent`].
pub type PulseListener = Box<dyn FnMut(&PulseEvent) + Send>;

/// Owns every live pulse and the continuous schedule.
pub struct PulseController {
    options: PulseOptions,
    /// Oldest first.
    pulses: Vec<Pulse>,
    next_id: u64,
    continuous: Option<ContinuousPulse>,
    next_fire_ms: f64,
    listener: Option<PulseListener>,
    /// Batch events for superseded batches, delivered on the next update.
    superseded: Vec<PulseEvent>,
}

impl std::fmt::Debug for PulseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PulseController")
            .field("options", &self.options)
            .field("active_pulses", &self.pulses.len())
            .field("continuous", &self.continuous)
            .finish_non_exhaustive()
    }
}

impl PulseController {
    /// Controller with no live pulses.
    #[must_use]
    pub fn new(options: PulseOptions) -> Self {
        Self {
            options,
            pulses: Vec::new(),
            next_id: 1,
            continuous: None,
            next_fire_ms: 0.0,
            listener: None,
            superseded: Vec::new(),
        }
    }

    /// Replace envelope options; live pulses pick them up immediately.
    pub fn set_options(&mut self, options: PulseOptions) {
        self.options = options;
    }

    /// Current envelope options.
    #[must_use]
    pub fn options(&self) -> &PulseOptions {
        &self.options
    }

    /// Register a callback for completion events.
    pub fn set_listener(&mut self, listener: Option<PulseListener>) {
        self.listener = listener;
    }

    /// Whether a listener is installed.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Enable or disable continuous pulses. The first scheduled pulse fires
    /// on the next [`update`](Self::update).
    pub fn set_continuous(
        &mut self,
        schedule: Option<ContinuousPulse>,
        now_ms: f64,
    ) {
        if schedule.is_some() && self.continuous.is_none() {
            self.next_fire_ms = now_ms;
        }
        self.continuous = schedule;
    }

    /// Whether continuous pulses are scheduled.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.continuous.is_some()
    }

    /// Number of live batches.
    #[must_use]
    pub fn active_pulses(&self) -> usize {
        self.pulses.len()
    }

    /// Drop every live pulse without emitting events (layout rebuilds).
    pub fn clear(&mut self) {
        self.pulses.clear();
    }

    fn duration_ms(&self) -> f64 {
        let d = self.options.duration_ms;
        if d.is_finite() && d > 0.0 {
            d
        } else {
            PulseOptions::default().duration_ms
        }
    }

    fn max_active(&self) -> usize {
        self.options.max_active_pulses.max(1) as usize
    }

    /// Start a pulse. Returns the batch id, or `None` when no known entity
    /// was addressed.
    ///
    /// Entities already pulsing restart from zero in the new batch. An
    /// older batch left with no entities is retired; its
    /// [`PulseEvent::BatchComplete`] is emitted by the next
    /// [`update`](Self::update) when batch notification is on.
    pub fn trigger(
        &mut self,
        target: &PulseTarget,
        intensity: Option<f32>,
        now_ms: f64,
        items: &[AnimatedVectorItem],
        propagation: Option<Propagation>,
    ) -> Option<u64> {
        let pulse = self.build_pulse(target, intensity, now_ms, items, propagation)?;
        for older in &mut self.pulses {
            older.entities.retain(|id, _| !pulse.entities.contains_key(id));
        }
        let notify_batch = self.options.notify_batch;
        let superseded = &mut self.superseded;
        self.pulses.retain(|p| {
            if !p.entities.is_empty() {
                return true;
            }
            if notify_batch {
                superseded.push(PulseEvent::BatchComplete { pulse_id: p.id });
            }
            false
        });
        let id = pulse.id;
        log::debug!(
            "pulse {id} triggered for {} entities at {now_ms:.0}ms",
            pulse.entities.len()
        );
        self.pulses.push(pulse);
        Some(id)
    }

    fn build_pulse(
        &mut self,
        target: &PulseTarget,
        intensity: Option<f32>,
        now_ms: f64,
        items: &[AnimatedVectorItem],
        propagation: Option<Propagation>,
    ) -> Option<Pulse> {
        let delay = |item: &AnimatedVectorItem| {
            propagation.map_or(0.0, |p| p.delay_ms(item.base))
        };
        let entities: FxHashMap<u32, f64> = match target {
            PulseTarget::All => {
                items.iter().map(|item| (item.id, delay(item))).collect()
            }
            PulseTarget::One(id) => items
                .iter()
                .filter(|item| item.id == *id)
                .map(|item| (item.id, delay(item)))
                .collect(),
            PulseTarget::Many(ids) => {
                let by_id: FxHashMap<u32, &AnimatedVectorItem> =
                    items.iter().map(|item| (item.id, item)).collect();
                ids.iter()
                    .filter_map(|id| by_id.get(id))
                    .map(|item| (item.id, delay(item)))
                    .collect()
            }
        };
        if entities.is_empty() {
            log::debug!("pulse trigger {target:?} matched no entities");
            return None;
        }

        let intensity = intensity
            .filter(|i| i.is_finite())
            .unwrap_or(self.options.intensity)
            .clamp(0.0, 1.0);
        let id = self.next_id;
        self.next_id += 1;
        Some(Pulse {
            id,
            start_ms: now_ms,
            intensity,
            entities,
        })
    }

    /// Advance to `now_ms`: fire due continuous pulses and retire finished
    /// envelopes. Returns the completion events in emission order.
    pub fn update(
        &mut self,
        now_ms: f64,
        items: &[AnimatedVectorItem],
    ) -> Vec<PulseEvent> {
        self.fire_continuous(now_ms, items);

        let duration = self.duration_ms();
        let notify_batch = self.options.notify_batch;
        let mut events = std::mem::take(&mut self.superseded);
        self.pulses.retain_mut(|pulse| {
            let start = pulse.start_ms;
            let mut finished: Vec<u32> = pulse
                .entities
                .iter()
                .filter(|(_, delay)| now_ms - start - **delay >= duration)
                .map(|(id, _)| *id)
                .collect();
            finished.sort_unstable();
            for id in finished {
                let _ = pulse.entities.remove(&id);
                events.push(PulseEvent::EntityComplete {
                    id,
                    pulse_id: pulse.id,
                });
            }
            if pulse.entities.is_empty() {
                if notify_batch {
                    events.push(PulseEvent::BatchComplete { pulse_id: pulse.id });
                }
                return false;
            }
            true
        });

        if let Some(listener) = self.listener.as_mut() {
            for event in &events {
                listener(event);
            }
        }
        events
    }

    fn fire_continuous(&mut self, now_ms: f64, items: &[AnimatedVectorItem]) {
        let Some(schedule) = self.continuous else {
            return;
        };
        if now_ms < self.next_fire_ms {
            return;
        }
        let interval = if schedule.interval_ms.is_finite() && schedule.interval_ms > 0.0
        {
            schedule.interval_ms
        } else {
            self.duration_ms()
        };
        // Skip missed slots instead of bursting after a long frame.
        while self.next_fire_ms <= now_ms {
            self.next_fire_ms += interval;
        }

        if self.pulses.len() >= self.max_active() {
            log::debug!(
                "continuous pulse rejected: {} pulses active",
                self.pulses.len()
            );
            return;
        }
        if let Some(pulse) = self.build_pulse(
            &PulseTarget::All,
            None,
            now_ms,
            items,
            schedule.propagation,
        ) {
            self.pulses.push(pulse);
        }
    }

    /// Lifecycle phase of `id` at `now_ms`, from its newest pulse.
    #[must_use]
    pub fn phase(&self, id: u32, now_ms: f64) -> PulsePhase {
        let duration = self.duration_ms();
        let Some(elapsed) =
            self.pulses.iter().rev().find_map(|p| p.elapsed(id, now_ms))
        else {
            return PulsePhase::Idle;
        };
        if elapsed < 0.0 {
            PulsePhase::Triggered
        } else if elapsed < duration {
            PulsePhase::Active {
                progress: (elapsed / duration) as f32,
            }
        } else {
            PulsePhase::Idle
        }
    }

    /// Combined effect of every pulse on `id` at `now_ms`.
    ///
    /// Pulses are weighted `fade^k`, `k = 0` for the newest.
    #[must_use]
    pub fn sample(&self, id: u32, now_ms: f64) -> PulseSample {
        if self.pulses.is_empty() {
            return PulseSample::NEUTRAL;
        }
        let duration = self.duration_ms();
        let fade = self.options.fade_out_factor.clamp(0.0, 1.0);
        let mut weight = 1.0_f32;
        let mut combined = 0.0_f32;
        for pulse in self.pulses.iter().rev() {
            let Some(elapsed) = pulse.elapsed(id, now_ms) else {
                continue;
            };
            if elapsed >= 0.0 && elapsed < duration {
                let progress = (elapsed / duration) as f32;
                combined +=
                    weight * envelope(&self.options, progress, pulse.intensity);
            }
            weight *= fade;
        }
        PulseSample::from_envelope(&self.options, combined)
    }
}
