//! Queries & output methods for VectorGridEngine

use glam::Vec2;

use super::VectorGridEngine;
use crate::culling::VisibleVector;
use crate::error::VectorGridError;
use crate::frame::{build_primitives, VectorPrimitive};
use crate::item::AnimatedVectorItem;
use crate::layout::GridDimensions;
use crate::pulse::{PulseEvent, PulsePhase};

impl VectorGridEngine {
    /// The items as of the last tick. Read-only between ticks.
    #[must_use]
    pub fn items(&self) -> &[AnimatedVectorItem] {
        &self.layout.items
    }

    /// Owned copy of the current items.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AnimatedVectorItem> {
        self.layout.items.clone()
    }

    /// Current items serialized as JSON.
    pub fn snapshot_json(&self) -> Result<String, VectorGridError> {
        Ok(serde_json::to_string_pretty(&self.layout.items)?)
    }

    /// Resolved grid dimensions of the current layout.
    #[must_use]
    pub fn grid_dimensions(&self) -> GridDimensions {
        self.layout.dims
    }

    /// Container size in pixels.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Elapsed simulated time in milliseconds.
    #[must_use]
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Number of ticks that advanced time.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Whether the engine is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.options.animation.paused
    }

    /// Items surviving viewport culling.
    #[must_use]
    pub fn visible(&self) -> Vec<VisibleVector<'_>> {
        self.culling
            .apply(&self.layout.items, self.size, &self.geometry)
    }

    /// Drawable primitives for the visible items.
    #[must_use]
    pub fn frame(&self) -> Vec<VectorPrimitive> {
        let visible = self.visible();
        build_primitives(
            &visible,
            &self.geometry,
            self.options.vector.stroke_cap,
            &self.colors,
            self.size,
        )
    }

    /// Pulse phase of an entity right now.
    #[must_use]
    pub fn pulse_phase(&self, id: u32) -> PulsePhase {
        self.pulses.phase(id, self.time_ms)
    }

    /// Drain pulse events emitted since the last call. Nothing is buffered
    /// while a pulse listener is installed, and at most
    /// [`MAX_BUFFERED_PULSE_EVENTS`](super::MAX_BUFFERED_PULSE_EVENTS) of
    /// the newest events are kept.
    pub fn take_pulse_events(&mut self) -> Vec<PulseEvent> {
        std::mem::take(&mut self.pulse_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culling::DetailLevel;
    use crate::options::{GridOptions, Options};

    fn engine() -> VectorGridEngine {
        let mut options = Options::default();
        options.grid = GridOptions {
            rows: Some(3),
            cols: Some(4),
            margin: 0.0,
            ..GridOptions::default()
        };
        VectorGridEngine::with_size(options, 400.0, 300.0)
    }

    #[test]
    fn dimensions_and_snapshot() {
        let mut engine = engine();
        let _ = engine.tick(16.0);
        let dims = engine.grid_dimensions();
        assert_eq!((dims.rows, dims.cols), (3, 4));
        assert!((dims.spacing - 100.0).abs() < 1e-4);
        assert_eq!(dims.extent, Vec2::new(400.0, 300.0));
        assert_eq!(engine.snapshot().len(), 12);
        assert_eq!(engine.tick_count(), 1);
    }

    #[test]
    fn snapshot_json_uses_camel_case() {
        let engine = engine();
        let json = engine.snapshot_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &parsed[0];
        assert!(first.get("currentAngle").is_some());
        assert!(first.get("flockId").is_some());
        assert_eq!(first["animationState"]["kind"], "idle");
        assert!(first.get("customData").is_none());
    }

    #[test]
    fn frame_matches_visible_items() {
        let mut engine = engine();
        let _ = engine.tick(16.0);
        let frame = engine.frame();
        assert_eq!(frame.len(), 12);
        assert!(frame.iter().all(|p| p.detail == DetailLevel::Full));
        assert_eq!(frame[5].id, engine.items()[5].id);
    }

    #[test]
    fn events_drain_once() {
        let mut engine = engine();
        assert!(engine.take_pulse_events().is_empty());
        assert_eq!(engine.pulse_phase(0), PulsePhase::Idle);
    }
}
