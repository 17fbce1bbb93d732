//! Input methods for VectorGridEngine

use glam::Vec2;

use super::{VectorGridCommand, VectorGridEngine};
use crate::pulse::PulseTarget;

impl VectorGridEngine {
    /// Record the pointer position for the next tick.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        self.pointer = position.filter(|p| p.is_finite());
    }

    /// Current pointer position.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Record new container dimensions. The layout is rebuilt at the start
    /// of the next tick; `(0, 0)` means unready and yields no items.
    pub fn resize(&mut self, width: f32, height: f32) {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let size = Vec2::new(clean(width), clean(height));
        if size != self.size {
            log::debug!("container resized to {}x{}", size.x, size.y);
            self.size = size;
            self.layout_stale = true;
        }
    }

    /// Start a pulse. Under `centerPulse` the pulse propagates outward from
    /// the container center. Returns the batch id, or `None` if no entity
    /// matched.
    pub fn trigger_pulse(
        &mut self,
        target: &PulseTarget,
        intensity: Option<f32>,
    ) -> Option<u64> {
        self.ensure_layout();
        let propagation = self.pulse_propagation();
        self.pulses.trigger(
            target,
            intensity,
            self.time_ms,
            &self.layout.items,
            propagation,
        )
    }
}

impl VectorGridCommand {
    /// Apply this command to `engine`.
    pub fn execute(self, engine: &mut VectorGridEngine) {
        match self {
            Self::TriggerPulse { target, intensity } => {
                let _ = engine.trigger_pulse(&target, intensity);
            }
            Self::TogglePause => {
                let _ = engine.toggle_pause();
            }
            Self::SetAnimation { kind } => {
                let mut options = engine.options().clone();
                options.animation.kind = kind;
                engine.set_options(options);
            }
            Self::SetPointer { position } => engine.set_pointer(position),
            Self::Resize { width, height } => engine.resize(width, height),
        }
    }
}

impl VectorGridEngine {
    /// Execute a command. Equivalent to [`VectorGridCommand::execute`].
    pub fn execute(&mut self, command: VectorGridCommand) {
        command.execute(self);
    }
}
