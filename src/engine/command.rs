//! The engine's external control vocabulary.
//!
//! Hosts that prefer message passing over direct method calls construct a
//! `VectorGridCommand` and hand it to
//! [`VectorGridEngine::execute`](super::VectorGridEngine::execute).

use glam::Vec2;

use crate::animation::kind::AnimationKind;
use crate::pulse::PulseTarget;

/// One externally invocable operation.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorGridCommand {
    // ── Pulses ──────────────────────────────────────────────────────
    /// Start a pulse on the given entities.
    TriggerPulse {
        /// Addressed entities.
        target: PulseTarget,
        /// Peak intensity; `None` uses the configured default.
        intensity: Option<f32>,
    },

    // ── Playback ────────────────────────────────────────────────────
    /// Toggle the pause flag.
    TogglePause,

    /// Switch the animation strategy.
    SetAnimation {
        /// New kind with its parameters.
        kind: AnimationKind,
    },

    // ── Inputs ──────────────────────────────────────────────────────
    /// Update the pointer position (`None` when it leaves the container).
    SetPointer {
        /// Pointer in container pixels.
        position: Option<Vec2>,
    },

    /// Report new container dimensions.
    Resize {
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
    },
}
