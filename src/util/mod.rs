//! Shared utilities for the animation engine.
//!
//! Helpers for frame timing, hashing, color ramps, and easing curves.

pub mod color_ramp;
pub mod easing;
pub mod frame_timing;
pub mod hash;
