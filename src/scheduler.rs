//! Host-driven frame loop.
//!
//! [`AnimationLoop`] sits between a display callback and the engine: it
//! skips callbacks that arrive faster than the refresh/throttle pacing
//! allows, feeds real elapsed time into [`VectorGridEngine::tick`], and
//! debounces container resizes so a window drag does not rebuild the grid
//! on every event.

use web_time::{Duration, Instant};

pub use crate::util::frame_timing::FrameTiming;

use crate::engine::VectorGridEngine;
use crate::item::AnimatedVectorItem;

/// Quiet period a resize must survive before it reaches the engine.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Resize waiting out its debounce window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingResize {
    width: f32,
    height: f32,
    due: Instant,
}

/// Paces an engine against display refresh callbacks.
#[derive(Debug)]
pub struct AnimationLoop {
    engine: VectorGridEngine,
    timing: FrameTiming,
    refresh_hz: u32,
    pending_resize: Option<PendingResize>,
    cancelled: bool,
}

impl AnimationLoop {
    /// Drive `engine` at `refresh_hz` (0 = every callback), further
    /// throttled by the engine's `throttle_ms` option.
    #[must_use]
    pub fn new(engine: VectorGridEngine, refresh_hz: u32) -> Self {
        let timing =
            FrameTiming::new(refresh_hz, engine.options().animation.throttle_ms);
        Self {
            engine,
            timing,
            refresh_hz,
            pending_resize: None,
            cancelled: false,
        }
    }

    /// Handle one display callback at `now`.
    ///
    /// Returns the freshly ticked items, or `None` when the loop is
    /// cancelled or the callback arrived before the next frame was due.
    pub fn on_frame(&mut self, now: Instant) -> Option<&[AnimatedVectorItem]> {
        if self.cancelled {
            return None;
        }

        if let Some(pending) = self.pending_resize {
            if now >= pending.due {
                self.pending_resize = None;
                self.engine.resize(pending.width, pending.height);
            }
        }

        // throttle_ms may have changed through set_options
        self.timing.reconfigure(
            self.refresh_hz,
            self.engine.options().animation.throttle_ms,
        );
        if !self.timing.should_render(now) {
            return None;
        }

        let elapsed = self.timing.end_frame(now);
        let dt_ms = elapsed.as_secs_f64() * 1000.0;
        Some(self.engine.tick(dt_ms))
    }

    /// Queue a container resize. Repeated requests restart the window; the
    /// last one wins.
    pub fn request_resize(&mut self, width: f32, height: f32, now: Instant) {
        if self.cancelled {
            return;
        }
        self.pending_resize = Some(PendingResize {
            width,
            height,
            due: now + RESIZE_DEBOUNCE,
        });
    }

    /// Whether a resize is still waiting for its window to close.
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// Stop the loop. Pending resizes are discarded and later callbacks
    /// return `None`.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("animation loop cancelled");
        }
        self.cancelled = true;
        self.pending_resize = None;
        self.timing.reset();
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// The driven engine.
    #[must_use]
    pub fn engine(&self) -> &VectorGridEngine {
        &self.engine
    }

    /// Mutable access for pointer updates, options and pulses.
    pub fn engine_mut(&mut self) -> &mut VectorGridEngine {
        &mut self.engine
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
