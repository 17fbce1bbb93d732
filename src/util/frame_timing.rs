//! Display-refresh and throttle pacing with a smoothed FPS readout.

use web_time::{Duration, Instant};

/// Longest accepted throttle interval; larger values are clamped.
pub const MAX_THROTTLE_MS: f64 = 60_000.0;

/// Frame pacing: display refresh or a throttle interval, whichever is
/// coarser, plus a smoothed FPS readout.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Minimum time between ticks.
    min_frame_duration: Duration,
    /// Timestamp of the last completed tick (None before the first one).
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer for the given display refresh rate (0 = unlimited)
    /// and throttle interval in milliseconds (0 = none).
    #[must_use]
    pub fn new(refresh_hz: u32, throttle_ms: f64) -> Self {
        Self {
            min_frame_duration: Self::min_duration(refresh_hz, throttle_ms),
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    fn min_duration(refresh_hz: u32, throttle_ms: f64) -> Duration {
        let refresh = if refresh_hz > 0 {
            Duration::from_secs_f64(1.0 / f64::from(refresh_hz))
        } else {
            Duration::ZERO
        };
        let throttle = if throttle_ms.is_finite() && throttle_ms > 0.0 {
            Duration::from_secs_f64(throttle_ms.min(MAX_THROTTLE_MS) / 1000.0)
        } else {
            Duration::ZERO
        };
        refresh.max(throttle)
    }

    /// Change the pacing without losing the FPS history.
    pub fn reconfigure(&mut self, refresh_hz: u32, throttle_ms: f64) {
        self.min_frame_duration = Self::min_duration(refresh_hz, throttle_ms);
    }

    /// Minimum spacing between ticks.
    #[must_use]
    pub fn min_frame_duration(&self) -> Duration {
        self.min_frame_duration
    }

    /// Whether enough time has passed since the last tick.
    #[must_use]
    pub fn should_render(&self, now: Instant) -> bool {
        self.last_frame.is_none_or(|last| {
            now.saturating_duration_since(last) >= self.min_frame_duration
        })
    }

    /// Record a tick at `now`, returning the real time elapsed since the
    /// previous one (zero for the first tick).
    pub fn end_frame(&mut self, now: Instant) -> Duration {
        let Some(last) = self.last_frame.replace(now) else {
            return Duration::ZERO;
        };
        let elapsed = now.saturating_duration_since(last);

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Forget the last tick so the next one reports zero elapsed time.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
