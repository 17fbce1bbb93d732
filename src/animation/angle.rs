//! Degree-based angle helpers.
//!
//! Angles are in degrees, measured clockwise from the +x axis in screen
//! space (y grows downward), matching `atan2(dy, dx)` on screen coordinates.

use glam::Vec2;

/// Wrap an angle into `[0, 360)`. Non-finite input maps to 0.
#[inline]
#[must_use]
pub fn normalize_angle(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
#[inline]
#[must_use]
pub fn shortest_angular_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_angle(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// One exponential smoothing step of `current` toward `target`.
///
/// `easing` is clamped to `[0, 1]`: 0 freezes the angle, 1 snaps to the
/// target. The result is normalized to `[0, 360)`.
#[inline]
#[must_use]
pub fn smooth_angle(current: f32, target: f32, easing: f32) -> f32 {
    let easing = if easing.is_finite() {
        easing.clamp(0.0, 1.0)
    } else {
        0.0
    };
    normalize_angle(current + easing * shortest_angular_delta(current, target))
}

/// Heading of a direction vector in degrees; `None` for a zero vector.
#[inline]
#[must_use]
pub fn heading_of(v: Vec2) -> Option<f32> {
    if v.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(normalize_angle(v.y.atan2(v.x).to_degrees()))
}

/// Unit direction vector for a heading in degrees.
#[inline]
#[must_use]
pub fn direction_of(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
