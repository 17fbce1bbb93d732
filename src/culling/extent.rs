//! Rendered extent of one vector: endpoints from the rotation origin and an
//! axis-aligned bound for viewport tests.

use glam::Vec2;

use crate::animation::angle::direction_of;
use crate::item::AnimatedVectorItem;
use crate::options::{RotationOrigin, VectorOptions, VectorShape};

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Grow by `amount` on every side.
    #[must_use]
    pub fn expand(self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Whether the rectangles overlap (touching counts).
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Whether `other` lies entirely inside `self`.
    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}

/// Shape parameters needed to place a vector's endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorGeometry {
    /// Primitive shape.
    pub shape: VectorShape,
    /// Base length in pixels.
    pub length: f32,
    /// Base stroke width in pixels.
    pub stroke_width: f32,
    /// Pivot of rotation.
    pub rotation_origin: RotationOrigin,
}

impl VectorGeometry {
    /// Geometry from appearance options, with invalid sizes replaced by
    /// defaults.
    #[must_use]
    pub fn from_options(options: &VectorOptions) -> Self {
        let defaults = VectorOptions::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            shape: options.shape,
            length: positive(options.length, defaults.length),
            stroke_width: positive(options.stroke_width, defaults.stroke_width),
            rotation_origin: options.rotation_origin,
        }
    }

    /// Effective length after the item's dynamic scale.
    #[inline]
    #[must_use]
    pub fn length_of(&self, item: &AnimatedVectorItem) -> f32 {
        self.length * item.length_factor.max(0.0)
    }

    /// Effective stroke width after the item's dynamic scale.
    #[inline]
    #[must_use]
    pub fn stroke_of(&self, item: &AnimatedVectorItem) -> f32 {
        self.stroke_width * item.width_factor.max(0.0)
    }

    /// Tail and tip of the rotated vector.
    #[must_use]
    pub fn endpoints(&self, item: &AnimatedVectorItem) -> (Vec2, Vec2) {
        if self.shape == VectorShape::Dot {
            return (item.base, item.base);
        }
        let along = direction_of(item.current_angle) * self.length_of(item);
        let tail = item.base - along * self.rotation_origin.tail_fraction();
        (tail, tail + along)
    }

    /// Half the width of the drawn shape perpendicular to its axis.
    #[must_use]
    pub fn half_width(&self, item: &AnimatedVectorItem) -> f32 {
        let stroke = self.stroke_of(item) * 0.5;
        match self.shape {
            VectorShape::Line | VectorShape::Dot => stroke,
            // Heads flare to roughly a third of the length.
            VectorShape::Arrow | VectorShape::Triangle => {
                stroke.max(self.length_of(item) * 0.15)
            }
        }
    }

    /// Axis-aligned bound of the rendered vector.
    #[must_use]
    pub fn bounds(&self, item: &AnimatedVectorItem) -> Rect {
        let (tail, tip) = self.endpoints(item);
        Rect::from_corners(tail, tip).expand(self.half_width(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(origin: RotationOrigin) -> VectorGeometry {
        VectorGeometry {
            shape: VectorShape::Line,
            length: 20.0,
            stroke_width: 2.0,
            rotation_origin: origin,
        }
    }

    fn item(angle: f32) -> AnimatedVectorItem {
        AnimatedVectorItem::new(0, 0, 0, Vec2::new(100.0, 100.0), angle, 0)
    }

    #[test]
    fn rotation_origin_places_tail() {
        let (tail, tip) = geometry(RotationOrigin::Start).endpoints(&item(0.0));
        assert!((tail - Vec2::new(100.0, 100.0)).length() < 1e-4);
        assert!((tip - Vec2::new(120.0, 100.0)).length() < 1e-4);

        let (tail, tip) = geometry(RotationOrigin::Center).endpoints(&item(90.0));
        assert!((tail - Vec2::new(100.0, 90.0)).length() < 1e-4);
        assert!((tip - Vec2::new(100.0, 110.0)).length() < 1e-4);

        let (tail, tip) = geometry(RotationOrigin::End).endpoints(&item(180.0));
        assert!((tail - Vec2::new(120.0, 100.0)).length() < 1e-4);
        assert!((tip - Vec2::new(100.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn bounds_follow_length_factor() {
        let mut it = item(0.0);
        it.length_factor = 2.0;
        let b = geometry(RotationOrigin::Start).bounds(&it);
        assert!((b.max.x - 141.0).abs() < 1e-4);
        assert!((b.min.y - 99.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_sizes_fall_back() {
        let opts = VectorOptions {
            length: -1.0,
            stroke_width: f32::NAN,
            ..VectorOptions::default()
        };
        let g = VectorGeometry::from_options(&opts);
        assert_eq!(g.length, 24.0);
        assert_eq!(g.stroke_width, 2.0);
    }

    #[test]
    fn rect_relations() {
        let outer = Rect::from_corners(Vec2::ZERO, Vec2::splat(10.0));
        let inner = Rect::from_corners(Vec2::splat(2.0), Vec2::splat(3.0));
        let apart = Rect::from_corners(Vec2::splat(11.0), Vec2::splat(12.0));
        assert!(outer.contains(&inner));
        assert!(outer.intersects(&inner));
        assert!(!outer.intersects(&apart));
        assert!(!inner.contains(&outer));
    }
}
