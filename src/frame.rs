//! Renderer-facing output: one positioned, colored primitive per visible
//! vector.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::culling::{DetailLevel, VectorGeometry, VisibleVector};
use crate::error::ColorError;
use crate::item::AnimatedVectorItem;
use crate::options::{ColorMode, GradientAxis, StrokeCap, VectorOptions, VectorShape};

/// Per-entity color callback supplied by the host at runtime.
pub type DynamicColorFn = Arc<
    dyn Fn(&AnimatedVectorItem) -> Result<[f32; 4], ColorError> + Send + Sync,
>;

/// A drawable vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorPrimitive {
    /// Id of the source item.
    pub id: u32,
    /// Tail point in container pixels.
    pub start: Vec2,
    /// Tip point in container pixels.
    pub end: Vec2,
    /// Stroke width in pixels after dynamic scaling.
    pub stroke_width: f32,
    /// Linear RGBA.
    pub color: [f32; 4],
    /// Primitive shape.
    pub shape: VectorShape,
    /// Stroke cap.
    pub cap: StrokeCap,
    /// Detail level requested by culling.
    pub detail: DetailLevel,
}

/// Resolves each vector's color from the static descriptor and an optional
/// runtime callback.
#[derive(Clone, Default)]
pub struct ColorResolver {
    mode: ColorMode,
    dynamic: Option<DynamicColorFn>,
}

impl fmt::Debug for ColorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorResolver")
            .field("mode", &self.mode)
            .field("dynamic", &self.dynamic.is_some())
            .finish()
    }
}

impl ColorResolver {
    /// Resolver for a static descriptor.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            dynamic: None,
        }
    }

    /// Replace the static descriptor.
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Install or remove the runtime callback. When present it takes
    /// precedence over the static descriptor.
    pub fn set_dynamic(&mut self, dynamic: Option<DynamicColorFn>) {
        self.dynamic = dynamic;
    }

    /// Color from the static descriptor.
    #[must_use]
    pub fn static_color(&self, item: &AnimatedVectorItem, size: Vec2) -> [f32; 4] {
        match &self.mode {
            ColorMode::Solid { rgba } => *rgba,
            ColorMode::Gradient { ramp, axis } => {
                ramp.sample(gradient_t(*axis, item, size))
            }
        }
    }

    /// Color for one item. Callback failures (errors or non-finite
    /// channels) fall back to [`VectorOptions::FALLBACK_COLOR`] for that
    /// item only.
    pub fn resolve(
        &self,
        item: &AnimatedVectorItem,
        size: Vec2,
    ) -> Result<[f32; 4], ColorError> {
        let Some(dynamic) = &self.dynamic else {
            return Ok(self.static_color(item, size));
        };
        let rgba = dynamic(item)?;
        if rgba.iter().all(|c| c.is_finite()) {
            Ok(rgba)
        } else {
            Err(ColorError(format!("non-finite color {rgba:?}")))
        }
    }
}

/// Position along a gradient axis, in `[0, 1]`.
#[must_use]
pub fn gradient_t(axis: GradientAxis, item: &AnimatedVectorItem, size: Vec2) -> f32 {
    let ratio = |v: f32, extent: f32| if extent > 0.0 { v / extent } else { 0.0 };
    let t = match axis {
        GradientAxis::Horizontal => ratio(item.base.x, size.x),
        GradientAxis::Vertical => ratio(item.base.y, size.y),
        GradientAxis::Diagonal => {
            0.5 * (ratio(item.base.x, size.x) + ratio(item.base.y, size.y))
        }
        GradientAxis::Radial => {
            ratio(item.base.distance(size * 0.5), size.length() * 0.5)
        }
        GradientAxis::Angle => item.current_angle / 360.0,
    };
    t.clamp(0.0, 1.0)
}

/// Assemble primitives for the visible vectors.
#[must_use]
pub fn build_primitives(
    visible: &[VisibleVector<'_>],
    geometry: &VectorGeometry,
    cap: StrokeCap,
    colors: &ColorResolver,
    size: Vec2,
) -> Vec<VectorPrimitive> {
    let mut failures = 0_usize;
    let mut first_error = None;
    let primitives = visible
        .iter()
        .map(|v| {
            let color = colors.resolve(v.item, size).unwrap_or_else(|e| {
                failures += 1;
                if first_error.is_none() {
                    first_error = Some((v.item.id, e));
                }
                VectorOptions::FALLBACK_COLOR
            });
            let (start, end) = geometry.endpoints(v.item);
            VectorPrimitive {
                id: v.item.id,
                start,
                end,
                stroke_width: geometry.stroke_of(v.item),
                color,
                shape: geometry.shape,
                cap,
                detail: v.detail,
            }
        })
        .collect();

    if let Some((id, e)) = first_error {
        log::warn!(
            "dynamic color failed for {failures} vector(s), using fallback \
             (first: id {id}: {e})"
        );
    }
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RotationOrigin;
    use crate::util::color_ramp::ColorRamp;

    const SIZE: Vec2 = Vec2::new(200.0, 100.0);

    fn item(id: u32, x: f32, y: f32) -> AnimatedVectorItem {
        AnimatedVectorItem::new(id, 0, id, Vec2::new(x, y), 90.0, 0)
    }

    fn geometry() -> VectorGeometry {
        VectorGeometry {
            shape: VectorShape::Arrow,
            length: 10.0,
            stroke_width: 2.0,
            rotation_origin: RotationOrigin::Start,
        }
    }

    #[test]
    fn gradient_axes() {
        let it = item(0, 50.0, 75.0);
        assert!((gradient_t(GradientAxis::Horizontal, &it, SIZE) - 0.25).abs() < 1e-6);
        assert!((gradient_t(GradientAxis::Vertical, &it, SIZE) - 0.75).abs() < 1e-6);
        assert!((gradient_t(GradientAxis::Diagonal, &it, SIZE) - 0.5).abs() < 1e-6);
        assert!((gradient_t(GradientAxis::Angle, &it, SIZE) - 0.25).abs() < 1e-6);
        let center = item(1, 100.0, 50.0);
        assert_eq!(gradient_t(GradientAxis::Radial, &center, SIZE), 0.0);
        assert_eq!(gradient_t(GradientAxis::Horizontal, &it, Vec2::ZERO), 0.0);
    }

    #[test]
    fn gradient_mode_samples_ramp() {
        let ramp = ColorRamp::new(vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]]);
        let colors = ColorResolver::new(ColorMode::Gradient {
            ramp,
            axis: GradientAxis::Horizontal,
        });
        let c = colors.static_color(&item(0, 50.0, 0.0), SIZE);
        assert!((c[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn failing_callback_only_affects_its_entity() {
        let mut colors = ColorResolver::new(ColorMode::default());
        colors.set_dynamic(Some(Arc::new(|item: &AnimatedVectorItem| {
            if item.id == 1 {
                Err(ColorError("boom".to_owned()))
            } else if item.id == 2 {
                Ok([f32::NAN, 0.0, 0.0, 1.0])
            } else {
                Ok([1.0, 0.0, 0.0, 1.0])
            }
        })));

        let items = [item(0, 10.0, 10.0), item(1, 20.0, 20.0), item(2, 30.0, 30.0)];
        let visible: Vec<_> = items
            .iter()
            .map(|item| VisibleVector {
                item,
                detail: DetailLevel::Full,
            })
            .collect();
        let prims = build_primitives(&visible, &geometry(), StrokeCap::Round, &colors, SIZE);
        assert_eq!(prims[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(prims[1].color, VectorOptions::FALLBACK_COLOR);
        assert_eq!(prims[2].color, VectorOptions::FALLBACK_COLOR);
    }

    #[test]
    fn primitive_geometry() {
        let colors = ColorResolver::default();
        let mut it = item(7, 50.0, 50.0);
        it.width_factor = 1.5;
        let visible = [VisibleVector {
            item: &it,
            detail: DetailLevel::Reduced,
        }];
        let prims = build_primitives(&visible, &geometry(), StrokeCap::Butt, &colors, SIZE);
        let p = prims[0];
        assert_eq!(p.id, 7);
        assert!((p.end - Vec2::new(50.0, 60.0)).length() < 1e-4);
        assert_eq!(p.stroke_width, 3.0);
        assert_eq!(p.detail, DetailLevel::Reduced);
        assert_eq!(p.shape, VectorShape::Arrow);
        assert_eq!(p.color, VectorOptions::FALLBACK_COLOR);
    }
}
