//! Viewport culling for the per-frame output.
//!
//! Tests each vector's rendered bound against the container rectangle grown
//! by a padding margin. Culling is read-only: it selects and tags items, it
//! never changes them.

mod extent;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use self::extent::{Rect, VectorGeometry};
use crate::item::AnimatedVectorItem;
use crate::options::CullingOptions;

/// How much detail a renderer should spend on a vector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Intersects the visible container.
    #[default]
    Full,
    /// Only reaches into the padding band around the container.
    Reduced,
}

/// An item that survived culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleVector<'a> {
    /// The item, borrowed from the engine's array.
    pub item: &'a AnimatedVectorItem,
    /// Requested detail level.
    pub detail: DetailLevel,
}

/// Visible container plus padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// `[0, w] × [0, h]`.
    pub visible: Rect,
    /// `visible` grown by the padding on every side.
    pub padded: Rect,
}

impl Viewport {
    /// Viewport for a container, with negative or invalid padding treated as
    /// zero.
    #[must_use]
    pub fn new(size: Vec2, padding: f32) -> Self {
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let visible = Rect::from_corners(Vec2::ZERO, size.max(Vec2::ZERO));
        Self {
            visible,
            padded: visible.expand(padding),
        }
    }

    /// Classify a bound: `None` if outside the padded area.
    #[inline]
    #[must_use]
    pub fn classify(&self, bounds: &Rect, level_of_detail: bool) -> Option<DetailLevel> {
        if !self.padded.intersects(bounds) {
            return None;
        }
        if level_of_detail && !self.visible.intersects(bounds) {
            return Some(DetailLevel::Reduced);
        }
        Some(DetailLevel::Full)
    }
}

/// Read-time viewport filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CullingFilter {
    options: CullingOptions,
}

impl CullingFilter {
    /// Filter with the given options.
    #[must_use]
    pub fn new(options: CullingOptions) -> Self {
        Self { options }
    }

    /// Replace options.
    pub fn set_options(&mut self, options: CullingOptions) {
        self.options = options;
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &CullingOptions {
        &self.options
    }

    /// Items whose rendered extent reaches the padded viewport, in input
    /// order. With culling disabled every item passes at full detail.
    #[must_use]
    pub fn apply<'a>(
        &self,
        items: &'a [AnimatedVectorItem],
        size: Vec2,
        geometry: &VectorGeometry,
    ) -> Vec<VisibleVector<'a>> {
        if !self.options.enabled {
            return items
                .iter()
                .map(|item| VisibleVector {
                    item,
                    detail: DetailLevel::Full,
                })
                .collect();
        }

        let viewport = Viewport::new(size, self.options.padding);
        let lod = self.options.level_of_detail;
        items
            .iter()
            .filter_map(|item| {
                viewport
                    .classify(&geometry.bounds(item), lod)
                    .map(|detail| VisibleVector { item, detail })
            })
            .collect()
    }
}
