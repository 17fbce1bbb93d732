use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Culling", inline)]
#[serde(default)]
/// Viewport culling and level-of-detail parameters.
pub struct CullingOptions {
    /// Drop vectors whose extent misses the padded viewport.
    #[schemars(title = "Enable Culling")]
    pub enabled: bool,
    /// Extra margin around the viewport, in pixels.
    #[schemars(title = "Padding", range(min = 0.0, max = 500.0))]
    pub padding: f32,
    /// Flag vectors visible only inside the padding band as reduced detail.
    #[schemars(title = "Level of Detail")]
    pub level_of_detail: bool,
}

impl Default for CullingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            padding: 50.0,
            level_of_detail: false,
        }
    }
}
