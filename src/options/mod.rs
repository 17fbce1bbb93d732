//! Centralized grid/vector/animation settings with TOML preset support.
//!
//! Everything a settings holder can change lives here and is passed to the
//! engine as an explicit value. Options serialize to/from TOML for presets
//! stored in `presets/`.

mod animation;
mod culling;
mod grid;
mod vector;

use std::path::Path;

pub use animation::{AnimationOptions, PulseOptions};
pub use culling::CullingOptions;
pub use grid::{GridOptions, InitialRotation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use vector::{
    ColorMode, GradientAxis, RotationOrigin, StrokeCap, VectorOptions,
    VectorShape,
};

use crate::error::VectorGridError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Grid arrangement.
    pub grid: GridOptions,
    /// Vector appearance.
    pub vector: VectorOptions,
    /// Animation strategy and engine parameters.
    pub animation: AnimationOptions,
    /// Viewport culling.
    pub culling: CullingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VectorGridError> {
        toml::from_str(content)
            .map_err(|e| VectorGridError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VectorGridError> {
        let content =
            std::fs::read_to_string(path).map_err(VectorGridError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VectorGridError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VectorGridError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VectorGridError::Io)?;
        }
        std::fs::write(path, content).map_err(VectorGridError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
