//! Crate-level error types.
//!
//! Only I/O boundaries (presets, snapshot export) return errors; the per-frame
//! pipeline degrades gracefully instead.

use std::fmt;

/// Errors produced by the vectorgrid crate.
#[derive(Debug)]
pub enum VectorGridError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// JSON snapshot serialization failure.
    Snapshot(serde_json::Error),
}

impl fmt::Display for VectorGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Snapshot(e) => write!(f, "snapshot error: {e}"),
        }
    }
}

impl std::error::Error for VectorGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for VectorGridError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for VectorGridError {
    fn from(e: serde_json::Error) -> Self {
        Self::Snapshot(e)
    }
}

/// Failure reported by a user-supplied dynamic color callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError(pub String);

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color computation failed: {}", self.0)
    }
}

impl std::error::Error for ColorError {}
