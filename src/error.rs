//! Errors for optional external resources.
//!
//! None of these reach the player: every caller recovers with a fallback
//! (built-in font, default config, silence) and logs the error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A glyph in a font file breaks the bitmap rules.
    #[error("invalid glyph {ch:?}: {reason}")]
    InvalidGlyph { ch: String, reason: String },

    /// Audio output or decoding failed.
    #[error("audio unavailable: {0}")]
    Audio(String),
}

impl ResourceError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResourceError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ResourceError::Parse {
            path: path.into(),
            source,
        }
    }
}
