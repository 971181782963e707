//! Error types for the active label crates.

use std::path::PathBuf;

/// A specialized Result type for active label operations.
pub type Result<T> = std::result::Result<T, LabelError>;

/// Errors that can occur while configuring or driving an active label.
///
/// A missing entity under a pointer is never an error; lookups return
/// `None` in that case.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// The timer ID is invalid or has already fired or been stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,

    /// A character range reaches past the end of the displayed text.
    #[error("Range {start}..{end} is out of bounds for text of length {len}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A color string could not be parsed.
    #[error("Invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// A configuration document was malformed.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// File I/O error while reading configuration.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LabelError {
    /// Create an out-of-bounds range error.
    pub fn range_out_of_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::RangeOutOfBounds { start, end, len }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
