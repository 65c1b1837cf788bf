//! Widget errors

use thiserror::Error;

/// Errors raised by widget models
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// A date string did not match the picker format
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A slider was configured with a zero step size
    #[error("Step size must be greater than zero")]
    InvalidStep,

    /// A donation amount was not a whole number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A file larger than the upload limit
    #[error("File of {size} bytes exceeds the {max_mb} MB limit")]
    FileTooLarge {
        /// File size in bytes
        size: u64,
        /// Limit in megabytes
        max_mb: u64,
    },

    /// A file type the upload does not accept
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// A select value that is neither an option nor the custom entry
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// A tile position outside the sorter
    #[error("Tile {index} out of range for {len} tiles")]
    TileOutOfRange {
        /// Requested position
        index: usize,
        /// Number of tiles
        len: usize,
    },
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
