use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while parsing a slice address string.
///
/// A malformed address means "no renderable data for this cell"; callers that
/// only care about that distinction can use `.ok()` on the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address had no segments or more than four `@`-separated segments
    #[error("Unsupported address form: expected 1 to 4 '@'-separated segments, got {0}")]
    SegmentCount(usize),

    /// A numeric segment did not parse as a non-negative base-10 integer
    #[error("Invalid {field} in address: '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    /// Axis segment was an integer but not one of 0 (X), 1 (Y) or 2 (Z)
    #[error("Invalid axis {0}: expected 0 (X), 1 (Y) or 2 (Z)")]
    InvalidAxis(i64),

    /// Path was not found as-is nor relative to the root directory
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

/// Errors raised by a pixel source while decoding slice data.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The file does not exist or is not known to the source
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The codec failed to decode the file
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// Requested slice or volume lies outside the image dimensions
    #[error("Slice {index} along {axis} out of range (extent {extent})")]
    SliceOutOfRange {
        index: usize,
        axis: &'static str,
        extent: usize,
    },

    /// Low-level I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised when producing a thumbnail.
#[derive(Debug, Clone, Error)]
pub enum ThumbnailError {
    /// The pixel source could not deliver the slice
    #[error("Decode failure: {0}")]
    Source(#[from] SourceError),

    /// The cell did not hold a usable address
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// The decoded slice has no pixels
    #[error("Slice for '{0}' is empty")]
    EmptySlice(String),

    /// A requested thumbnail size has a zero dimension
    #[error("Invalid thumbnail size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Errors raised by a row store or by writes going through a table model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Row index outside `[0, len)` (or `[0, len]` for inserts)
    #[error("Row {row} out of range (row count {len})")]
    RowOutOfRange { row: usize, len: usize },

    /// Column index outside the declared columns
    #[error("Column {column} out of range (column count {count})")]
    ColumnOutOfRange { column: usize, count: usize },

    /// No column with this name
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Write attempted on a column that is not editable
    #[error("Column '{0}' is not editable")]
    ReadOnlyColumn(String),

    /// Value cannot be stored in a column of this type
    #[error("Value {value} does not fit column '{column}' of type {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        value: String,
    },

    /// Malformed JSON table
    #[error("Invalid table JSON: {0}")]
    Json(String),
}

/// Invalid component configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    PageSize,

    #[error("cache capacity must be at least 1")]
    CacheCapacity,

    #[error("thumbnail size must be non-zero, got {width}x{height}")]
    ThumbnailSize { width: u32, height: u32 },
}
