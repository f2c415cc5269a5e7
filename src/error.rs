//! Error types.
//!
//! Structural misuse of the element tree fails fast with a descriptive
//! [`LayoutError`]. Size resolution itself never fails: bad constraint
//! combinations are normalized instead (see [`crate::layout::resolve_box`]).

use thiserror::Error;

/// Errors raised when an element tree is assembled or mutated incorrectly.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A grid axis was declared with no tracks at all.
    #[error("a grid axis needs at least one track")]
    EmptyTracks,

    /// A track index was out of range for its grid axis.
    #[error("track index {index} out of bounds for {len} tracks")]
    TrackOutOfBounds { index: usize, len: usize },

    /// A grid area references tracks outside the declared track table.
    #[error(
        "grid area spans columns {col_start}..{col_end} and rows {row_start}..{row_end}, \
         but the grid has {cols} columns and {rows} rows"
    )]
    AreaOutOfBounds {
        col_start: u16,
        col_end: u16,
        row_start: u16,
        row_end: u16,
        cols: u16,
        rows: u16,
    },

    /// A grid area must cover at least one cell on each axis.
    #[error("grid area is empty (columns {col_start}..{col_end}, rows {row_start}..{row_end})")]
    EmptyArea {
        col_start: u16,
        col_end: u16,
        row_start: u16,
        row_end: u16,
    },

    /// A child index was out of range for the element's child list.
    #[error("child index {index} out of bounds for {len} children")]
    ChildOutOfBounds { index: usize, len: usize },

    /// An operation was applied to an element kind that does not support it.
    #[error("operation applies to {expected} elements, but this is a {actual} element")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A pixel buffer's length does not match its declared dimensions.
    #[error("pixel buffer holds {actual} pixels, but {width}x{height} needs {expected}")]
    PixelBufferMismatch {
        width: u16,
        height: u16,
        expected: usize,
        actual: usize,
    },

    /// An image file could not be decoded.
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = LayoutError::AreaOutOfBounds {
            col_start: 0,
            col_end: 4,
            row_start: 0,
            row_end: 1,
            cols: 3,
            rows: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("0..4"));
        assert!(msg.contains("3 columns"));

        let err = LayoutError::ChildOutOfBounds { index: 7, len: 2 };
        assert!(err.to_string().contains("index 7"));

        let err = LayoutError::KindMismatch {
            expected: "container",
            actual: "text",
        };
        assert!(err.to_string().contains("text element"));
    }
}
