/// Errors raised by grid construction and access.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Cell access outside the grid extents.
    #[error("cell ({row}, {col}) out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A bulk label array does not match the declared grid dimensions.
    #[error("label array has {got} entries, expected {expected} ({rows}x{cols})")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        rows: usize,
        cols: usize,
    },

    /// Grid construction with a zero dimension.
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    /// The rectified image is smaller than one pixel per cell.
    #[error("image {width}x{height} too small for a {rows}x{cols} grid")]
    ImageTooSmall {
        width: usize,
        height: usize,
        rows: usize,
        cols: usize,
    },
}
