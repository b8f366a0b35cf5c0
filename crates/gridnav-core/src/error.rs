/// Errors raised by geometry construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The four corners do not span a valid quadrilateral: the homography
    /// solve produced no invertible matrix (collinear or duplicate points).
    #[error("degenerate corner geometry: no invertible perspective transform")]
    Degenerate,

    /// Requested destination size has a zero dimension.
    #[error("invalid rectified size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
}
