/// Errors returned by corner location strategies.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The operator aborted manual selection. Recoverable: the caller may
    /// re-invoke with another strategy or prompt again.
    #[error("corner selection cancelled by operator")]
    Cancelled,

    /// The strategy ran to completion without finding a usable corner set.
    #[error("corners not found: {reason}")]
    CornersNotFound { reason: String },

    /// Fiducial detection found markers, but not all of ids 0..=3.
    #[error("expected fiducial markers 0..=3 at the corners, found {found} usable marker(s)")]
    MissingMarkers { found: usize },
}

impl LocateError {
    pub(crate) fn not_found(reason: impl Into<String>) -> Self {
        Self::CornersNotFound {
            reason: reason.into(),
        }
    }
}
