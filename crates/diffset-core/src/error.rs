use crate::types::CompareStatus;

/// Errors that can occur while resolving and classifying a change set.
///
/// Each variant covers one failure domain. Library crates use this type
/// directly; the binary reports it through miette at the boundary.
///
/// # Examples
///
/// ```
/// use diffset_core::DiffsetError;
///
/// let err = DiffsetError::Config("input 'token' is required".into());
/// assert!(err.to_string().contains("token"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DiffsetError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing action input.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unreadable or malformed event context from the runner.
    #[error("event context error: {0}")]
    Event(String),

    /// The compare request could not be completed or produced no file list.
    #[error("compare failed: {0}")]
    Oracle(String),

    /// The resolved head is not strictly ahead of the base.
    ///
    /// Kept separate from [`DiffsetError::Oracle`] so a branch-state problem
    /// is distinguishable from a connectivity one.
    #[error("head {head} is not ahead of base {base} (status: {status})")]
    Direction {
        /// Base commit reference of the rejected range.
        base: String,
        /// Head commit reference of the rejected range.
        head: String,
        /// Ordering the compare service reported.
        status: CompareStatus,
    },

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
