//! Error types for store operations.

use thiserror::Error;

/// Errors surfaced by [`super::JobBoardStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The referenced job posting does not exist.
    #[error("job not found: {job_id}")]
    JobNotFound {
        /// Identifier that was looked up.
        job_id: String,
    },

    /// The referenced application does not exist.
    #[error("application not found: {application_id}")]
    ApplicationNotFound {
        /// Identifier that was looked up.
        application_id: String,
    },

    /// A previous holder of the store lock panicked.
    #[error("store lock poisoned")]
    Poisoned,
}
