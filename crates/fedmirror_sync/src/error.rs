//! Error types for the reconciliation engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while driving a federation cycle.
///
/// Delta computation itself has no failure mode; every variant here
/// originates in a collaborator or in the engine's cycle guard.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Fetching the remote snapshot failed.
    #[error("fetch error: {message}")]
    Fetch {
        /// Error message.
        message: String,
        /// Whether the fetch can be retried.
        retryable: bool,
    },

    /// Reading the local mirror snapshot failed.
    #[error("snapshot error: {message}")]
    Snapshot {
        /// Error message.
        message: String,
    },

    /// Applying a delta phase to the mirror failed.
    #[error("apply error ({phase}): {message}")]
    Apply {
        /// The phase that failed (insert, update or delete).
        phase: String,
        /// Error message.
        message: String,
    },

    /// The federation source is marked inactive.
    #[error("federation source {source_id} is inactive")]
    SourceInactive {
        /// The inactive source.
        source_id: String,
    },

    /// A cycle is already running on this engine.
    #[error("a federation cycle is already in progress")]
    CycleInProgress,
}

impl SyncError {
    /// Creates a retryable fetch error.
    pub fn fetch_retryable(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable fetch error.
    pub fn fetch_fatal(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            retryable: false,
        }
    }

    /// Creates a snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    /// Creates an apply error for the given phase.
    pub fn apply(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Apply {
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error can be retried.
    ///
    /// The engine itself never retries; the caller owns retry policy.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Fetch { retryable: true, .. })
    }
}
