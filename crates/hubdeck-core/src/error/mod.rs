use error_location::ErrorLocation;
use thiserror::Error;

/// Core domain errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Operation referenced a tree node id that no longer exists.
    ///
    /// Always recoverable: report to the caller and no-op.
    #[error("Node {id} not found {location}")]
    NotFound {
        /// The missing node id.
        id: u64,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Malformed command definition at load or add time.
    ///
    /// Policy at load time is skip-and-continue, never abort the whole load.
    #[error("Invalid command definition: {reason} {location}")]
    InvalidDefinition {
        /// Description of what makes the definition unusable.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Post attempted after the mailbox shut down.
    ///
    /// Expected during teardown; producers drop the event and move on.
    #[error("Mailbox closed {location}")]
    MailboxClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
