//! DAP error types.

use thiserror::Error;

/// Errors raised while handling DAP session requests.
#[derive(Debug, Error)]
pub enum DapError {
    /// Request arguments could not be parsed into the expected shape.
    #[error("invalid {command} arguments: {reason}")]
    InvalidArguments {
        /// The command whose arguments were rejected.
        command: String,
        /// Parser message.
        reason: String,
    },

    /// A collaborator rejected the request.
    #[error("request rejected: {message}")]
    Rejected {
        /// The rejection message.
        message: String,
    },
}
