//! Error types for the client library

use thiserror::Error;

/// Unified error contract for every store and API operation.
///
/// Each failure is terminal for its call; nothing here is fatal to the
/// store, which stays usable afterwards.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected locally, before any network call
    #[error("{0}")]
    Validation(String),

    /// The server no longer considers this client authenticated
    #[error("{message}")]
    Unauthenticated { message: String },

    /// Any other non-success response from the server
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Connection, timeout, or malformed-response failure
    #[error("Network error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an Unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a Remote error for a non-success status
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// True for the server's 401 signal, which invalidates the session
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
