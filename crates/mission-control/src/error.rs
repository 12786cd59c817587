//! Error types for mission-control.
//!
//! Every failure the server can hit while handling a request is one of these
//! variants. The HTTP layer turns them into responses; see
//! [`crate::server`] for the status-code mapping.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mission-control operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Request Errors ===
    /// The requested resource does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The URL path or file that could not be resolved.
        path: String,
    },

    /// A request body parsed as JSON but has the wrong shape.
    #[error("invalid payload: {message}")]
    InvalidPayload {
        /// Description of what was expected.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Listener Errors ===
    /// The listen address is already bound by another process.
    #[error("address {addr} is already in use")]
    AddressInUse {
        /// The address we tried to bind.
        addr: String,
        /// The port component, for remediation hints.
        port: u16,
    },

    /// Binding the listener failed for another reason.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The server loop terminated with an error.
    #[error("server error: {0}")]
    Server(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing a specific data file failed.
    #[error("failed to access {path}: {source}")]
    File {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for mission-control operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for a path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Wrap an I/O error with the file it concerns.
    ///
    /// A missing file becomes [`Error::NotFound`] so callers can tell the two
    /// apart without inspecting the `io::ErrorKind` themselves.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.display().to_string(),
            }
        } else {
            Self::File { path, source }
        }
    }

    /// Check if this error means the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error is the address-in-use bind failure.
    #[must_use]
    pub fn is_address_in_use(&self) -> bool {
        matches!(self, Self::AddressInUse { .. })
    }
}
