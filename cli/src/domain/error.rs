//! Typed domain error enum.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! `CatalogError` converts to `anyhow::Error` via the `?` operator at the
//! command layer.

use std::time::Duration;

use thiserror::Error;

/// Expected identifier shape, echoed back on parse failures.
pub const IDENTIFIER_FORMAT: &str = "[catalogURL/]namespace/appName[:tag]";

/// Errors produced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed user input (identifier shape, conflicting flags).
    #[error("{0}")]
    InvalidArgument(String),

    /// The catalog-manager could not be reached.
    #[error("cannot establish connection with catalog-manager server on {address}: {message}")]
    Connection { address: String, message: String },

    /// Local filesystem failure while walking, reading or persisting.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success outcome or an error status.
    #[error("{message}")]
    Remote { code: String, message: String },

    /// The operation-wide deadline fired.
    #[error("operation did not complete within {}s", .0.as_secs())]
    DeadlineExceeded(Duration),
}

impl CatalogError {
    /// Shorthand for the identifier-shape failure.
    #[must_use]
    pub fn invalid_identifier() -> Self {
        Self::InvalidArgument(format!(
            "incorrect format for application name. {IDENTIFIER_FORMAT}"
        ))
    }

    /// Wrap an I/O error with a human-readable context line.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// A remote failure without a transport status code.
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            code: "FAILED".to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code, used by `--output json`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Connection { .. } => "CONNECTION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Remote { .. } => "REMOTE_ERROR",
            Self::DeadlineExceeded(_) => "DEADLINE_EXCEEDED",
        }
    }
}
