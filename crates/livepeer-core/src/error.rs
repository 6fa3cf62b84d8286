//! Error types module
//!
//! Every failure the asset client can surface is an `AssetClientError`. The variants
//! fall into five kinds (see [`ErrorKind`]): configuration, local I/O, transport,
//! parse and domain errors. Nothing is retried or recovered locally; errors propagate
//! to the caller as soon as they happen.

use std::io;
use std::path::PathBuf;

/// Coarse classification of an [`AssetClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credential/configuration
    Configuration,
    /// Local file access failed
    Io,
    /// Network failure or non-success HTTP status
    Transport,
    /// Response body is not valid JSON
    Parse,
    /// Well-formed response lacking an expected field, or invalid input
    Domain,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse response as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Unexpected response: {0}")]
    Domain(String),

    #[error("Export not available yet: {0}")]
    ExportNotReady(String),
}

pub type Result<T> = std::result::Result<T, AssetClientError>;

impl AssetClientError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AssetClientError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AssetClientError::Configuration(_) => ErrorKind::Configuration,
            AssetClientError::Io { .. } => ErrorKind::Io,
            AssetClientError::Transport(_) | AssetClientError::HttpStatus { .. } => {
                ErrorKind::Transport
            }
            AssetClientError::Parse(_) => ErrorKind::Parse,
            AssetClientError::Domain(_) | AssetClientError::ExportNotReady(_) => {
                ErrorKind::Domain
            }
        }
    }

    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Configuration => "CONFIGURATION_ERROR",
            ErrorKind::Io => "IO_ERROR",
            ErrorKind::Transport => "TRANSPORT_ERROR",
            ErrorKind::Parse => "PARSE_ERROR",
            ErrorKind::Domain => "DOMAIN_ERROR",
        }
    }

    /// Whether a caller could reasonably try the same call again later.
    /// The client itself never does.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AssetClientError::Transport(err) => err.is_timeout() || err.is_connect(),
            AssetClientError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            AssetClientError::ExportNotReady(_) => true,
            _ => false,
        }
    }

    /// HTTP status returned by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AssetClientError::HttpStatus { status, .. } => Some(*status),
            AssetClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AssetClientError {
    fn from(err: serde_json::Error) -> Self {
        AssetClientError::Parse(err)
    }
}

impl From<reqwest::Error> for AssetClientError {
    fn from(err: reqwest::Error) -> Self {
        AssetClientError::Transport(err)
    }
}
