use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub type RequestToken = u64;

/// One directory listing as served by `GET /browse`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryListing {
    pub current: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub folders: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
}

/// Transfer progress as served by `GET /status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusReport {
    #[serde(default)]
    pub message: String,
    pub percent: f64,
    pub running: bool,
}

// The engine encodes an empty folder list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BrowseCompleted {
        token: RequestToken,
        result: Result<DirectoryListing, ApiError>,
    },
    StatusPolled {
        seq: RequestToken,
        result: Result<StatusReport, ApiError>,
    },
    UploadCompleted {
        result: Result<(), ApiError>,
    },
    DelayElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text meant for the user: the server's own error body when it sent one.
    pub fn detail(&self) -> String {
        match self.kind {
            FailureKind::HttpStatus(_) if !self.message.is_empty() => self.message.clone(),
            _ if self.message.is_empty() => self.kind.to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}
