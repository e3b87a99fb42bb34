//! Error types for the FODMAP Chef client.
//!
//! Failures are split the way callers need to react to them:
//!
//! - [`ApiError::Transport`] - the request never produced a response
//! - [`ApiError::Rejected`] - the backend answered with a non-2xx status; the raw body is kept
//! - [`ApiError::Decode`] - a 2xx body did not match the declared response shape
//! - [`ApiError::Storage`] - reading or writing the persisted session token failed

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of the local key-value storage that backs the session token.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// `raw` holds the body bytes exactly as received; `body` is their text
    /// form, lossily decoded when the backend did not send UTF-8.
    #[error("backend rejected request with status {status}: {body}")]
    Rejected {
        status: StatusCode,
        body: String,
        raw: Vec<u8>,
    },

    #[error("unexpected response payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("stored session token cannot be sent as a header value")]
    InvalidToken,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a backend rejection.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Body of a backend rejection as text.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Body of a backend rejection, byte for byte.
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            ApiError::Rejected { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Rejection body parsed as JSON, if it is JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.raw_body().and_then(|b| serde_json::from_slice(b).ok())
    }

    pub(crate) fn rejected(status: StatusCode, raw: Vec<u8>) -> Self {
        ApiError::Rejected {
            status,
            body: String::from_utf8_lossy(&raw).into_owned(),
            raw,
        }
    }

    /// Best-effort human readable message from a rejection body.
    ///
    /// The backend reports failures under `detail`, `message` or `error`
    /// depending on the view; the first one present wins.
    pub fn backend_message(&self) -> Option<String> {
        let body = self.body_json()?;
        ["detail", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|v| v.as_str()).map(str::to_string))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
pub type StorageResult<T> = std::result::Result<T, StorageError>;
