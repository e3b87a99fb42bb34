//! Session token handling.
//!
//! The backend authenticates requests with a bearer token. This module owns the
//! lifecycle of that token: it is persisted under [`AUTH_TOKEN_KEY`] in a
//! [`KeyValueStorage`], read before every request and turned into request
//! headers by [`request_headers`].
//!
//! There is no expiry tracking and no refresh. A token is valid until the
//! backend says otherwise or the user logs out.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::client::error::{ApiError, Result, StorageError, StorageResult};
use crate::client::storage::KeyValueStorage;

/// Storage key of the session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Outcome of removing the stored token.
#[derive(Debug)]
pub enum ClearOutcome {
    Cleared,
    AlreadyAbsent,
    /// Removal failed. The session is still treated as logged out.
    Failed(StorageError),
}

/// # Session Token Store
///
/// Explicit session object shared by handle between the application and the
/// [`FodmapChefClient`](crate::client::FodmapChefClient). Cloning is cheap and
/// every clone sees the same storage.
///
/// Reads are not coordinated with writes: a request racing a logout may still
/// go out with the old token.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn get_token(&self) -> StorageResult<Option<String>> {
        self.storage.get(AUTH_TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        tracing::debug!("Storing session token: {}", token_preview(token));
        self.storage.set(AUTH_TOKEN_KEY, token)
    }

    /// Remove the stored token without ever failing the caller.
    pub fn clear_token(&self) -> ClearOutcome {
        match self.storage.remove(AUTH_TOKEN_KEY) {
            Ok(true) => ClearOutcome::Cleared,
            Ok(false) => ClearOutcome::AlreadyAbsent,
            Err(e) => {
                tracing::warn!("Failed to remove stored session token: {}", e);
                ClearOutcome::Failed(e)
            }
        }
    }

    pub fn is_authenticated(&self) -> StorageResult<bool> {
        Ok(self.get_token()?.is_some())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

/// First characters of a token, safe for logs.
pub fn token_preview(token: &str) -> String {
    let cut = token
        .char_indices()
        .nth(10)
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    format!("{}...", &token[..cut])
}

/// Headers for a backend request.
///
/// `Content-Type: application/json` is always present. `Authorization: Bearer
/// <token>` is added only when a token is given.
pub fn request_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
