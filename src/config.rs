//! Client configuration.
//!
//! Read from the environment by the command-line tool; library users can build
//! a [`ClientConfig`] directly.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "FODMAP_CHEF_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "FODMAP_CHEF_TIMEOUT_SECS";
pub const ENV_TOKEN_FILE: &str = "FODMAP_CHEF_TOKEN_FILE";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Where the file storage keeps the session token
    pub token_file: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_file: default_token_file(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "{} must be an http(s) URL, got {:?}",
                ENV_BASE_URL, base_url
            )));
        }

        let mut config = Self::new(base_url);

        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(format!("{} must be positive", ENV_TIMEOUT_SECS)));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(path) = env::var(ENV_TOKEN_FILE) {
            config.token_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Absolute URL for a backend path such as `/api/recipes/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn default_token_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fodmap-chef")
        .join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(ENV_BASE_URL);
        env::remove_var(ENV_TIMEOUT_SECS);
        env::remove_var(ENV_TOKEN_FILE);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://example.test/");
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.url("/api/recipes/"), "http://example.test/api/recipes/");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.token_file.ends_with("fodmap-chef/storage.json"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(ENV_BASE_URL, "https://chef.example/");
        env::set_var(ENV_TIMEOUT_SECS, "5");
        env::set_var(ENV_TOKEN_FILE, "/tmp/chef-token.json");

        let config = ClientConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "https://chef.example");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_file, PathBuf::from("/tmp/chef-token.json"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        env::set_var(ENV_TIMEOUT_SECS, "soon");
        assert!(matches!(ClientConfig::from_env(), Err(ApiError::Config(_))));

        env::set_var(ENV_TIMEOUT_SECS, "0");
        assert!(matches!(ClientConfig::from_env(), Err(ApiError::Config(_))));

        clear_env();
        env::set_var(ENV_BASE_URL, "chef.example");
        assert!(matches!(ClientConfig::from_env(), Err(ApiError::Config(_))));
        clear_env();
    }
}
