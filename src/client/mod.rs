//! # FODMAP Chef HTTP Client
//!
//! Typed access to the FODMAP Chef backend: account and session handling,
//! dietary profiles, recipes, AI recipe generation, ingredients and shopping
//! lists.
//!
//! ## Modules
//!
//! - [`auth`] - Session token store and request header construction
//! - [`client`] - HTTP client with one method per backend endpoint
//! - [`error`] - Error types shared by the client and the storage layer
//! - [`storage`] - Key-value storage backends for the session token
//! - [`types`] - Request and response types
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use fodmap_chef::client::{FodmapChefClient, FileStorage, TokenStore};
//! use fodmap_chef::config::ClientConfig;
//!
//! # async fn example() -> fodmap_chef::client::Result<()> {
//! let config = ClientConfig::new("http://127.0.0.1:8000");
//! let tokens = TokenStore::new(Arc::new(FileStorage::new(&config.token_file)));
//! let client = FodmapChefClient::new(config, tokens)?;
//!
//! client.login("a@b.com", "secret1").await?;
//! let recipes = client.list_recipes().await?;
//! println!("Found {} recipes", recipes.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod storage;
pub mod types;

pub use auth::{request_headers, ClearOutcome, TokenStore, AUTH_TOKEN_KEY};
pub use client::FodmapChefClient;
pub use error::{ApiError, Result, StorageError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use types::*;
