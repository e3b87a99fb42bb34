//! # FODMAP Chef Client Library
//!
//! Client for the FODMAP Chef backend, a recipe service focused on low-FODMAP
//! cooking. It consists of two modules:
//!
//! ## Client Module
//!
//! The [`client`] module performs typed HTTP calls to the backend and keeps the
//! session token in persistent key-value storage, attaching it as a bearer
//! token to every request.
//!
//! ## Config Module
//!
//! The [`config`] module holds the base URL, request timeout and token file
//! location, with environment variable overrides.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use fodmap_chef::{ClientConfig, FodmapChefClient, MemoryStorage, TokenStore};
//!
//! let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
//! let client = FodmapChefClient::new(ClientConfig::new("http://127.0.0.1:8000"), tokens);
//! ```

pub mod client;
pub mod config;

pub use client::{ApiError, FileStorage, FodmapChefClient, MemoryStorage, TokenStore};
pub use config::ClientConfig;
