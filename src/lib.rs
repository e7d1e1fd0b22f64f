//! boardctl - board API client library
//!
//! This library provides the core functionality for the boardctl CLI:
//! credential persistence, the authenticated request gateway with
//! coordinated token refresh, and the typed board API surface.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: credential store, request gateway, and session events
//! - `api`: typed operations over the gateway (auth, boards)
//! - `commands`: CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use boardctl::api::ApiClient;
//! use boardctl::client::{Gateway, KeyringStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gateway = Arc::new(Gateway::new(
//!     url::Url::parse("https://front-mission.bigs.or.kr")?,
//!     Duration::from_secs(30),
//!     Arc::new(KeyringStore::new("default")),
//! ));
//! let api = ApiClient::new(gateway);
//!
//! api.sign_in("a@b.com", "Abc123!&").await?;
//! let posts = api.boards(0, 100).await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use client::{CredentialPair, CredentialStore, Gateway, KeyringStore, MemoryStore, SessionEvent};
pub use config::Config;
pub use error::{BoardctlError, Result};
