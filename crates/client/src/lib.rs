//! Neszi client - session-aware API client for the admin backend.
//!
//! Everything the back office does (product CRUD, inventory batch entry,
//! order status management) goes through one authenticated request path.
//! This crate owns that path: the bearer token lifecycle, request
//! encoding (JSON or multipart), auth-failure interpretation, and the
//! user-facing side effects around each call.
//!
//! # Architecture
//!
//! - [`ApiClient`] performs one authenticated HTTP call and normalizes
//!   the outcome into [`ApiError`]
//! - [`SessionStore`] is the injected token store (memory or file backed)
//! - [`ports`] holds the injected environment capabilities: navigation to
//!   the login entry point, user notifications, and the busy indicator
//! - Typed operations for products, orders, and inventory live in [`api`]
//!   as thin wrappers over [`ApiClient::request`]
//!
//! # Example
//!
//! ```rust,ignore
//! use neszi_client::{ApiClient, ClientConfig, MemorySessionStore};
//!
//! let client = ApiClient::builder(config.base_url)
//!     .session_store(MemorySessionStore::default())
//!     .build();
//!
//! client.login(&email, &password).await?;
//! let products = client.list_products().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod ports;
pub mod session;
pub mod types;

pub use api::{ApiClient, ApiClientBuilder, RequestBody};
pub use reqwest::Method;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use ports::{BusyIndicator, Navigator, Notifier, Severity};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
