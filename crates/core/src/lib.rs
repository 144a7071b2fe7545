//! Neszi Core - Shared domain types.
//!
//! This crate provides the common types used across the Neszi back-office
//! components:
//! - `client` - Session-aware API client for the admin backend
//! - `cli` - Terminal admin console built on the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
