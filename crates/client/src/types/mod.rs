//! Wire types for the admin backend.
//!
//! Field names match the backend JSON exactly; these types exist so the
//! typed operations in [`crate::api`] can hand callers real structs
//! instead of loose `serde_json::Value`s.

mod inventory;
mod order;
mod product;

pub use inventory::{InventoryBatch, InventoryItem, InventoryItemError};
pub use order::{DeliveryAddress, Order, OrderItem};
pub(crate) use order::StatusUpdate;
pub use product::{NewProduct, Product, ProductImage, ProductUpdate};

use serde::Deserialize;

/// Acknowledgement body the backend sends for mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    /// Human-readable confirmation (e.g. "Product updated").
    #[serde(default)]
    pub message: Option<String>,
}
