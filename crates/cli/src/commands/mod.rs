//! Subcommand implementations.

pub mod auth;
pub mod inventory;
pub mod orders;
pub mod products;

use neszi_client::types::InventoryItem;

/// Parse a `barcode:serial` pair from the command line.
pub(crate) fn parse_item(raw: &str) -> Result<InventoryItem, String> {
    let (barcode, serial) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected barcode:serial, got `{raw}`"))?;
    InventoryItem::new(barcode, serial).map_err(|e| e.to_string())
}
