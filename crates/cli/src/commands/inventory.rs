//! Inventory batch entry commands.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Subcommand;

use neszi_client::ApiClient;
use neszi_client::types::InventoryItem;
use neszi_core::ProductId;

use super::parse_item;

#[derive(Subcommand)]
pub enum InventoryAction {
    /// Register scanned stock units for a product
    Add {
        product_id: i64,

        /// Stocked unit as barcode:serial; repeatable
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<InventoryItem>,

        /// Bare barcode with a generated serial number; repeatable
        #[arg(long = "barcode")]
        barcodes: Vec<String>,
    },
}

pub async fn run(
    client: &ApiClient,
    action: InventoryAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        InventoryAction::Add {
            product_id,
            mut items,
            barcodes,
        } => {
            items.extend(generate_items(&barcodes, unix_millis())?);
            let ack = client
                .add_inventory(ProductId::new(product_id), &items)
                .await?;
            println!(
                "{}",
                ack.message
                    .as_deref()
                    .unwrap_or("Inventory items added.")
            );
        }
    }
    Ok(())
}

/// Derive serial numbers for bare barcodes the same way the back office
/// did: `{barcode}-{timestamp}-{index}`.
fn generate_items(barcodes: &[String], timestamp: u128) -> Result<Vec<InventoryItem>, String> {
    barcodes
        .iter()
        .enumerate()
        .map(|(i, barcode)| {
            InventoryItem::new(barcode, &format!("{}-{timestamp}-{i}", barcode.trim()))
                .map_err(|e| e.to_string())
        })
        .collect()
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_items_derives_serials() {
        let items = generate_items(&["123".to_string(), "456".to_string()], 1700000000000).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].serial_number, "123-1700000000000-0");
        assert_eq!(items[1].serial_number, "456-1700000000000-1");
    }

    #[test]
    fn test_generate_items_rejects_blank_barcode() {
        assert!(generate_items(&["  ".to_string()], 0).is_err());
    }
}
