//! Inventory wire types.

use serde::{Deserialize, Serialize};

use neszi_core::ProductId;

/// One physical stocked unit, identified by its scanned barcode and a
/// serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub barcode: String,
    pub serial_number: String,
}

/// Validation failure for an [`InventoryItem`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum InventoryItemError {
    #[error("barcode cannot be empty")]
    EmptyBarcode,
    #[error("serial number cannot be empty")]
    EmptySerialNumber,
}

impl InventoryItem {
    /// Create a validated item. Both fields come from barcode scans or
    /// manual entry and are trimmed first.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryItemError`] if either field is blank after
    /// trimming.
    pub fn new(barcode: &str, serial_number: &str) -> Result<Self, InventoryItemError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(InventoryItemError::EmptyBarcode);
        }
        let serial_number = serial_number.trim();
        if serial_number.is_empty() {
            return Err(InventoryItemError::EmptySerialNumber);
        }
        Ok(Self {
            barcode: barcode.to_owned(),
            serial_number: serial_number.to_owned(),
        })
    }
}

/// Body of `POST /inventory/batch`.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryBatch {
    pub product_id: ProductId,
    pub inventory_items: Vec<InventoryItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_trims_scanned_input() {
        let item = InventoryItem::new(" 123456789 ", "SN-1\n").unwrap();
        assert_eq!(item.barcode, "123456789");
        assert_eq!(item.serial_number, "SN-1");
    }

    #[test]
    fn test_item_rejects_blank_fields() {
        assert!(matches!(
            InventoryItem::new("  ", "SN-1"),
            Err(InventoryItemError::EmptyBarcode)
        ));
        assert!(matches!(
            InventoryItem::new("123", ""),
            Err(InventoryItemError::EmptySerialNumber)
        ));
    }

    #[test]
    fn test_batch_wire_shape() {
        let batch = InventoryBatch {
            product_id: ProductId::new(7),
            inventory_items: vec![InventoryItem::new("123", "123-1700000000000-0").unwrap()],
        };
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            value,
            json!({
                "product_id": 7,
                "inventory_items": [
                    {"barcode": "123", "serial_number": "123-1700000000000-0"}
                ]
            })
        );
    }
}
