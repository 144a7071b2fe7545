//! Product wire types.

use serde::{Deserialize, Serialize};

use neszi_core::{Price, ProductId};

use super::InventoryItem;

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: Price,
    /// Units currently in stock.
    #[serde(default)]
    pub stock_quantity: i64,
    /// URL of the product image.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Fields sent by `PUT /products/{id}`.
///
/// The edit form always sends the full set, passing the existing image
/// URL back unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price_cents: Price,
    pub stock_quantity: i64,
    /// Existing image URL, passed through untouched.
    pub image: Option<String>,
}

/// The image file attached to a product creation.
#[derive(Debug, Clone)]
pub struct ProductImage {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Original file name (e.g. `widget.jpg`).
    pub file_name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub mime_type: String,
}

/// Input for `POST /products` (multipart).
///
/// Mirrors the add-product form: text fields plus the binary image part,
/// with `keywords` and `inventory_items` JSON-encoded into string fields.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// HTML from the rich-text editor.
    pub rich_description: String,
    pub brand: String,
    pub price_cents: Price,
    pub is_featured: bool,
    pub keywords: Vec<String>,
    pub image: ProductImage,
    /// One entry per stocked unit.
    pub inventory_items: Vec<InventoryItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserializes_from_list_response() {
        let body = json!({
            "id": 1,
            "name": "Widget",
            "description": "A widget",
            "price_cents": 500,
            "stock_quantity": 3,
            "image": "https://cdn.example/widget.jpg"
        });
        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price_cents.cents(), 500);
        assert_eq!(product.stock_quantity, 3);
        assert!(product.brand.is_none());
    }

    #[test]
    fn test_product_tolerates_minimal_body() {
        let body = json!({"id": 2, "name": "Bare", "price_cents": 100});
        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.stock_quantity, 0);
        assert!(product.image.is_none());
    }

    #[test]
    fn test_update_serializes_all_fields() {
        let update = ProductUpdate {
            name: "Widget".to_string(),
            description: "desc".to_string(),
            price_cents: Price::from_cents(1999),
            stock_quantity: 5,
            image: Some("https://cdn.example/widget.jpg".to_string()),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["price_cents"], 1999);
        assert_eq!(value["stock_quantity"], 5);
        assert_eq!(value["image"], "https://cdn.example/widget.jpg");
    }
}
