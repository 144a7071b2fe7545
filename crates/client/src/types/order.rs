//! Order wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use neszi_core::{OrderId, OrderStatus, Price};

/// An order as returned by `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_name: String,
    pub delivery_address: DeliveryAddress,
    pub items: Vec<OrderItem>,
    pub payment_method: String,
    /// Present for mobile-money payments only.
    #[serde(default)]
    pub mpesa_receipt_number: Option<String>,
    pub order_time: DateTime<Utc>,
    pub total_cost_cents: Price,
    pub status: OrderStatus,
}

impl Order {
    /// Total number of units across all line items.
    #[must_use]
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Delivery destination for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
}

/// A line item within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_deserializes_from_backend_shape() {
        let body = json!({
            "id": 12,
            "user_name": "Jane Buyer",
            "delivery_address": {"street": "Moi Ave", "city": "Nairobi"},
            "items": [
                {"name": "Widget", "quantity": 2},
                {"name": "Gadget", "quantity": 1}
            ],
            "payment_method": "M-Pesa",
            "mpesa_receipt_number": "QWE123",
            "order_time": "2025-06-01T10:30:00Z",
            "total_cost_cents": 4500,
            "status": "Out for Delivery"
        });
        let order: Order = serde_json::from_value(body).unwrap();
        assert_eq!(order.id, OrderId::new(12));
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.total_items(), 3);
        assert_eq!(order.total_cost_cents.display(), "45.00");
    }

    #[test]
    fn test_missing_receipt_number_is_none() {
        let body = json!({
            "id": 13,
            "user_name": "Cash Customer",
            "delivery_address": {"street": "Main St", "city": "Mombasa"},
            "items": [],
            "payment_method": "Cash",
            "order_time": "2025-06-02T08:00:00Z",
            "total_cost_cents": 0,
            "status": "Pending"
        });
        let order: Order = serde_json::from_value(body).unwrap();
        assert!(order.mpesa_receipt_number.is_none());
    }

    #[test]
    fn test_status_update_body() {
        let body = StatusUpdate {
            status: OrderStatus::Delivered,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "Delivered"})
        );
    }
}
