//! Inventory batch entry.

use reqwest::Method;
use tracing::instrument;

use neszi_core::ProductId;

use crate::error::ApiError;
use crate::types::{Ack, InventoryBatch, InventoryItem};

use super::{ApiClient, RequestBody};

impl ApiClient {
    /// Register a batch of scanned stock units for a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] locally if the batch is empty
    /// (the backend would reject it anyway); otherwise as documented on
    /// [`Self::request`].
    #[instrument(skip(self, items), fields(product_id = %product_id, count = items.len()))]
    pub async fn add_inventory(
        &self,
        product_id: ProductId,
        items: &[InventoryItem],
    ) -> Result<Ack, ApiError> {
        if items.is_empty() {
            return Err(ApiError::RequestFailed(
                "no inventory items to add".to_string(),
            ));
        }

        let batch = InventoryBatch {
            product_id,
            inventory_items: items.to_vec(),
        };
        let body = serde_json::to_value(&batch)
            .map_err(|e| ApiError::TransportFailure(e.to_string()))?;
        self.request_json("/inventory/batch", Method::POST, Some(RequestBody::Json(body)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_empty_batch_rejected_without_network() {
        let client =
            ApiClient::builder(Url::parse("http://localhost:5000/api/admin").expect("valid url"))
                .build();
        let result = client.add_inventory(ProductId::new(1), &[]).await;
        assert!(matches!(result, Err(ApiError::RequestFailed(_))));
    }
}
