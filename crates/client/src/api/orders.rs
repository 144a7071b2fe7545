//! Order management operations.

use reqwest::Method;
use tracing::instrument;

use neszi_core::{OrderId, OrderStatus};

use crate::error::ApiError;
use crate::types::{Ack, Order, StatusUpdate};

use super::{ApiClient, RequestBody};

impl ApiClient {
    /// Fetch all orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as documented on [`Self::request`].
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.request_json("/orders", Method::GET, None).await
    }

    /// Move an order to a new fulfillment status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as documented on [`Self::request`].
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Ack, ApiError> {
        let body = serde_json::to_value(StatusUpdate { status })
            .map_err(|e| ApiError::TransportFailure(e.to_string()))?;
        self.request_json(
            &format!("/orders/{id}/status"),
            Method::PUT,
            Some(RequestBody::Json(body)),
        )
        .await
    }
}
