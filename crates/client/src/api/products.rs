//! Product catalog operations.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use neszi_core::ProductId;

use crate::error::ApiError;
use crate::types::{Ack, NewProduct, Product, ProductUpdate};

use super::{ApiClient, RequestBody};

impl ApiClient {
    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as documented on [`Self::request`].
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request_json("/products", Method::GET, None).await
    }

    /// Create a product, shipping its image and initial inventory in one
    /// multipart request.
    ///
    /// The form mirrors the add-product screen: plain text fields for the
    /// scalars, `keywords` and `inventory_items` JSON-encoded into string
    /// fields, and the image as a binary part. No content-type header is
    /// set here; the transport owns the multipart boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] for an invalid image MIME
    /// type, otherwise as documented on [`Self::request`].
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Ack, ApiError> {
        let form = build_product_form(product)?;
        self.request_json("/products", Method::POST, Some(RequestBody::Multipart(form)))
            .await
    }

    /// Update a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as documented on [`Self::request`].
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Ack, ApiError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ApiError::TransportFailure(e.to_string()))?;
        self.request_json(
            &format!("/products/{id}"),
            Method::PUT,
            Some(RequestBody::Json(body)),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] as documented on [`Self::request`].
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Ack, ApiError> {
        self.request_json(&format!("/products/{id}"), Method::DELETE, None)
            .await
    }
}

/// Assemble the multipart form for product creation.
fn build_product_form(product: &NewProduct) -> Result<Form, ApiError> {
    let keywords = serde_json::to_string(&product.keywords)
        .map_err(|e| ApiError::TransportFailure(e.to_string()))?;
    let inventory_items = serde_json::to_string(&product.inventory_items)
        .map_err(|e| ApiError::TransportFailure(e.to_string()))?;

    let image = Part::bytes(product.image.bytes.clone())
        .file_name(product.image.file_name.clone())
        .mime_str(&product.image.mime_type)
        .map_err(|e| ApiError::RequestFailed(format!("invalid image MIME type: {e}")))?;

    Ok(Form::new()
        .text("name", product.name.clone())
        .text("description", product.description.clone())
        .text("rich_description", product.rich_description.clone())
        .text("brand", product.brand.clone())
        .text("price_cents", product.price_cents.cents().to_string())
        .text("is_featured", product.is_featured.to_string())
        .text("keywords", keywords)
        .part("image", image)
        .text("inventory_items", inventory_items))
}
