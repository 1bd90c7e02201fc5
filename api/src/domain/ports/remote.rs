//! External product API port trait
//!
//! The third-party service is the source of truth for product payload data
//! and mints product identifiers. It offers no transactional or idempotency
//! guarantees, so callers must never retry its calls automatically: a
//! retried create could mint a duplicate remote resource.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::ProductId;
use crate::error::RemoteApiError;

/// A product record as held by the external API
#[derive(Debug, Clone)]
pub struct RemoteProduct {
    pub id: ProductId,
    pub name: String,
    pub data: Option<Value>,
}

/// Client port for the external product API
#[async_trait]
pub trait RemoteProductApi: Send + Sync {
    /// Create the remote resource; returns the authoritative identifier
    async fn create_product(&self, name: &str, data: &Value) -> Result<ProductId, RemoteApiError>;

    /// Delete the remote resource. A non-200 response is reported as
    /// `RemoteApiError::ProductNotFound`.
    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteApiError>;

    /// Batch-fetch remote records for exactly the given ids
    async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<RemoteProduct>, RemoteApiError>;
}
