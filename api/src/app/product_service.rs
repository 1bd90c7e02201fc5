//! Product service
//!
//! Orchestrates the create, delete and list flows across the local store and
//! the external product API. The ordering inside each flow is deliberate:
//! the external API mints product identifiers, so a remote create must
//! succeed before any local row exists, and a remote delete must succeed
//! before the local row is flagged deleted. The inverse gap (remote resource
//! exists, local row missing) is accepted and logged for reconciliation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use serde::Serialize;

use crate::app::dispatch::{dispatch, Request};
use crate::app::paging::{PageRequest, PagedResult};
use crate::domain::entities::{NewProduct, Product, ProductId};
use crate::domain::ports::{
    ProductFilter, ProductRepository, RemoteProduct, RemoteProductApi, UnitOfWork,
};
use crate::domain::validation::{validate_name, validate_payload};
use crate::error::{AppError, DomainError};

/// Command: create a product from a name and an opaque payload
#[derive(Debug)]
pub struct CreateProduct {
    pub name: String,
    pub data: Value,
}

impl Request for CreateProduct {
    const TRANSACTIONAL: bool = true;

    fn validate(&self) -> Result<(), DomainError> {
        let mut failures = validate_name(&self.name);
        failures.extend(validate_payload(&self.data));
        if failures.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(failures))
        }
    }
}

/// Command: soft-delete a product by id
#[derive(Debug)]
pub struct DeleteProduct {
    pub id: ProductId,
}

impl Request for DeleteProduct {
    const TRANSACTIONAL: bool = true;

    fn validate(&self) -> Result<(), DomainError> {
        if self.id.0.is_nil() {
            Err(DomainError::Validation(vec![
                "id must not be empty".to_string(),
            ]))
        } else {
            Ok(())
        }
    }
}

/// Query: one page of products, optionally filtered by name substring
#[derive(Debug)]
pub struct ListProducts {
    pub name: Option<String>,
    pub page_number: i64,
    pub page_size: i64,
}

impl Request for ListProducts {}

/// A list item merged from the local row and the remote payload
#[derive(Debug, Clone, Serialize)]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Service for managing products
pub struct ProductService<U, A>
where
    U: UnitOfWork,
    A: RemoteProductApi,
{
    uow: U,
    remote: Arc<A>,
}

impl<U, A> ProductService<U, A>
where
    U: UnitOfWork,
    A: RemoteProductApi,
{
    pub fn new(uow: U, remote: Arc<A>) -> Self {
        Self { uow, remote }
    }

    /// Create a product
    ///
    /// Uniqueness is checked locally first so a duplicate name never reaches
    /// the external API; the remote create then mints the identifier used as
    /// the local primary key.
    pub async fn create(&self, command: CreateProduct) -> Result<ProductId, AppError> {
        dispatch(&self.uow, command, |command| self.handle_create(command)).await
    }

    /// Soft-delete a product
    pub async fn delete(&self, command: DeleteProduct) -> Result<(), AppError> {
        dispatch(&self.uow, command, |command| self.handle_delete(command)).await
    }

    /// List products, enriched with remote payload data
    pub async fn list(&self, query: ListProducts) -> Result<PagedResult<ProductListItem>, AppError> {
        dispatch(&self.uow, query, |query| self.handle_list(query)).await
    }

    async fn handle_create(&self, command: CreateProduct) -> Result<ProductId, AppError> {
        let name = command.name.trim().to_string();
        let products = self.uow.products();

        if products.exists_active_with_name(&name).await? {
            return Err(DomainError::AlreadyExists(format!(
                "product with name '{}' already exists",
                name
            ))
            .into());
        }

        let id = self.remote.create_product(&name, &command.data).await?;

        let product = NewProduct { id, name };
        if let Err(err) = products.insert(&product).await {
            // The remote resource was already minted and cannot be undone
            // here; reconciliation needs the orphaned id.
            tracing::error!(
                remote_id = %id,
                error = %err,
                "local insert failed after remote create; remote resource is orphaned"
            );
            return Err(err.into());
        }

        Ok(id)
    }

    async fn handle_delete(&self, command: DeleteProduct) -> Result<(), AppError> {
        let products = self.uow.products();

        let product = products.find_by_id(&command.id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("product {} not found", command.id))
        })?;

        // Remote first: a failed remote delete leaves the local row active so
        // the two systems never diverge into locally-gone-remotely-present.
        self.remote.delete_product(product.id).await?;

        products.mark_deleted(&product.id).await?;
        Ok(())
    }

    async fn handle_list(
        &self,
        query: ListProducts,
    ) -> Result<PagedResult<ProductListItem>, AppError> {
        let page = PageRequest::new(query.page_number, query.page_size);
        let filter = ProductFilter { name: query.name };
        let products = self.uow.products();

        let total = products.count(&filter).await?;
        let page_items = products
            .find_page(&filter, page.size(), page.offset())
            .await?;

        // Empty page: return totals without touching the external API.
        if page_items.is_empty() {
            return Ok(PagedResult::new(Vec::new(), total, page));
        }

        let ids: Vec<ProductId> = page_items.iter().map(|p| p.id).collect();
        let remote_products = self.remote.get_products_by_ids(&ids).await?;

        Ok(PagedResult::new(
            merge_remote_data(page_items, remote_products),
            total,
            page,
        ))
    }
}

/// Attach remote payloads to local rows by id. A locally-known id missing
/// remotely yields a placeholder item instead of failing the page.
fn merge_remote_data(products: Vec<Product>, remote: Vec<RemoteProduct>) -> Vec<ProductListItem> {
    let mut by_id: HashMap<ProductId, RemoteProduct> =
        remote.into_iter().map(|r| (r.id, r)).collect();

    products
        .into_iter()
        .map(|product| match by_id.remove(&product.id) {
            Some(remote) => ProductListItem {
                id: product.id,
                name: product.name,
                data: remote.data,
            },
            None => ProductListItem {
                id: product.id,
                name: format!("{} Not Exist in Mock API", product.name),
                data: None,
            },
        })
        .collect()
}
