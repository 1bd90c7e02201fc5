//! Repository and unit-of-work port traits

use async_trait::async_trait;

use crate::domain::entities::{NewProduct, Product, ProductId};
use crate::error::DomainError;

/// Filter for product queries
///
/// Soft-deleted rows are always excluded by the repository itself; callers
/// never opt in to that filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
}

impl ProductFilter {
    /// Normalized name filter: trimmed, lowercased, empty treated as absent.
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find an active product by id (soft-deleted rows are invisible)
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Whether an active product with the same case-normalized trimmed name exists
    async fn exists_active_with_name(&self, name: &str) -> Result<bool, DomainError>;

    /// Count active products matching the filter
    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError>;

    /// Fetch one page of active products matching the filter, oldest first
    async fn find_page(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError>;

    /// Insert a product under its remote-assigned id
    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Soft-delete: flag the row and bump `modified_at`, never remove it
    async fn mark_deleted(&self, id: &ProductId) -> Result<(), DomainError>;
}

/// Transaction boundary around local mutations
///
/// One unit of work exists per request; nested begins reuse the open
/// transaction.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Products: ProductRepository;

    /// The product repository bound to this unit of work's transaction scope
    fn products(&self) -> &Self::Products;

    /// Open a transaction. No-op when one is already open.
    async fn begin(&self) -> Result<(), DomainError>;

    /// Commit and close the open transaction. No-op without one.
    async fn commit(&self) -> Result<(), DomainError>;

    /// Roll back and close the open transaction. No-op without one.
    async fn rollback(&self) -> Result<(), DomainError>;
}

/// Creates a fresh unit of work for each request scope
pub trait UnitOfWorkProvider: Clone + Send + Sync + 'static {
    type Uow: UnitOfWork;

    fn unit_of_work(&self) -> Self::Uow;
}
