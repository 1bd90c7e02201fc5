//! Product domain entity
//!
//! The product aggregate root. Its identifier is minted by the external
//! product API at creation time and reused as the local primary key, so
//! local identity and remote identity are always the same value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a product, assigned by the external API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product known to the catalog
///
/// Deleted products keep their row for audit; `is_deleted` flips instead of
/// the row being removed.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Product {
    /// Check whether the product is visible to reads and uniqueness checks
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Data needed to insert a product locally
///
/// The id must come from a successful remote create; never generate it here.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
}
