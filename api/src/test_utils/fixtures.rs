//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Product, ProductId};
use crate::domain::ports::RemoteProduct;

/// Create an active product with a specific name
pub fn test_product_named(name: &str) -> Product {
    Product {
        id: ProductId(Uuid::new_v4()),
        name: name.to_string(),
        is_deleted: false,
        created_at: Utc::now(),
        modified_at: Utc::now(),
    }
}

/// Create a soft-deleted product with a specific name
pub fn deleted_product_named(name: &str) -> Product {
    Product {
        is_deleted: true,
        ..test_product_named(name)
    }
}

/// Create a remote record matching a local product
pub fn remote_record_for(product: &Product) -> RemoteProduct {
    RemoteProduct {
        id: product.id,
        name: product.name.clone(),
        data: Some(json!({"price": 9})),
    }
}
