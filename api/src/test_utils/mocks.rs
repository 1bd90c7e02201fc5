//! Mock implementations of port traits
//!
//! In-memory implementations that store data behind `Arc<RwLock<..>>` and
//! record every call so tests can verify behavior, in particular which
//! flows touch the external API and which must not.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{NewProduct, Product, ProductId};
use crate::domain::ports::{
    ProductFilter, ProductRepository, RemoteProduct, RemoteProductApi, UnitOfWork,
    UnitOfWorkProvider,
};
use crate::error::{DomainError, RemoteApiError};

type ProductStore = Arc<RwLock<HashMap<ProductId, Product>>>;

// ============================================================================
// In-Memory Product Repository + Unit of Work
// ============================================================================

fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    if product.is_deleted {
        return false;
    }
    match filter.normalized_name() {
        Some(name) => product.name.to_lowercase().contains(&name),
        None => true,
    }
}

/// In-memory implementation of ProductRepository
pub struct InMemoryProductRepository {
    store: ProductStore,
    fail_insert: Arc<AtomicBool>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store.get(id).filter(|p| !p.is_deleted).cloned())
    }

    async fn exists_active_with_name(&self, name: &str) -> Result<bool, DomainError> {
        let normalized = name.trim().to_lowercase();
        let store = self.store.read().unwrap();
        Ok(store
            .values()
            .any(|p| !p.is_deleted && p.name.trim().to_lowercase() == normalized))
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store.values().filter(|p| matches_filter(p, filter)).count() as u64)
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let store = self.store.read().unwrap();
        let mut matching: Vec<Product> = store
            .values()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect();
        matching.sort_by_key(|p| (p.created_at, p.id.0));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(DomainError::Database("insert rejected".to_string()));
        }

        let now = Utc::now();
        let inserted = Product {
            id: product.id,
            name: product.name.clone(),
            is_deleted: false,
            created_at: now,
            modified_at: now,
        };

        let mut store = self.store.write().unwrap();
        store.insert(inserted.id, inserted.clone());
        Ok(inserted)
    }

    async fn mark_deleted(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut store = self.store.write().unwrap();
        match store.get_mut(id) {
            Some(product) => {
                product.is_deleted = true;
                product.modified_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("product {} not found", id))),
        }
    }
}

/// In-memory unit of work with snapshot/restore transaction semantics
pub struct InMemoryUnitOfWork {
    store: ProductStore,
    products: InMemoryProductRepository,
    snapshot: Mutex<Option<HashMap<ProductId, Product>>>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Products = InMemoryProductRepository;

    fn products(&self) -> &InMemoryProductRepository {
        &self.products
    }

    async fn begin(&self) -> Result<(), DomainError> {
        let mut snapshot = self.snapshot.lock().unwrap();
        if snapshot.is_none() {
            *snapshot = Some(self.store.read().unwrap().clone());
        }
        Ok(())
    }

    async fn commit(&self) -> Result<(), DomainError> {
        if self.snapshot.lock().unwrap().take().is_some() {
            self.commits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        if let Some(snapshot) = self.snapshot.lock().unwrap().take() {
            *self.store.write().unwrap() = snapshot;
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Provider sharing one store across the units of work it hands out
#[derive(Clone, Default)]
pub struct InMemoryUowProvider {
    store: ProductStore,
    fail_insert: Arc<AtomicBool>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl InMemoryUowProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store with a product
    pub fn with_product(self, product: Product) -> Self {
        self.store
            .write()
            .unwrap()
            .insert(product.id, product);
        self
    }

    /// Make every insert fail with a database error
    pub fn failing_insert(self) -> Self {
        self.fail_insert.store(true, Ordering::SeqCst);
        self
    }

    /// Read a product straight from the store, deleted or not
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.store.read().unwrap().get(id).cloned()
    }

    /// Number of rows in the store, deleted rows included
    pub fn row_count(&self) -> usize {
        self.store.read().unwrap().len()
    }

    /// Transactions committed across all units of work
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Transactions rolled back across all units of work
    pub fn rollback_count(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

impl UnitOfWorkProvider for InMemoryUowProvider {
    type Uow = InMemoryUnitOfWork;

    fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork {
            store: self.store.clone(),
            products: InMemoryProductRepository {
                store: self.store.clone(),
                fail_insert: self.fail_insert.clone(),
            },
            snapshot: Mutex::new(None),
            commits: self.commits.clone(),
            rollbacks: self.rollbacks.clone(),
        }
    }
}

// ============================================================================
// Recording Remote Product API
// ============================================================================

/// Mock external API that records every call and can be told to fail
#[derive(Default)]
pub struct RecordingRemoteApi {
    next_create_id: Mutex<Option<ProductId>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    remote_products: Mutex<HashMap<ProductId, RemoteProduct>>,
    create_calls: Mutex<Vec<(String, Value)>>,
    delete_calls: Mutex<Vec<ProductId>>,
    batch_get_calls: Mutex<Vec<Vec<ProductId>>>,
}

impl RecordingRemoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next create call will return
    pub fn with_create_id(self, id: ProductId) -> Self {
        *self.next_create_id.lock().unwrap() = Some(id);
        self
    }

    /// Pre-populate the remote side with a record
    pub fn with_remote_product(self, product: RemoteProduct) -> Self {
        self.remote_products
            .lock()
            .unwrap()
            .insert(product.id, product);
        self
    }

    /// Make every create call fail
    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    /// Make every delete call fail
    pub fn failing_delete(self) -> Self {
        self.fail_delete.store(true, Ordering::SeqCst);
        self
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_calls.lock().unwrap().len()
    }

    pub fn batch_get_call_count(&self) -> usize {
        self.batch_get_calls.lock().unwrap().len()
    }

    /// Ids requested by the last batch fetch
    pub fn last_batch_get(&self) -> Option<Vec<ProductId>> {
        self.batch_get_calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RemoteProductApi for RecordingRemoteApi {
    async fn create_product(&self, name: &str, data: &Value) -> Result<ProductId, RemoteApiError> {
        self.create_calls
            .lock()
            .unwrap()
            .push((name.to_string(), data.clone()));

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(RemoteApiError::Api {
                status: 500,
                message: "remote create failed".to_string(),
            });
        }

        let id = self
            .next_create_id
            .lock()
            .unwrap()
            .unwrap_or(ProductId(Uuid::new_v4()));

        self.remote_products.lock().unwrap().insert(
            id,
            RemoteProduct {
                id,
                name: name.to_string(),
                data: Some(data.clone()),
            },
        );

        Ok(id)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteApiError> {
        self.delete_calls.lock().unwrap().push(id);

        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(RemoteApiError::ProductNotFound(id));
        }

        self.remote_products.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<RemoteProduct>, RemoteApiError> {
        self.batch_get_calls.lock().unwrap().push(ids.to_vec());

        let remote_products = self.remote_products.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| remote_products.get(id).cloned())
            .collect())
    }
}
