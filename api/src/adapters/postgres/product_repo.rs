//! PostgreSQL adapter for ProductRepository
//!
//! Every query runs against the unit of work's open transaction when one
//! exists, and directly against the connection pool otherwise. The soft
//! delete filter is applied here at every read site; the application-level
//! uniqueness check is a fast-fail convenience backed by a unique index on
//! `lower(name)` for non-deleted rows.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tokio::sync::Mutex;

use crate::domain::entities::{NewProduct, Product, ProductId};
use crate::domain::ports::{ProductFilter, ProductRepository};
use crate::entity::products;
use crate::error::DomainError;

/// Shared slot for the transaction opened by the unit of work
pub(crate) type TransactionSlot = Arc<Mutex<Option<DatabaseTransaction>>>;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
    txn: TransactionSlot,
}

impl PostgresProductRepository {
    pub(crate) fn new(db: DatabaseConnection, txn: TransactionSlot) -> Self {
        Self { db, txn }
    }

    fn active_products(filter: &ProductFilter) -> Select<products::Entity> {
        let mut select =
            products::Entity::find().filter(products::Column::IsDeleted.eq(false));

        if let Some(name) = filter.normalized_name() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(products::Column::Name)))
                    .like(format!("%{}%", name)),
            );
        }

        select
    }

    async fn find_by_id_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &ProductId,
    ) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .filter(products::Column::IsDeleted.eq(false))
            .one(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_active_with_name_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<bool, DomainError> {
        let normalized = name.trim().to_lowercase();

        let result = products::Entity::find()
            .filter(products::Column::IsDeleted.eq(false))
            .filter(Expr::expr(Func::lower(Expr::col(products::Column::Name))).eq(normalized))
            .one(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn count_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &ProductFilter,
    ) -> Result<u64, DomainError> {
        Self::active_products(filter)
            .count(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn find_page_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let results = Self::active_products(filter)
            .order_by_asc(products::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn insert_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        product: &NewProduct,
    ) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = products::ActiveModel {
            id: Set(product.id.0),
            name: Set(product.name.clone()),
            is_deleted: Set(false),
            created_at: Set(now),
            modified_at: Set(now),
        };

        let result = model
            .insert(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn mark_deleted_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &ProductId,
    ) -> Result<(), DomainError> {
        products::ActiveModel {
            id: Set(id.0),
            is_deleted: Set(true),
            modified_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.find_by_id_on(txn, id).await,
            None => self.find_by_id_on(&self.db, id).await,
        }
    }

    async fn exists_active_with_name(&self, name: &str) -> Result<bool, DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.exists_active_with_name_on(txn, name).await,
            None => self.exists_active_with_name_on(&self.db, name).await,
        }
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.count_on(txn, filter).await,
            None => self.count_on(&self.db, filter).await,
        }
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.find_page_on(txn, filter, limit, offset).await,
            None => self.find_page_on(&self.db, filter, limit, offset).await,
        }
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.insert_on(txn, product).await,
            None => self.insert_on(&self.db, product).await,
        }
    }

    async fn mark_deleted(&self, id: &ProductId) -> Result<(), DomainError> {
        let guard = self.txn.lock().await;
        match guard.as_ref() {
            Some(txn) => self.mark_deleted_on(txn, id).await,
            None => self.mark_deleted_on(&self.db, id).await,
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: ProductId(model.id),
            name: model.name,
            is_deleted: model.is_deleted,
            created_at: model.created_at.with_timezone(&Utc),
            modified_at: model.modified_at.with_timezone(&Utc),
        }
    }
}
