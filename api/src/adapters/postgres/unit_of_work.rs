//! SeaORM unit of work
//!
//! Holds at most one open transaction per request scope. Statements issued
//! by the repository execute against that transaction while it is open, so
//! commit/rollback cover every local mutation of the request. SeaORM has no
//! tracked-change flush; the save step of the original unit-of-work contract
//! is subsumed by `commit`.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;

use crate::adapters::postgres::product_repo::PostgresProductRepository;
use crate::domain::ports::{UnitOfWork, UnitOfWorkProvider};
use crate::error::DomainError;

/// PostgreSQL-backed unit of work
pub struct SeaOrmUnitOfWork {
    db: DatabaseConnection,
    txn: Arc<Mutex<Option<sea_orm::DatabaseTransaction>>>,
    products: PostgresProductRepository,
}

impl SeaOrmUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        let txn = Arc::new(Mutex::new(None));
        let products = PostgresProductRepository::new(db.clone(), txn.clone());
        Self { db, txn, products }
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    type Products = PostgresProductRepository;

    fn products(&self) -> &PostgresProductRepository {
        &self.products
    }

    async fn begin(&self) -> Result<(), DomainError> {
        let mut guard = self.txn.lock().await;
        if guard.is_none() {
            let txn = self
                .db
                .begin()
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            *guard = Some(txn);
        }
        Ok(())
    }

    async fn commit(&self) -> Result<(), DomainError> {
        let mut guard = self.txn.lock().await;
        if let Some(txn) = guard.take() {
            txn.commit()
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), DomainError> {
        let mut guard = self.txn.lock().await;
        if let Some(txn) = guard.take() {
            txn.rollback()
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

/// Hands out a fresh unit of work per request
#[derive(Clone)]
pub struct SeaOrmUowProvider {
    db: DatabaseConnection,
}

impl SeaOrmUowProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UnitOfWorkProvider for SeaOrmUowProvider {
    type Uow = SeaOrmUnitOfWork;

    fn unit_of_work(&self) -> SeaOrmUnitOfWork {
        SeaOrmUnitOfWork::new(self.db.clone())
    }
}
