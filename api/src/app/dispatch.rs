//! Request dispatch pipeline
//!
//! Every request runs through the same two wrappers, composed once here:
//! validation first (all rules, aggregated, before any side effect), then a
//! unit-of-work transaction for requests that are marked transactional.

use std::future::Future;

use crate::domain::ports::UnitOfWork;
use crate::error::{AppError, DomainError};

/// A dispatchable request
pub trait Request: std::fmt::Debug {
    /// Whether the handler runs inside a unit-of-work transaction
    const TRANSACTIONAL: bool = false;

    /// Run every rule for this request and aggregate all failures.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Dispatch a request through validation and, if the request is marked
/// transactional, a begin/commit/rollback envelope around the handler.
pub async fn dispatch<U, R, F, Fut, T>(uow: &U, request: R, handler: F) -> Result<T, AppError>
where
    U: UnitOfWork,
    R: Request,
    F: FnOnce(R) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    request.validate()?;

    if !R::TRANSACTIONAL {
        return handler(request).await;
    }

    uow.begin().await?;

    match handler(request).await {
        Ok(value) => {
            uow.commit().await.map_err(|e| {
                tracing::error!(error = %e, "transaction commit failed");
                AppError::from(e)
            })?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = uow.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
