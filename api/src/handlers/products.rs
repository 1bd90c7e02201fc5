//! Product handlers
//!
//! Thin HTTP surface over the product service; each handler builds the
//! request, dispatches it through the service and shapes the response.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::app::{CreateProduct, DeleteProduct, ListProducts, PagedResult, ProductListItem};
use crate::domain::entities::ProductId;
use crate::domain::ports::{RemoteProductApi, UnitOfWorkProvider};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub name: Option<String>,
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Request to create a new product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub data: Value,
}

/// Request to delete a product
#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    pub id: Uuid,
}

/// GET /products
///
/// One page of products, enriched with remote payload data.
pub async fn list_products<P, A>(
    State(state): State<AppState<P, A>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<PagedResult<ProductListItem>>, AppError>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi + 'static,
{
    let page = state
        .product_service()
        .list(ListProducts {
            name: query.name,
            page_number: query.page_number,
            page_size: query.page_size,
        })
        .await?;

    Ok(Json(page))
}

/// POST /products
///
/// Create a product; the response body is the remote-assigned id.
pub async fn create_product<P, A>(
    State(state): State<AppState<P, A>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductId>, AppError>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi + 'static,
{
    let id = state
        .product_service()
        .create(CreateProduct {
            name: request.name,
            data: request.data,
        })
        .await?;

    Ok(Json(id))
}

/// DELETE /products
///
/// Soft-delete a product by id.
pub async fn delete_product<P, A>(
    State(state): State<AppState<P, A>>,
    Json(request): Json<DeleteProductRequest>,
) -> Result<StatusCode, AppError>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi + 'static,
{
    state
        .product_service()
        .delete(DeleteProduct {
            id: ProductId(request.id),
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
