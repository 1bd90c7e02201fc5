//! Catalog API Server
//!
//! A CRUD web service for product records that keeps a local PostgreSQL
//! store in step with the third-party product API at restful-api.dev.
//! Uses hexagonal (ports & adapters) architecture for clean separation of
//! concerns; product identifiers are minted by the external API and reused
//! as local primary keys.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;



use adapters::{RestfulApiClient, SeaOrmUowProvider};
use app::ProductService;
use config::Config;
use domain::ports::{RemoteProductApi, UnitOfWorkProvider};

/// Application state shared across all handlers
///
/// The unit-of-work provider hands each request its own transaction scope;
/// only the connection pool and the remote client are shared.
pub struct AppState<P, A>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi,
{
    uow_provider: P,
    remote: Arc<A>,
}

impl<P, A> AppState<P, A>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi,
{
    pub fn new(uow_provider: P, remote: Arc<A>) -> Self {
        Self { uow_provider, remote }
    }

    /// Build a product service scoped to one request
    pub fn product_service(&self) -> ProductService<P::Uow, A> {
        ProductService::new(self.uow_provider.unit_of_work(), self.remote.clone())
    }
}

impl<P, A> Clone for AppState<P, A>
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi,
{
    fn clone(&self) -> Self {
        Self {
            uow_provider: self.uow_provider.clone(),
            remote: self.remote.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router over any state; tests drive it with in-memory adapters.
pub fn router<P, A>(state: AppState<P, A>) -> Router
where
    P: UnitOfWorkProvider,
    A: RemoteProductApi + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/products",
            get(handlers::list_products::<P, A>)
                .post(handlers::create_product::<P, A>)
                .delete(handlers::delete_product::<P, A>),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalog API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connected");

    let remote = Arc::new(RestfulApiClient::new(config.restful_api_url.clone()));
    let state = AppState::new(SeaOrmUowProvider::new(db), remote);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
