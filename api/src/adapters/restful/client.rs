//! restful-api.dev API client implementation
//!
//! Wire shapes of the external product API:
//! - `POST /objects` with `{"name", "data"}` returns the new object incl. id
//! - `DELETE /objects/{id}` answers 200 on success
//! - `GET /objects?id=..&id=..` returns the objects for exactly those ids

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::ProductId;
use crate::domain::ports::{RemoteProduct, RemoteProductApi};
use crate::error::RemoteApiError;

/// Implementation of the external product API client
pub struct RestfulApiClient {
    http: Client,
    base_url: String,
}

impl RestfulApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn objects_url(&self) -> String {
        format!("{}/objects", self.base_url)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RemoteApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| RemoteApiError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(RemoteApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Serialize)]
struct CreateObjectRequest<'a> {
    name: &'a str,
    data: &'a Value,
}

#[derive(Deserialize)]
struct CreateObjectResponse {
    id: String,
}

#[derive(Deserialize)]
struct ObjectResponse {
    id: String,
    name: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Parse the id minted by the remote API. The mock API returns UUIDs
/// without hyphens; `Uuid::parse_str` accepts both forms.
fn parse_remote_id(raw: &str) -> Result<ProductId, RemoteApiError> {
    Uuid::parse_str(raw).map(ProductId).map_err(|_| {
        RemoteApiError::Deserialization(format!("remote id '{}' is not a valid UUID", raw))
    })
}

#[async_trait]
impl RemoteProductApi for RestfulApiClient {
    async fn create_product(&self, name: &str, data: &Value) -> Result<ProductId, RemoteApiError> {
        let response = self
            .http
            .post(self.objects_url())
            .json(&CreateObjectRequest { name, data })
            .send()
            .await?;

        let body: CreateObjectResponse = self.handle_response(response).await?;
        parse_remote_id(&body.id)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RemoteApiError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.objects_url(), id))
            .send()
            .await?;

        // The mock API reports every delete failure as a missing object.
        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(RemoteApiError::ProductNotFound(id))
        }
    }

    async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<RemoteProduct>, RemoteApiError> {
        let query: Vec<(&str, String)> = ids.iter().map(|id| ("id", id.to_string())).collect();

        let response = self
            .http
            .get(self.objects_url())
            .query(&query)
            .send()
            .await?;

        let body: Vec<ObjectResponse> = self.handle_response(response).await?;

        body.into_iter()
            .map(|object| {
                Ok(RemoteProduct {
                    id: parse_remote_id(&object.id)?,
                    name: object.name,
                    data: object.data,
                })
            })
            .collect()
    }
}
