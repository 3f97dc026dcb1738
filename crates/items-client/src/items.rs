//! Typed client for the `/items` collection.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/items` | List all items |
//! | GET    | `/items/{id}` | Get by id (`None` on 404) |
//! | POST   | `/items` | Create |
//! | PUT    | `/items/{id}` | Partial update |
//! | DELETE | `/items/{id}` | Delete |

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{server_message, ClientError};
use crate::types::{CreateItem, Item, ItemId, UpdateItem};

/// Client for the Items API.
#[derive(Debug, Clone)]
pub struct ItemClient {
    http: reqwest::Client,
    items_url: String,
}

impl ItemClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            items_url: config.items_url(),
        })
    }

    /// List every item, ascending by id.
    pub async fn list(&self) -> Result<Vec<Item>, ClientError> {
        let endpoint = "GET /items";
        let resp = self.send(endpoint, self.http.get(&self.items_url)).await?;
        decode(endpoint, resp).await
    }

    /// Get one item. Returns `None` if the server answers 404.
    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, ClientError> {
        let endpoint = format!("GET /items/{id}");
        let url = format!("{}/{id}", self.items_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = error_for_status(&endpoint, resp).await?;
        decode(&endpoint, resp).await.map(Some)
    }

    /// Create an item.
    pub async fn create(&self, item: &CreateItem) -> Result<Item, ClientError> {
        let endpoint = "POST /items";
        let resp = self
            .send(endpoint, self.http.post(&self.items_url).json(item))
            .await?;
        decode(endpoint, resp).await
    }

    /// Apply a partial update.
    pub async fn update(&self, id: ItemId, update: &UpdateItem) -> Result<Item, ClientError> {
        let endpoint = format!("PUT /items/{id}");
        let url = format!("{}/{id}", self.items_url);
        let resp = self.send(&endpoint, self.http.put(&url).json(update)).await?;
        decode(&endpoint, resp).await
    }

    /// Delete an item.
    pub async fn delete(&self, id: ItemId) -> Result<(), ClientError> {
        let endpoint = format!("DELETE /items/{id}");
        let url = format!("{}/{id}", self.items_url);
        self.send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(endpoint, "sending request");
        let resp = request.send().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        error_for_status(endpoint, resp).await
    }
}

async fn error_for_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(endpoint, status, "request failed");
    Err(ClientError::Api {
        endpoint: endpoint.to_string(),
        status,
        message: server_message(&body),
    })
}

async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}
