use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::config::TrelloConfig;
use super::error::{TrelloError, TrelloResult};

/// Outbound access to the remote card API.
///
/// Paths are relative to the REST base URL (`cards/{id}`, `search`, ...).
/// Implementations inject credentials and turn every failure into a
/// [`TrelloError`]; they never retry.
pub trait CardRepository: Send + Sync {
    /// Authenticated read with query parameters.
    fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> impl Future<Output = TrelloResult<Value>> + Send;

    /// Authenticated create with form fields.
    fn post(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = TrelloResult<Value>> + Send;

    /// Authenticated update with form fields.
    fn put(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = TrelloResult<Value>> + Send;
}

/// reqwest-backed client for the Trello REST API.
pub struct TrelloClient {
    config: TrelloConfig,
    client: Client,
}

impl TrelloClient {
    /// Create a client; the configured timeout applies to every request.
    pub fn new(config: TrelloConfig) -> TrelloResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TrelloError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.config.api_key), ("token", &self.config.token)]
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> TrelloResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| TrelloError::from_reqwest(path, e))?;

        Self::handle_response(path, response).await
    }

    /// Map a response to JSON, or to an error on non-success status codes.
    async fn handle_response(path: &str, response: Response) -> TrelloResult<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TrelloError::from_reqwest(path, e))?;

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "Trello returned an error status");
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body
            };
            return Err(TrelloError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl CardRepository for TrelloClient {
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> TrelloResult<Value> {
        debug!(path, "GET");
        let request = self
            .client
            .get(self.url(path))
            .query(&self.auth_params())
            .query(params);
        self.send(path, request).await
    }

    async fn post(&self, path: &str, fields: &[(&str, &str)]) -> TrelloResult<Value> {
        debug!(path, "POST");
        let request = self
            .client
            .post(self.url(path))
            .query(&self.auth_params())
            .form(fields);
        self.send(path, request).await
    }

    async fn put(&self, path: &str, fields: &[(&str, &str)]) -> TrelloResult<Value> {
        debug!(path, "PUT");
        let request = self
            .client
            .put(self.url(path))
            .query(&self.auth_params())
            .form(fields);
        self.send(path, request).await
    }
}
