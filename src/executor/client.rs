//! Search engine HTTP client
//!
//! Thin transport over the engine's REST API. One call, one request; no
//! retry and no backoff. Callers own their retry and timeout policy.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use super::errors::{ExecutionError, ExecutionResult};
use super::result::RawResponse;

const NDJSON: &str = "application/x-ndjson";

/// Engine REST client
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: Client,
    base_url: String,
}

impl EngineClient {
    /// Create a client for `base_url`, e.g. `http://localhost:9200`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request, mapping non-2xx statuses to `EngineStatus`
    async fn send(&self, request: RequestBuilder) -> ExecutionResult<RawResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let raw = RawResponse::new(status, body);
        if raw.is_success() {
            Ok(raw)
        } else {
            Err(ExecutionError::EngineStatus {
                status,
                body: raw.body,
            })
        }
    }

    /// `POST /{index}/_search`
    pub async fn search(&self, index: &str, body: &Value) -> ExecutionResult<RawResponse> {
        let request = self.http.post(self.url(&format!("{}/_search", index))).json(body);
        self.send(request).await
    }

    /// `HEAD /{index}`
    pub async fn index_exists(&self, index: &str) -> ExecutionResult<bool> {
        let response = self.http.head(self.url(index)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(ExecutionError::EngineStatus {
                status: other.as_u16(),
                body: String::new(),
            }),
        }
    }

    /// `DELETE /{index}`
    pub async fn delete_index(&self, index: &str) -> ExecutionResult<()> {
        self.send(self.http.delete(self.url(index))).await?;
        Ok(())
    }

    /// `PUT /{index}` with settings and mappings
    pub async fn create_index(&self, index: &str, definition: &Value) -> ExecutionResult<()> {
        self.send(self.http.put(self.url(index)).json(definition)).await?;
        Ok(())
    }

    /// `POST /{index}/_close`
    pub async fn close_index(&self, index: &str) -> ExecutionResult<()> {
        self.send(self.http.post(self.url(&format!("{}/_close", index))))
            .await?;
        Ok(())
    }

    /// `POST /{index}/_open`
    pub async fn open_index(&self, index: &str) -> ExecutionResult<()> {
        self.send(self.http.post(self.url(&format!("{}/_open", index))))
            .await?;
        Ok(())
    }

    /// `PUT /{index}/_settings`
    pub async fn put_settings(&self, index: &str, settings: &Value) -> ExecutionResult<()> {
        let request = self
            .http
            .put(self.url(&format!("{}/_settings", index)))
            .json(settings);
        self.send(request).await?;
        Ok(())
    }

    /// `POST /{index}/_refresh`
    pub async fn refresh_index(&self, index: &str) -> ExecutionResult<()> {
        self.send(self.http.post(self.url(&format!("{}/_refresh", index))))
            .await?;
        Ok(())
    }

    /// `POST /{index}/_bulk`, optionally refreshing once the chunk is applied
    pub async fn bulk(&self, index: &str, ndjson: String, refresh: bool) -> ExecutionResult<Value> {
        let path = format!("{}/_bulk?refresh={}", index, refresh);
        let request = self
            .http
            .post(self.url(&path))
            .header(reqwest::header::CONTENT_TYPE, NDJSON)
            .body(ndjson);

        let raw = self.send(request).await?;
        Ok(raw.json()?)
    }
}
