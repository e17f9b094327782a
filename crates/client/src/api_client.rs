//! HTTP transport for the REST collaborator.
//!
//! Every endpoint wraps its payload in `{status, message, data}`. The
//! transport unwraps that envelope, maps non-2xx responses and envelope
//! rejections into the shared error taxonomy, and hands resource façades
//! (see `crate::api`) the bare `data`.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stocklink_shared::{server_message, ApiError, ApiResponse};

use crate::config::CONFIG;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Client against the configured (or default) backend.
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// GET a path and unwrap the response envelope.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::unwrap_envelope(resp).await
    }

    /// POST a JSON body and unwrap the response envelope.
    pub async fn post_data<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::unwrap_envelope(resp).await
    }

    /// PUT a JSON body and unwrap the response envelope.
    pub async fn put_data<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::unwrap_envelope(resp).await
    }

    /// DELETE a resource. The envelope's `data` is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::unwrap_envelope::<serde_json::Value>(resp).await?;
        Ok(())
    }

    async fn unwrap_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            // Error bodies carry the same envelope; surface the server's own
            // message when there is one.
            let message = server_message(&text).unwrap_or(text);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !envelope.status {
            return Err(ApiError::Rejected(envelope.message));
        }
        Ok(envelope.data)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let api = ApiClient::with_base_url("http://localhost:8080/api/");
        assert_eq!(api.url("/products"), "http://localhost:8080/api/products");
        assert_eq!(api.url("products"), "http://localhost:8080/api/products");
        assert_eq!(api.url("https://other/api/x"), "https://other/api/x");
    }
}
