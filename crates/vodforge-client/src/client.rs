//! Encoding service HTTP client core.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Client for the cloud encoding service API.
///
/// Constructed once and passed explicitly to every component that talks
/// to the service; cheap to clone, the underlying connection pool is
/// shared between clones.
#[derive(Clone)]
pub struct EncodingClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl EncodingClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ClientError::InvalidConfig("API key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-api-key"), api_key);

        if let Some(tenant) = &config.tenant_org_id {
            let value = HeaderValue::from_str(tenant).map_err(|_| {
                ClientError::InvalidConfig("tenant org id is not a valid header value".into())
            })?;
            headers.insert(HeaderName::from_static("x-tenant-org-id"), value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config: Arc::new(config) })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_retry(|| async move {
            let response = self
                .http
                .post(self.url(path))
                .json(body)
                .send()
                .await
                .map_err(ClientError::Network)?;
            Self::decode(response).await
        })
        .await
    }

    pub(crate) async fn post_no_content(&self, path: &str) -> ClientResult<()> {
        self.with_retry(|| async move {
            let response = self
                .http
                .post(self.url(path))
                .send()
                .await
                .map_err(ClientError::Network)?;
            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(ClientError::Api { status: status.as_u16(), detail });
            }
            Ok(())
        })
        .await
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.get_json_query(path, &[]).await
    }

    pub(crate) async fn get_json_query<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        self.with_retry(|| async move {
            let response = self
                .http
                .get(self.url(path))
                .query(query)
                .send()
                .await
                .map_err(ClientError::Network)?;
            Self::decode(response).await
        })
        .await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: status.as_u16(), detail });
        }
        response.json::<T>().await.map_err(ClientError::Network)
    }

    /// Execute with retry logic. Only transient failures are retried;
    /// definitive rejections surface immediately.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> ClientResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "encoding API request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::InvalidResponse("retry loop exhausted".into())))
    }
}
