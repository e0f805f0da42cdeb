//! HTTP implementation of ProductSource backed by `reqwest`

use crate::config::TableConfig;
use crate::core::{FetchError, Product, ProductSource};
use async_trait::async_trait;
use std::time::Duration;

pub use crate::config::PRODUCTS_API;

/// Fetches the product list with a single `GET` request
///
/// The endpoint must answer with a JSON array of products. Any non-success
/// status is a [`FetchError::Status`]; the request is never retried.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    url: String,
}

impl HttpProductSource {
    /// Create a source for `url` with a default client
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a source sharing an existing client
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Create a source from configuration (endpoint and request timeout)
    pub fn from_config(config: &TableConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.api_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpProductSource {
    fn default() -> Self {
        Self::new(PRODUCTS_API)
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        tracing::debug!(url = %self.url, "Fetching products");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| FetchError::Decode {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }
}
