//! In-memory implementation of ProductSource for testing and development

use crate::core::{FetchError, Product, ProductSource};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory product source
///
/// Serves a fixed list, or a fixed failure. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InMemoryProductSource {
    result: Arc<Result<Vec<Product>, FetchError>>,
}

impl InMemoryProductSource {
    /// Create a source serving `products`
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            result: Arc::new(Ok(products)),
        }
    }

    /// Create a source that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Arc::new(Err(FetchError::Unavailable {
                message: message.into(),
            })),
        }
    }
}

impl Default for InMemoryProductSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        self.result.as_ref().clone()
    }
}
