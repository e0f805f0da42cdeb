//! Product source trait

use crate::core::error::FetchError;
use crate::core::row::Product;
use async_trait::async_trait;

/// Read-once provider of the product list
///
/// Implementations deliver the full, ordered list or a descriptive error.
/// The table fetches once at startup and never re-fetches or retries; the
/// framework is agnostic to where the rows come from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every product
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError>;
}
