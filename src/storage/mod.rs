//! Product source implementations

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "in-memory")]
pub mod in_memory;

#[cfg(feature = "http")]
pub use http::{HttpProductSource, PRODUCTS_API};
#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryProductSource;
