//! # Product Table
//!
//! The query core of a client-side product table: the product list is
//! fetched once, then search, sorting and pagination run entirely in memory.
//!
//! ## Features
//!
//! - **Filter-Sort Stage**: case-insensitive title search and stable sorting by title or price
//! - **Pagination Stage**: page slicing with a clamped current page and navigation metadata
//! - **Debounced Search**: keystrokes coalesce into one recomputation per quiet window
//! - **Injectable Clock**: virtual time for deterministic debounce tests
//! - **Headless Rendering**: frames are published on an event bus for any renderer
//! - **Lenient Rows**: malformed product fields are defaulted, never rejected
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use product_table::prelude::*;
//!
//! let bus = EventBus::default();
//! let mut table = TableController::new(TableConfig::default(), bus.clone());
//!
//! table.load(&HttpProductSource::default()).await?;
//!
//! table.toggle_sort(SortKey::Price);   // price ascending
//! table.toggle_sort(SortKey::Price);   // price descending
//! let view = table.next_page();
//!
//! println!("{} - {}", view.summary, view.page_label);
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod render;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Query pipeline ===
    pub use crate::core::{
        Page, PaginationMeta, Product, QueryState, SortDirection, SortKey, compute_visible,
        paginate,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, FetchError, TableError, TableResult};

    // === Controller ===
    pub use crate::controller::{TableCommand, TableController, TableHandle};
    pub use crate::core::{
        Clock, EventBus, EventEnvelope, LoadStatus, ManualClock, SortControl, SystemClock,
        TableEvent, TableView,
    };

    // === Sources ===
    pub use crate::core::ProductSource;
    #[cfg(feature = "http")]
    pub use crate::storage::HttpProductSource;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryProductSource;

    // === Rendering ===
    pub use crate::render::{Renderer, TextRenderer, run_renderer};

    // === Config ===
    pub use crate::config::TableConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
