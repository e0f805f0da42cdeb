//! Core module containing the query pipeline and its types

pub mod error;
pub mod events;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod row;
pub mod scheduler;
pub mod source;
pub mod view;

pub use error::{ConfigError, FetchError, TableError, TableResult};
pub use events::{EventBus, EventEnvelope, TableEvent};
pub use pagination::{Page, PaginationMeta, paginate};
pub use query::{QueryState, SortDirection, SortKey, compute_visible};
pub use row::{Category, Product, RowCells};
pub use scheduler::{Clock, ManualClock, SystemClock, TaskKey, TaskScheduler};
pub use source::ProductSource;
pub use view::{LoadStatus, SortControl, TableView};
