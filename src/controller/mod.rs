//! Table controller: owns the query state and drives the pipeline
//!
//! Every user action goes through one [`TableController`], which mutates its
//! [`QueryState`], reruns filter-sort then pagination, and publishes the
//! resulting [`TableView`] on the [`EventBus`]. Search input is the only
//! debounced action: a keystroke schedules a `SearchRecompute` task and the
//! frame is produced by [`TableController::poll`] once the quiet window has
//! elapsed. All other actions render synchronously.
//!
//! For a multi-threaded host, [`actor::TableHandle`] moves the controller
//! onto its own task so that every mutation is serialized through a channel.

pub mod actor;

use crate::config::TableConfig;
use crate::core::{
    Clock, EventBus, FetchError, LoadStatus, Page, Product, ProductSource, QueryState, SortKey,
    SystemClock, TableError, TableEvent, TableResult, TableView, TaskKey, TaskScheduler,
    compute_visible, paginate,
};
use std::time::Duration;

pub use actor::{TableCommand, TableHandle};

/// Single owner of the query state and the loaded rows
#[derive(Debug)]
pub struct TableController<C = SystemClock> {
    config: TableConfig,
    state: QueryState,
    rows: Vec<Product>,
    status: LoadStatus,
    scheduler: TaskScheduler<TaskKey>,
    clock: C,
    bus: EventBus,
}

impl TableController<SystemClock> {
    /// Create a controller on the wall clock
    pub fn new(config: TableConfig, bus: EventBus) -> Self {
        Self::with_clock(config, bus, SystemClock::new())
    }
}

impl<C: Clock> TableController<C> {
    /// Create a controller on a custom clock
    pub fn with_clock(config: TableConfig, bus: EventBus, clock: C) -> Self {
        Self {
            state: QueryState::with_page_size(config.page_size),
            config,
            rows: Vec::new(),
            status: LoadStatus::Loading,
            scheduler: TaskScheduler::new(),
            clock,
            bus,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Fetch rows once from `source` and render the first frame
    ///
    /// On failure the rows stay empty, the status carries the error message
    /// and a [`TableEvent::LoadFailed`] is published. There is no retry: once
    /// a load has completed, later calls do not touch the source. They render
    /// the loaded rows again, or return the recorded failure.
    pub async fn load<S>(&mut self, source: &S) -> TableResult<TableView>
    where
        S: ProductSource + ?Sized,
    {
        match &self.status {
            LoadStatus::Loading => {}
            LoadStatus::Loaded => {
                tracing::warn!("Products already loaded, ignoring reload");
                return Ok(self.render());
            }
            LoadStatus::Failed { message } => {
                tracing::warn!(error = %message, "Product load already failed, not retrying");
                return Err(TableError::Fetch(FetchError::Unavailable {
                    message: message.clone(),
                }));
            }
        }

        match source.fetch_all().await {
            Ok(rows) => Ok(self.set_rows(rows)),
            Err(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "Failed to load products");

                self.status = LoadStatus::Failed {
                    message: message.clone(),
                };
                self.bus.publish(TableEvent::LoadFailed { message });
                Err(TableError::Fetch(err))
            }
        }
    }

    /// Install the product list and render
    ///
    /// Rows are installed once. After a completed load the call is ignored
    /// and the current rows are rendered.
    pub fn set_rows(&mut self, rows: Vec<Product>) -> TableView {
        if self.status != LoadStatus::Loading {
            tracing::warn!(
                count = rows.len(),
                status = ?self.status,
                "Product list already settled, ignoring new rows"
            );
            return self.render();
        }

        tracing::info!(count = rows.len(), "Products loaded");
        self.rows = rows;
        self.status = LoadStatus::Loaded;
        self.render()
    }

    /// Run the pipeline on the current state and publish the frame
    ///
    /// An out-of-range page is reset to 1 here, before slicing.
    pub fn render(&mut self) -> TableView {
        let ordered = compute_visible(&self.rows, &self.state);
        let page = paginate(&ordered, &mut self.state);
        let page = Page {
            data: page.data.into_iter().cloned().collect(),
            pagination: page.pagination,
        };

        tracing::debug!(
            total = page.pagination.total,
            page = page.pagination.page,
            total_pages = page.pagination.total_pages,
            "Table recomputed"
        );

        let view = TableView::new(page, &self.state, self.status.clone());
        self.bus.publish(TableEvent::Rendered(Box::new(view.clone())));
        view
    }

    /// Record a keystroke in the search box
    ///
    /// Nothing is rendered now. The pending search recomputation, if any, is
    /// replaced by one due a full debounce window from now.
    pub fn on_search_input(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
        self.scheduler
            .schedule(TaskKey::SearchRecompute, self.clock.now(), self.config.debounce());
    }

    /// Whether a search recomputation is waiting for the quiet window
    pub fn search_pending(&self) -> bool {
        self.scheduler.is_pending(&TaskKey::SearchRecompute)
    }

    /// When the next scheduled task is due, on this controller's clock
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Run tasks that are due; returns the frame if one was rendered
    ///
    /// A due search recomputation resets the page to 1 and renders.
    pub fn poll(&mut self) -> Option<TableView> {
        let due = self.scheduler.take_due(self.clock.now());
        if due.contains(&TaskKey::SearchRecompute) {
            self.state.current_page = 1;
            Some(self.render())
        } else {
            None
        }
    }

    /// Activate a sort column and render
    pub fn toggle_sort(&mut self, key: SortKey) -> TableView {
        self.state.toggle_sort(key);
        self.render()
    }

    /// Change the page size, go back to page 1 and render
    pub fn set_page_size(&mut self, page_size: usize) -> TableView {
        if !self.config.allows_page_size(page_size) {
            tracing::warn!(
                page_size,
                options = ?self.config.page_size_options,
                "Page size outside the configured options"
            );
        }
        self.state.set_page_size(page_size);
        self.render()
    }

    /// Go back one page; nothing happens on the first page
    pub fn previous_page(&mut self) -> Option<TableView> {
        self.state.previous_page().then(|| self.render())
    }

    /// Go forward one page and render
    ///
    /// Stepping past the last page is corrected during the render, which
    /// sends the table back to page 1.
    pub fn next_page(&mut self) -> TableView {
        self.state.next_page();
        self.render()
    }
}
