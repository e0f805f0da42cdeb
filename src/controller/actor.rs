//! Actor wrapper serializing every table mutation through one task
//!
//! The controller is moved onto a spawned task and driven by
//! [`TableCommand`] messages. The task sleeps until either the next command
//! arrives or the pending search recomputation is due, so a debounce deadline
//! and a navigation command can never race on the current page.

use super::TableController;
use crate::core::{ProductSource, QueryState, SortKey, SystemClock, TableError, TableResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Messages accepted by the table actor
pub enum TableCommand {
    /// A keystroke in the search box (debounced)
    Search(String),
    ToggleSort(SortKey),
    SetPageSize(usize),
    PreviousPage,
    NextPage,
    /// Fetch the product list once
    Load {
        source: Arc<dyn ProductSource>,
        reply: oneshot::Sender<TableResult<()>>,
    },
    /// Read the current query state
    Snapshot { reply: oneshot::Sender<QueryState> },
}

impl std::fmt::Debug for TableCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableCommand::Search(term) => f.debug_tuple("Search").field(term).finish(),
            TableCommand::ToggleSort(key) => f.debug_tuple("ToggleSort").field(key).finish(),
            TableCommand::SetPageSize(size) => f.debug_tuple("SetPageSize").field(size).finish(),
            TableCommand::PreviousPage => f.write_str("PreviousPage"),
            TableCommand::NextPage => f.write_str("NextPage"),
            TableCommand::Load { .. } => f.write_str("Load"),
            TableCommand::Snapshot { .. } => f.write_str("Snapshot"),
        }
    }
}

/// Cloneable handle to a running table actor
///
/// The actor stops once every handle is dropped; a search recomputation
/// still pending at that point is discarded.
#[derive(Debug, Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableCommand>,
}

impl TableHandle {
    /// Move `controller` onto a new task
    pub fn spawn(controller: TableController<SystemClock>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(64);
        let task = tokio::spawn(run_actor(controller, receiver));
        (Self { sender }, task)
    }

    async fn send(&self, command: TableCommand) -> TableResult<()> {
        self.sender
            .send(command)
            .await
            .map_err(|e| TableError::Internal(format!("table actor stopped: {}", e)))
    }

    pub async fn search(&self, term: impl Into<String>) -> TableResult<()> {
        self.send(TableCommand::Search(term.into())).await
    }

    pub async fn toggle_sort(&self, key: SortKey) -> TableResult<()> {
        self.send(TableCommand::ToggleSort(key)).await
    }

    pub async fn set_page_size(&self, page_size: usize) -> TableResult<()> {
        self.send(TableCommand::SetPageSize(page_size)).await
    }

    pub async fn previous_page(&self) -> TableResult<()> {
        self.send(TableCommand::PreviousPage).await
    }

    pub async fn next_page(&self) -> TableResult<()> {
        self.send(TableCommand::NextPage).await
    }

    /// Fetch rows from `source` and wait for the outcome
    pub async fn load(&self, source: Arc<dyn ProductSource>) -> TableResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(TableCommand::Load { source, reply }).await?;
        rx.await
            .map_err(|_| TableError::Internal("table actor dropped load reply".to_string()))?
    }

    /// Current query state, after every previously sent command
    pub async fn state(&self) -> TableResult<QueryState> {
        let (reply, rx) = oneshot::channel();
        self.send(TableCommand::Snapshot { reply }).await?;
        rx.await
            .map_err(|_| TableError::Internal("table actor dropped snapshot reply".to_string()))
    }
}

async fn run_actor(
    mut controller: TableController<SystemClock>,
    mut receiver: mpsc::Receiver<TableCommand>,
) {
    tracing::debug!("Table actor started");

    loop {
        let command = match controller.next_deadline() {
            None => receiver.recv().await,
            Some(deadline) => {
                let due = Instant::from_std(controller.clock().instant_at(deadline));
                tokio::select! {
                    command = receiver.recv() => command,
                    _ = tokio::time::sleep_until(due) => {
                        controller.poll();
                        continue;
                    }
                }
            }
        };

        let Some(command) = command else {
            break;
        };

        apply(&mut controller, command).await;
    }

    tracing::debug!("All table handles dropped, stopping table actor");
}

async fn apply(controller: &mut TableController<SystemClock>, command: TableCommand) {
    match command {
        TableCommand::Search(term) => controller.on_search_input(term),
        TableCommand::ToggleSort(key) => {
            controller.toggle_sort(key);
        }
        TableCommand::SetPageSize(size) => {
            controller.set_page_size(size);
        }
        TableCommand::PreviousPage => {
            controller.previous_page();
        }
        TableCommand::NextPage => {
            controller.next_page();
        }
        TableCommand::Load { source, reply } => {
            let result = controller.load(source.as_ref()).await.map(|_| ());
            // The caller may have stopped waiting
            let _ = reply.send(result);
        }
        TableCommand::Snapshot { reply } => {
            let _ = reply.send(controller.state().clone());
        }
    }
}
