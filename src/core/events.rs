//! Table events for renderers
//!
//! The controller never calls a renderer directly. Each recomputation is
//! published on an [`EventBus`] (`tokio::sync::broadcast`) and any number of
//! rendering collaborators subscribe to it.
//!
//! ```text
//! search / sort / page events ──▶ TableController ──▶ EventBus::publish() ──▶ renderers
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! let controller = TableController::new(TableConfig::default(), bus.clone());
//!
//! if let Ok(envelope) = rx.recv().await {
//!     if let TableEvent::Rendered(view) = envelope.event {
//!         println!("{}", view.page_label);
//!     }
//! }
//! ```

use crate::core::view::TableView;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something a renderer should react to
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableEvent {
    /// A new frame is ready
    Rendered(Box<TableView>),

    /// The product source failed; shown to the user as a status message
    LoadFailed { message: String },
}

impl TableEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            TableEvent::Rendered(_) => "rendered",
            TableEvent::LoadFailed { .. } => "load_failed",
        }
    }

    /// The rendered view, if this is a frame
    pub fn view(&self) -> Option<&TableView> {
        match self {
            TableEvent::Rendered(view) => Some(view),
            TableEvent::LoadFailed { .. } => None,
        }
    }
}

/// Envelope wrapping a table event with metadata
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: TableEvent,
}

impl EventEnvelope {
    /// Create a new event envelope
    pub fn new(event: TableEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone (Arc internally) and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Without subscribers the event is dropped. Returns the
    /// number of receivers that will receive the event.
    pub fn publish(&self, event: TableEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
