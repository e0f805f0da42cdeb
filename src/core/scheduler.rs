//! Cancellable scheduled tasks driven by an injectable clock
//!
//! Debouncing is modelled as a keyed task table: scheduling a key that is
//! already pending replaces its deadline (cancel-and-replace), so at most one
//! task per key is ever pending. The scheduler never sleeps itself; callers
//! ask for [`TaskScheduler::next_deadline`] and hand it
//! [`Clock::now`] readings. Tests use a [`ManualClock`] to advance virtual
//! time deterministically.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Tasks the table controller schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Recompute after the search input went quiet
    SearchRecompute,
}

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock measuring from its creation
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Convert a clock reading back to an instant
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.origin + at
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to
///
/// Cheap to clone; clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<RwLock<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Keyed table of pending deadlines
#[derive(Debug, Clone)]
pub struct TaskScheduler<K> {
    pending: HashMap<K, Duration>,
}

impl<K> Default for TaskScheduler<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> TaskScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire `delay` after `now`
    ///
    /// Replaces any pending deadline for the same key. Returns true when a
    /// pending task was replaced.
    pub fn schedule(&mut self, key: K, now: Duration, delay: Duration) -> bool {
        let replaced = self.pending.insert(key.clone(), now + delay).is_some();
        if replaced {
            tracing::debug!(task = ?key, delay_ms = delay.as_millis() as u64, "Rescheduled pending task");
        }
        replaced
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Remove and return every task due at `now`, earliest first
    pub fn take_due(&mut self, now: Duration) -> Vec<K> {
        let mut due: Vec<(K, Duration)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (key.clone(), *deadline))
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);

        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }
}
