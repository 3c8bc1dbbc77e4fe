use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Monotonic identifier attached to every issued list request.
pub type RequestId = u64;

/// Immutable snapshot of one dead task as returned by the task store.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadTask {
    /// Display identifier shown in the id column.
    pub id: String,
    /// Store-assigned key used for mutation calls.
    pub key: String,
    pub task_type: String,
    pub payload: Value,
    pub last_failed_at: DateTime<Utc>,
    pub error_message: String,
    /// True while a delete for this task is in flight.
    pub request_pending: bool,
}

/// One page of dead tasks plus the queue-wide total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeadTaskPage {
    pub tasks: Vec<DeadTask>,
    pub total_count: usize,
}

/// The (page number, page size) pair sent to the store. `page` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

/// A failure reported by the task store, reduced to what the core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub message: String,
}

impl StoreFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
