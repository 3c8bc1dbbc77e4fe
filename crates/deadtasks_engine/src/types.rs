use deadtasks_core::{DeadTaskPage, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no dead task with key {key} in queue {queue}")]
    NotFound { queue: String, key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PageLoaded {
        request_id: RequestId,
        result: Result<DeadTaskPage, StoreError>,
    },
    DeleteCompleted {
        key: String,
        result: Result<(), StoreError>,
    },
    /// The refresh timer of `generation` elapsed.
    RefreshDue { generation: u64 },
}
