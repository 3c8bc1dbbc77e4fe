use deadtasks_core::{DeadTaskPage, PageRequest};

use crate::StoreError;

/// Read/delete access to the dead tasks of a queue.
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists one page of dead tasks together with the queue's dead total.
    async fn list_dead_tasks(
        &self,
        queue: &str,
        page: PageRequest,
    ) -> Result<DeadTaskPage, StoreError>;

    /// Deletes a dead task by its store key.
    async fn delete_dead_task(&self, queue: &str, key: &str) -> Result<(), StoreError>;
}
