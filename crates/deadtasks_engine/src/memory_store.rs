use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use deadtasks_core::{DeadTask, DeadTaskPage, PageRequest};

use crate::{StoreError, TaskStore};

/// Task store kept in process memory, for demos and tests.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    queues: Mutex<BTreeMap<String, Vec<DeadTask>>>,
    failing_keys: Mutex<BTreeSet<String>>,
    delete_delay: Duration,
    list_delay: Duration,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay applied before every delete completes.
    pub fn with_delete_delay(mut self, delay: Duration) -> Self {
        self.delete_delay = delay;
        self
    }

    /// Delay applied before every list completes.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn insert(&self, queue: &str, task: DeadTask) {
        self.lock_queues()
            .entry(queue.to_string())
            .or_default()
            .push(task);
    }

    /// Makes deletes of `key` fail with a server error until cleared.
    pub fn fail_deletes_of(&self, key: &str) {
        self.lock_failing().insert(key.to_string());
    }

    pub fn clear_failures(&self) {
        self.lock_failing().clear();
    }

    pub fn len(&self, queue: &str) -> usize {
        self.lock_queues().get(queue).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, queue: &str) -> bool {
        self.len(queue) == 0
    }

    fn lock_queues(&self) -> MutexGuard<'_, BTreeMap<String, Vec<DeadTask>>> {
        self.queues
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_failing(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.failing_keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_dead_tasks(
        &self,
        queue: &str,
        page: PageRequest,
    ) -> Result<DeadTaskPage, StoreError> {
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }

        let queues = self.lock_queues();
        let all = queues.get(queue).map(Vec::as_slice).unwrap_or_default();
        let start = page.page.saturating_sub(1).saturating_mul(page.size);
        let tasks = all.iter().skip(start).take(page.size).cloned().collect();
        Ok(DeadTaskPage {
            tasks,
            total_count: all.len(),
        })
    }

    async fn delete_dead_task(&self, queue: &str, key: &str) -> Result<(), StoreError> {
        if !self.delete_delay.is_zero() {
            tokio::time::sleep(self.delete_delay).await;
        }

        if self.lock_failing().contains(key) {
            return Err(StoreError::HttpStatus(500));
        }

        let mut queues = self.lock_queues();
        let tasks = queues.get_mut(queue);
        let position = tasks
            .as_ref()
            .and_then(|tasks| tasks.iter().position(|task| task.key == key));
        match (tasks, position) {
            (Some(tasks), Some(index)) => {
                tasks.remove(index);
                Ok(())
            }
            _ => Err(StoreError::NotFound {
                queue: queue.to_string(),
                key: key.to_string(),
            }),
        }
    }
}
