use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use console_logging::{console_debug, console_warn};

use crate::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::view_model::{project, DeadTasksView, Projection};
use crate::{
    DeadTask, DeadTaskPage, Effect, PageRequest, Pagination, RefreshTrigger, RequestId,
    SelectionSet, StoreFailure,
};

/// Default queue name used when none is configured.
pub const DEFAULT_QUEUE: &str = "default";
/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: i64 = 5_000;

/// Construction-time settings for one list instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub queue: String,
    /// Zero or negative disables polling.
    pub poll_interval_ms: i64,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Drop the selection whenever the page or page size changes.
    pub clear_selection_on_page_change: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            queue: DEFAULT_QUEUE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            clear_selection_on_page_change: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

/// Store-side view of the current page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListViewState {
    pub loading: bool,
    pub tasks: Vec<DeadTask>,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeadTasksState {
    queue: String,
    lifecycle: Lifecycle,
    pagination: Pagination,
    page_size_options: Vec<usize>,
    clear_selection_on_page_change: bool,
    refresh: RefreshTrigger,
    selection: SelectionSet,
    list: ListViewState,
    /// Keys with a delete in flight; survives page replacement.
    pending_deletes: BTreeSet<String>,
    /// Deleted keys with the newest request issued when the delete landed.
    /// Responses to requests up to that id may still list the task.
    deleted: BTreeMap<String, RequestId>,
    /// Row-local expansion, keyed by display id.
    expanded: BTreeSet<String>,
    last_issued: Option<PageRequest>,
    last_request_id: RequestId,
    /// First request issued for the current (queue, page, size) tuple.
    tuple_request_id: RequestId,
    last_applied_request_id: Option<RequestId>,
    has_loaded: bool,
    last_error: Option<String>,
    dirty: bool,
}

impl Default for DeadTasksState {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl DeadTasksState {
    pub fn new(config: ListConfig) -> Self {
        Self {
            queue: config.queue,
            lifecycle: Lifecycle::Created,
            pagination: Pagination::new(config.page_size),
            page_size_options: config.page_size_options,
            clear_selection_on_page_change: config.clear_selection_on_page_change,
            refresh: RefreshTrigger::new(config.poll_interval_ms),
            selection: SelectionSet::new(),
            list: ListViewState::default(),
            pending_deletes: BTreeSet::new(),
            deleted: BTreeMap::new(),
            expanded: BTreeSet::new(),
            last_issued: None,
            last_request_id: 0,
            tuple_request_id: 0,
            last_applied_request_id: None,
            has_loaded: false,
            last_error: None,
            dirty: false,
        }
    }

    /// Projects the state into the view model, rendering times relative to `now`.
    pub fn view(&self, now: DateTime<Utc>) -> DeadTasksView {
        DeadTasksView {
            queue: self.queue.clone(),
            loading: self.list.loading,
            last_error: self.last_error.clone(),
            content: project(&Projection {
                tasks: &self.list.tasks,
                loading: self.list.loading,
                has_loaded: self.has_loaded,
                selection: &self.selection,
                expanded: &self.expanded,
                pagination: &self.pagination,
                total_count: self.list.total_count,
                page_size_options: &self.page_size_options,
                now,
            }),
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn list(&self) -> &ListViewState {
        &self.list
    }

    pub fn refresh(&self) -> &RefreshTrigger {
        &self.refresh
    }

    /// The request used for the most recently issued fetch.
    pub fn last_issued(&self) -> Option<PageRequest> {
        self.last_issued
    }

    pub fn is_delete_pending(&self, key: &str) -> bool {
        self.pending_deletes.contains(key)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns and clears the "needs re-render" flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mount(&mut self) -> Vec<Effect> {
        self.lifecycle = Lifecycle::Mounted;
        self.mark_dirty();
        self.refetch()
    }

    pub(crate) fn unmount(&mut self) -> Vec<Effect> {
        self.lifecycle = Lifecycle::Unmounted;
        self.list.loading = false;
        self.mark_dirty();
        vec![self.refresh.disarm()]
    }

    pub(crate) fn change_page(&mut self, page_index: usize) -> Vec<Effect> {
        if !self.pagination.set_page(page_index) {
            return Vec::new();
        }
        self.on_page_changed();
        self.refetch()
    }

    pub(crate) fn change_page_size(&mut self, page_size: usize) -> Vec<Effect> {
        if page_size == 0 {
            console_warn!("Ignoring page size 0 for queue {}", self.queue);
            return Vec::new();
        }
        if !self.pagination.set_page_size(page_size) {
            return Vec::new();
        }
        self.on_page_changed();
        self.refetch()
    }

    pub(crate) fn set_poll_interval(&mut self, poll_interval_ms: i64) -> Vec<Effect> {
        self.refresh.set_interval_ms(poll_interval_ms);
        if self.is_mounted() {
            vec![self.refresh.rearm()]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn refresh_tick(&mut self, generation: u64) -> Vec<Effect> {
        if !self.refresh.accepts(generation) {
            console_debug!(
                "Ignoring refresh tick of generation {} (current {})",
                generation,
                self.refresh.generation()
            );
            return Vec::new();
        }
        vec![self.issue_fetch()]
    }

    pub(crate) fn select_all(&mut self, checked: bool) {
        if checked {
            let ids: Vec<String> = self.list.tasks.iter().map(|task| task.id.clone()).collect();
            self.selection.select_all(ids);
        } else {
            self.selection.clear_all();
        }
        self.mark_dirty();
    }

    pub(crate) fn toggle_selection(&mut self, id: &str, checked: bool) {
        self.selection.toggle(id, checked);
        self.mark_dirty();
    }

    pub(crate) fn toggle_expanded(&mut self, id: &str) {
        if !self.list.tasks.iter().any(|task| task.id == id) {
            console_debug!("Ignoring expand toggle for unknown row {}", id);
            return;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
        self.mark_dirty();
    }

    /// Marks the row pending and returns the delete effect, unless a delete for
    /// `key` is already in flight or no rendered row carries that key.
    pub(crate) fn request_delete(&mut self, key: &str) -> Option<Effect> {
        if self.pending_deletes.contains(key) {
            console_debug!("Delete for {} already in flight", key);
            return None;
        }
        if !self.list.tasks.iter().any(|task| task.key == key) {
            console_warn!("Delete requested for unknown task key {}", key);
            return None;
        }

        self.pending_deletes.insert(key.to_owned());
        self.set_row_pending(key, true);
        self.mark_dirty();
        Some(Effect::DeleteDeadTask {
            queue: self.queue.clone(),
            key: key.to_owned(),
        })
    }

    pub(crate) fn apply_fetch(
        &mut self,
        request_id: RequestId,
        result: Result<DeadTaskPage, StoreFailure>,
    ) {
        let superseded = request_id < self.tuple_request_id
            || self
                .last_applied_request_id
                .is_some_and(|applied| request_id < applied);
        if superseded {
            console_debug!(
                "Dropping response to superseded request {} (current tuple starts at {})",
                request_id,
                self.tuple_request_id
            );
            return;
        }

        self.last_applied_request_id = Some(request_id);
        if request_id == self.last_request_id {
            self.list.loading = false;
        }

        match result {
            Ok(page) => {
                self.replace_page(request_id, page);
                self.has_loaded = true;
                self.last_error = None;
            }
            Err(failure) => {
                console_warn!(
                    "Listing dead tasks for queue {} failed: {}",
                    self.queue,
                    failure
                );
                self.last_error = Some(failure.message);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_delete_outcome(&mut self, key: &str, result: Result<(), StoreFailure>) {
        if !self.pending_deletes.remove(key) {
            console_debug!("Delete outcome for {} without a pending request", key);
        }

        match result {
            Ok(()) => {
                let removed: Vec<String> = self
                    .list
                    .tasks
                    .iter()
                    .filter(|task| task.key == key)
                    .map(|task| task.id.clone())
                    .collect();
                self.list.tasks.retain(|task| task.key != key);
                for id in &removed {
                    self.selection.toggle(id, false);
                    self.expanded.remove(id);
                }
                self.list.total_count = self.list.total_count.saturating_sub(removed.len());
                self.deleted.insert(key.to_owned(), self.last_request_id);
            }
            Err(failure) => {
                console_warn!(
                    "Deleting dead task {} in queue {} failed: {}",
                    key,
                    self.queue,
                    failure
                );
                self.set_row_pending(key, false);
                self.last_error = Some(format!("delete {key}: {failure}"));
            }
        }
        self.mark_dirty();
    }

    fn on_page_changed(&mut self) {
        if self.clear_selection_on_page_change {
            self.selection.clear_all();
        }
        self.mark_dirty();
    }

    /// Issues a fetch for a new tuple and restarts the timer around it.
    fn refetch(&mut self) -> Vec<Effect> {
        let fetch = self.issue_fetch();
        self.tuple_request_id = self.last_request_id;
        vec![fetch, self.refresh.rearm()]
    }

    /// Builds a fetch from the current pagination, never from a captured tuple.
    fn issue_fetch(&mut self) -> Effect {
        self.last_request_id += 1;
        let page = self.pagination.request();
        self.last_issued = Some(page);
        self.list.loading = true;
        self.mark_dirty();
        Effect::FetchDeadTasks {
            request_id: self.last_request_id,
            queue: self.queue.clone(),
            page,
        }
    }

    fn replace_page(&mut self, request_id: RequestId, page: DeadTaskPage) {
        let mut tasks = page.tasks;
        let listed = tasks.len();
        tasks.retain(|task| {
            self.deleted
                .get(&task.key)
                .is_none_or(|&issued_before| request_id > issued_before)
        });
        let dropped = listed - tasks.len();
        if dropped > 0 {
            console_debug!(
                "Dropped {} already deleted task(s) from response {}",
                dropped,
                request_id
            );
        }
        self.deleted.retain(|_, issued_before| request_id <= *issued_before);

        for task in &mut tasks {
            task.request_pending = self.pending_deletes.contains(&task.key);
        }
        // Rows absent from the new page are unmounted; they come back collapsed.
        self.expanded.retain(|id| tasks.iter().any(|task| &task.id == id));
        self.list.tasks = tasks;
        self.list.total_count = page.total_count.saturating_sub(dropped);
    }

    fn set_row_pending(&mut self, key: &str, pending: bool) {
        for task in self.list.tasks.iter_mut().filter(|task| task.key == key) {
            task.request_pending = pending;
        }
    }
}
