use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{time_ago, BulkAction, CheckState, DeadTask, Pagination, SelectionSet};

/// Shown instead of the table when the page holds no tasks.
pub const EMPTY_MESSAGE: &str = "No dead tasks at this time.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Expand,
    Id,
    Type,
    LastFailed,
    LastError,
    Actions,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Column::Expand => "",
            Column::Id => "ID",
            Column::Type => "Type",
            Column::LastFailed => "Last Failed",
            Column::LastError => "Last Error",
            Column::Actions => "Actions",
        }
    }
}

/// Fixed column schema, after the select-all checkbox column.
pub const COLUMNS: [Column; 6] = [
    Column::Expand,
    Column::Id,
    Column::Type,
    Column::LastFailed,
    Column::LastError,
    Column::Actions,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadTasksView {
    pub queue: String,
    pub loading: bool,
    /// Message of the latest failed list request, until the next success.
    pub last_error: Option<String>,
    pub content: ListContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// Nothing has been fetched yet.
    Loading,
    /// The current page is empty; the table is suppressed.
    Empty { message: &'static str },
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub toolbar: ToolbarView,
    pub select_all: CheckState,
    pub columns: &'static [Column],
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub selected_count: usize,
    /// Empty while nothing is selected.
    pub bulk_actions: Vec<BulkAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub key: String,
    pub task_type: String,
    pub last_failed: String,
    pub error_message: String,
    pub selected: bool,
    pub expanded: bool,
    pub delete_enabled: bool,
    /// Pretty-printed payload, present only while expanded.
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_count: usize,
    pub page_size_options: Vec<usize>,
}

/// Everything the list projection reads.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    pub tasks: &'a [DeadTask],
    pub loading: bool,
    pub has_loaded: bool,
    pub selection: &'a SelectionSet,
    pub expanded: &'a BTreeSet<String>,
    pub pagination: &'a Pagination,
    pub total_count: usize,
    pub page_size_options: &'a [usize],
    pub now: DateTime<Utc>,
}

/// Pure projection of list data onto what the renderer draws.
pub fn project(input: &Projection<'_>) -> ListContent {
    if input.tasks.is_empty() {
        if !input.has_loaded && input.loading {
            return ListContent::Loading;
        }
        return ListContent::Empty {
            message: EMPTY_MESSAGE,
        };
    }

    let selected_count = input.selection.len();
    let bulk_actions = if selected_count > 0 {
        BulkAction::ALL.to_vec()
    } else {
        Vec::new()
    };

    ListContent::Table(TableView {
        toolbar: ToolbarView {
            selected_count,
            bulk_actions,
        },
        select_all: input
            .selection
            .header_state(input.tasks.iter().map(|task| task.id.as_str())),
        columns: &COLUMNS,
        rows: input
            .tasks
            .iter()
            .map(|task| row_view(task, input))
            .collect(),
        pagination: PaginationView {
            page_index: input.pagination.page_index(),
            page_size: input.pagination.page_size(),
            page_count: input.pagination.page_count(input.total_count),
            total_count: input.total_count,
            page_size_options: input.page_size_options.to_vec(),
        },
    })
}

fn row_view(task: &DeadTask, input: &Projection<'_>) -> RowView {
    let expanded = input.expanded.contains(&task.id);
    RowView {
        id: task.id.clone(),
        key: task.key.clone(),
        task_type: task.task_type.clone(),
        last_failed: time_ago(task.last_failed_at, input.now),
        error_message: task.error_message.clone(),
        selected: input.selection.contains(&task.id),
        expanded,
        delete_enabled: !task.request_pending,
        payload: expanded.then(|| pretty_payload(task)),
    }
}

fn pretty_payload(task: &DeadTask) -> String {
    serde_json::to_string_pretty(&task.payload).unwrap_or_else(|_| task.payload.to_string())
}
