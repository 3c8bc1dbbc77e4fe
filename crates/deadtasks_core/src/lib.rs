//! Dead tasks core: pure state machine and view-model projection for one queue's
//! dead task list.
mod bulk;
mod effect;
mod msg;
mod pagination;
mod refresh;
mod selection;
mod state;
mod task;
mod time_ago;
mod update;
mod view_model;

pub use bulk::{BulkAction, BulkCapability};
pub use effect::Effect;
pub use msg::Msg;
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_INDEX, PAGE_SIZE_OPTIONS};
pub use refresh::{poll_interval_from_millis, RefreshTrigger};
pub use selection::{CheckState, SelectionSet};
pub use state::{
    DeadTasksState, Lifecycle, ListConfig, ListViewState, DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUEUE,
};
pub use task::{DeadTask, DeadTaskPage, PageRequest, RequestId, StoreFailure};
pub use time_ago::time_ago;
pub use update::update;
pub use view_model::{
    project, Column, DeadTasksView, ListContent, PaginationView, Projection, RowView, TableView,
    ToolbarView, COLUMNS, EMPTY_MESSAGE,
};
