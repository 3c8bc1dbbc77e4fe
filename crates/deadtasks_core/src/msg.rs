use crate::{BulkAction, DeadTaskPage, RequestId, StoreFailure};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The list became visible; starts fetching and polling.
    Mounted,
    /// The list was torn down; stops polling and ignores late results.
    Unmounted,
    /// User picked a zero-based page index.
    PageChanged(usize),
    /// User picked a new rows-per-page value.
    PageSizeChanged(usize),
    /// Header checkbox toggled.
    SelectAllToggled(bool),
    /// Row checkbox toggled.
    RowSelectToggled { id: String, checked: bool },
    /// Row delete button clicked.
    DeleteClicked { key: String },
    /// Row expand arrow clicked.
    ExpandToggled { id: String },
    /// Toolbar bulk action clicked.
    BulkActionClicked(BulkAction),
    /// Poll interval setting changed, in milliseconds.
    PollIntervalChanged(i64),
    /// The refresh timer of the given generation fired.
    RefreshTimerFired { generation: u64 },
    /// Store answered a list request.
    PageFetched {
        request_id: RequestId,
        result: Result<DeadTaskPage, StoreFailure>,
    },
    /// Store answered a delete request.
    DeleteFinished {
        key: String,
        result: Result<(), StoreFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

impl Msg {
    /// Messages that only make sense while the list is mounted.
    pub(crate) fn requires_mount(&self) -> bool {
        !matches!(
            self,
            Msg::Mounted | Msg::PollIntervalChanged(_) | Msg::Tick | Msg::NoOp
        )
    }
}
