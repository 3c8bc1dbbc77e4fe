/// Bulk actions offered in the toolbar while at least one row is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    Run,
    Kill,
    Delete,
}

/// What the console can currently do with a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkCapability {
    /// The action is shown but has no store operation behind it yet.
    NotImplemented,
}

impl BulkAction {
    pub const ALL: [BulkAction; 3] = [BulkAction::Run, BulkAction::Kill, BulkAction::Delete];

    pub fn label(self) -> &'static str {
        match self {
            BulkAction::Run => "Run",
            BulkAction::Kill => "Kill",
            BulkAction::Delete => "Delete",
        }
    }

    // TODO: wire bulk delete to the store once it exposes a batch endpoint.
    pub fn capability(self) -> BulkCapability {
        match self {
            BulkAction::Run | BulkAction::Kill | BulkAction::Delete => {
                BulkCapability::NotImplemented
            }
        }
    }
}
