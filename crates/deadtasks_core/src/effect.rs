use std::time::Duration;

use crate::{PageRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List one page of dead tasks for `queue`.
    FetchDeadTasks {
        request_id: RequestId,
        queue: String,
        page: PageRequest,
    },
    /// Delete a single dead task by its store key.
    DeleteDeadTask { queue: String, key: String },
    /// Replace any running refresh timer with one firing every `interval`.
    ArmRefreshTimer { generation: u64, interval: Duration },
    /// Stop the refresh timer without replacing it.
    CancelRefreshTimer,
}
