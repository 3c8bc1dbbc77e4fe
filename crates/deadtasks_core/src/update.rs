use console_logging::{console_debug, console_info};

use crate::{BulkCapability, DeadTasksState, Effect, Lifecycle, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DeadTasksState, msg: Msg) -> (DeadTasksState, Vec<Effect>) {
    if msg.requires_mount() && !state.is_mounted() {
        console_debug!("Ignoring {:?} while {:?}", msg, state.lifecycle());
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            if state.lifecycle() != Lifecycle::Created {
                return (state, Vec::new());
            }
            state.mount()
        }
        Msg::Unmounted => state.unmount(),
        Msg::PageChanged(page_index) => state.change_page(page_index),
        Msg::PageSizeChanged(page_size) => state.change_page_size(page_size),
        Msg::SelectAllToggled(checked) => {
            state.select_all(checked);
            Vec::new()
        }
        Msg::RowSelectToggled { id, checked } => {
            state.toggle_selection(&id, checked);
            Vec::new()
        }
        Msg::DeleteClicked { key } => state.request_delete(&key).into_iter().collect(),
        Msg::ExpandToggled { id } => {
            state.toggle_expanded(&id);
            Vec::new()
        }
        Msg::BulkActionClicked(action) => {
            match action.capability() {
                BulkCapability::NotImplemented => console_info!(
                    "Bulk {} on {} selected tasks is not implemented yet",
                    action.label(),
                    state.selection().len()
                ),
            }
            Vec::new()
        }
        Msg::PollIntervalChanged(poll_interval_ms) => state.set_poll_interval(poll_interval_ms),
        Msg::RefreshTimerFired { generation } => state.refresh_tick(generation),
        Msg::PageFetched { request_id, result } => {
            state.apply_fetch(request_id, result);
            Vec::new()
        }
        Msg::DeleteFinished { key, result } => {
            state.apply_delete_outcome(&key, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
