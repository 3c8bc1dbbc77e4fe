use chrono::{DateTime, Duration, TimeZone, Utc};
use deadtasks_core::{
    update, time_ago, CheckState, Column, DeadTask, DeadTaskPage, DeadTasksState, ListConfig,
    ListContent, Msg, PaginationView, RowView, COLUMNS, EMPTY_MESSAGE,
};
use pretty_assertions::assert_eq;

fn failed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn task(n: usize) -> DeadTask {
    DeadTask {
        id: format!("id-{n}"),
        key: format!("key-{n}"),
        task_type: "email:send".to_string(),
        payload: serde_json::json!({ "to": "ops@example.com", "attempt": n }),
        last_failed_at: failed_at(),
        error_message: "smtp timeout".to_string(),
        request_pending: false,
    }
}

fn with_page(tasks: Vec<DeadTask>, total_count: usize) -> DeadTasksState {
    let (state, _) = update(DeadTasksState::new(ListConfig::default()), Msg::Mounted);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: 1,
            result: Ok(DeadTaskPage { tasks, total_count }),
        },
    );
    state
}

fn refetch(state: DeadTasksState, request_id: u64, tasks: Vec<DeadTask>) -> DeadTasksState {
    let (state, _) = update(state, Msg::RefreshTimerFired { generation: 1 });
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id,
            result: Ok(DeadTaskPage {
                total_count: tasks.len(),
                tasks,
            }),
        },
    );
    state
}

fn expand(state: DeadTasksState, id: &str) -> DeadTasksState {
    let (state, _) = update(state, Msg::ExpandToggled { id: id.to_string() });
    state
}

#[test]
fn first_paint_before_data_is_loading() {
    let (state, _) = update(DeadTasksState::new(ListConfig::default()), Msg::Mounted);
    let view = state.view(failed_at());
    assert!(view.loading);
    assert_eq!(view.content, ListContent::Loading);
}

#[test]
fn empty_page_suppresses_table() {
    let state = with_page(Vec::new(), 0);
    assert_eq!(
        state.view(failed_at()).content,
        ListContent::Empty {
            message: EMPTY_MESSAGE
        }
    );

    // A later refresh in flight does not bring back the loading placeholder.
    let (state, _) = update(state, Msg::RefreshTimerFired { generation: 1 });
    assert_eq!(
        state.view(failed_at()).content,
        ListContent::Empty {
            message: EMPTY_MESSAGE
        }
    );
}

#[test]
fn table_projection_has_fixed_columns_and_rows() {
    let state = with_page(vec![task(1), task(2)], 12);
    let (state, _) = update(
        state,
        Msg::DeleteClicked {
            key: "key-2".to_string(),
        },
    );
    let view = state.view(failed_at() + Duration::minutes(3));
    let ListContent::Table(table) = view.content else {
        panic!("expected table");
    };

    assert_eq!(table.columns, &COLUMNS[..]);
    assert_eq!(
        table.columns.iter().map(|c| c.label()).collect::<Vec<_>>(),
        vec!["", "ID", "Type", "Last Failed", "Last Error", "Actions"]
    );
    assert_eq!(table.select_all, CheckState::Unchecked);
    assert_eq!(
        table.rows[1],
        RowView {
            id: "id-2".to_string(),
            key: "key-2".to_string(),
            task_type: "email:send".to_string(),
            last_failed: "3 minutes ago".to_string(),
            error_message: "smtp timeout".to_string(),
            selected: false,
            expanded: false,
            delete_enabled: false,
            payload: None,
        }
    );
    assert_eq!(
        table.pagination,
        PaginationView {
            page_index: 0,
            page_size: 20,
            page_count: 1,
            total_count: 12,
            page_size_options: vec![10, 20, 30, 60, 100],
        }
    );
    assert_eq!(Column::Actions.label(), "Actions");
}

#[test]
fn expanded_row_carries_pretty_payload() {
    let state = expand(with_page(vec![task(1)], 1), "id-1");
    let ListContent::Table(table) = state.view(failed_at()).content else {
        panic!("expected table");
    };

    assert!(table.rows[0].expanded);
    assert_eq!(
        table.rows[0].payload.as_deref(),
        Some("{\n  \"attempt\": 1,\n  \"to\": \"ops@example.com\"\n}")
    );

    let state = expand(state, "id-1");
    assert!(!state.is_expanded("id-1"));
}

#[test]
fn expansion_is_row_local() {
    let state = expand(with_page(vec![task(1), task(2)], 2), "id-2");
    assert!(!state.is_expanded("id-1"));
    assert!(state.is_expanded("id-2"));
}

#[test]
fn row_replaced_by_refresh_comes_back_collapsed() {
    let state = expand(with_page(vec![task(1), task(2)], 2), "id-1");
    let state = expand(state, "id-2");

    // id-1 disappears on this refresh, id-2 survives.
    let state = refetch(state, 2, vec![task(2)]);
    assert!(!state.is_expanded("id-1"));
    assert!(state.is_expanded("id-2"));

    let state = refetch(state, 3, vec![task(1), task(2)]);
    assert!(!state.is_expanded("id-1"));
}

#[test]
fn expanding_unknown_row_is_ignored() {
    let state = expand(with_page(vec![task(1)], 1), "id-9");
    assert!(!state.is_expanded("id-9"));
}

#[test]
fn page_count_follows_total_not_rows() {
    let config = ListConfig {
        page_size: 5,
        ..ListConfig::default()
    };
    let (state, _) = update(DeadTasksState::new(config), Msg::Mounted);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: 1,
            result: Ok(DeadTaskPage {
                tasks: (1..=5).map(task).collect(),
                total_count: 12,
            }),
        },
    );
    let ListContent::Table(table) = state.view(failed_at()).content else {
        panic!("expected table");
    };
    assert_eq!(table.rows.len(), 5);
    assert_eq!(table.pagination.page_count, 3);
}

#[test]
fn time_ago_buckets() {
    let then = failed_at();
    assert_eq!(time_ago(then, then), "just now");
    assert_eq!(time_ago(then, then - Duration::seconds(30)), "just now");
    assert_eq!(time_ago(then, then + Duration::seconds(1)), "1 second ago");
    assert_eq!(time_ago(then, then + Duration::seconds(45)), "45 seconds ago");
    assert_eq!(time_ago(then, then + Duration::minutes(1)), "1 minute ago");
    assert_eq!(time_ago(then, then + Duration::hours(5)), "5 hours ago");
    assert_eq!(time_ago(then, then + Duration::days(1)), "1 day ago");
    assert_eq!(time_ago(then, then + Duration::days(40)), "40 days ago");
}
