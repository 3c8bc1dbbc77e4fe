use deadtasks_core::{
    update, DeadTask, DeadTaskPage, DeadTasksState, Effect, ListConfig, Msg, PageRequest,
    MAX_PAGE_INDEX,
};

fn task(n: usize) -> DeadTask {
    DeadTask {
        id: format!("id-{n}"),
        key: format!("key-{n}"),
        task_type: "report:generate".to_string(),
        payload: serde_json::json!({ "report": n }),
        last_failed_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        error_message: "deadline exceeded".to_string(),
        request_pending: false,
    }
}

fn mounted() -> DeadTasksState {
    let (state, _) = update(DeadTasksState::new(ListConfig::default()), Msg::Mounted);
    state
}

fn fetched_page(effects: &[Effect]) -> Option<PageRequest> {
    effects.iter().find_map(|effect| match effect {
        Effect::FetchDeadTasks { page, .. } => Some(*page),
        _ => None,
    })
}

fn request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchDeadTasks { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("fetch effect")
}

#[test]
fn page_change_fetches_one_based_page() {
    let (state, effects) = update(mounted(), Msg::PageChanged(2));

    assert_eq!(state.pagination().page_index(), 2);
    assert_eq!(fetched_page(&effects), Some(PageRequest { page: 3, size: 20 }));
    assert_eq!(state.last_issued(), Some(PageRequest { page: 3, size: 20 }));
}

#[test]
fn same_page_does_not_refetch() {
    let (state, _) = update(mounted(), Msg::PageChanged(1));
    let (_state, effects) = update(state, Msg::PageChanged(1));
    assert!(effects.is_empty());
}

#[test]
fn page_size_change_always_resets_to_first_page() {
    for prior in [0, 1, 4, 99] {
        let (state, _) = update(mounted(), Msg::PageChanged(prior));
        let (state, effects) = update(state, Msg::PageSizeChanged(10));

        assert_eq!(state.pagination().page_index(), 0);
        assert_eq!(state.pagination().page_size(), 10);
        assert_eq!(fetched_page(&effects), Some(PageRequest { page: 1, size: 10 }));
    }
}

#[test]
fn same_page_size_on_later_page_still_returns_to_first_page() {
    let (state, _) = update(mounted(), Msg::PageChanged(3));
    let (state, effects) = update(state, Msg::PageSizeChanged(20));

    assert_eq!(state.pagination().page_index(), 0);
    assert_eq!(fetched_page(&effects), Some(PageRequest { page: 1, size: 20 }));
}

#[test]
fn zero_page_size_is_rejected() {
    let (state, _) = update(mounted(), Msg::PageChanged(2));
    let (state, effects) = update(state, Msg::PageSizeChanged(0));

    assert!(effects.is_empty());
    assert_eq!(state.pagination().page_index(), 2);
    assert_eq!(state.pagination().page_size(), 20);
}

#[test]
fn late_response_for_previous_page_is_dropped() {
    let state = mounted();
    let (state, effects) = update(state, Msg::PageChanged(1));
    let second = request_id(&effects);

    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: second,
            result: Ok(DeadTaskPage {
                tasks: vec![task(21), task(22)],
                total_count: 22,
            }),
        },
    );
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: 1,
            result: Ok(DeadTaskPage {
                tasks: vec![task(1)],
                total_count: 22,
            }),
        },
    );

    let ids: Vec<_> = state.list().tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["id-21", "id-22"]);
    assert!(!state.list().loading);
}

#[test]
fn superseded_response_arriving_first_is_dropped_and_keeps_loading() {
    let state = mounted();
    let (state, _) = update(state, Msg::PageChanged(1));

    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: 1,
            result: Ok(DeadTaskPage {
                tasks: vec![task(1)],
                total_count: 1,
            }),
        },
    );

    assert!(state.list().tasks.is_empty());
    assert!(state.list().loading);
}

#[test]
fn older_poll_response_within_same_page_is_dropped() {
    let state = mounted();
    let (state, effects) = update(state, Msg::RefreshTimerFired { generation: 1 });
    let poll = request_id(&effects);

    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: poll,
            result: Ok(DeadTaskPage {
                tasks: vec![task(2)],
                total_count: 1,
            }),
        },
    );
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: 1,
            result: Ok(DeadTaskPage {
                tasks: vec![task(1), task(2)],
                total_count: 2,
            }),
        },
    );

    assert_eq!(state.list().tasks, vec![task(2)]);
    assert_eq!(state.list().total_count, 1);
}

#[test]
fn out_of_range_page_renders_empty_without_clamping() {
    let (state, effects) = update(mounted(), Msg::PageChanged(50));
    let id = request_id(&effects);
    let (state, _) = update(
        state,
        Msg::PageFetched {
            request_id: id,
            result: Ok(DeadTaskPage {
                tasks: Vec::new(),
                total_count: 12,
            }),
        },
    );

    assert_eq!(state.pagination().page_index(), 50);
    assert_eq!(state.list().total_count, 12);
}

#[test]
fn huge_page_index_is_clamped_to_a_one_based_page() {
    let (state, effects) = update(mounted(), Msg::PageChanged(usize::MAX));

    assert_eq!(state.pagination().page_index(), MAX_PAGE_INDEX);
    assert_eq!(
        fetched_page(&effects),
        Some(PageRequest {
            page: usize::MAX,
            size: 20,
        })
    );

    // Already at the last representable page.
    let (_state, effects) = update(state, Msg::PageChanged(usize::MAX));
    assert!(effects.is_empty());
}
