use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use deadtasks_core::{
    update, CheckState, DeadTask, DeadTasksState, Effect, ListConfig, ListContent, Msg,
    StoreFailure,
};
use deadtasks_engine::{EngineEvent, EngineEvents, EngineHandle, InMemoryTaskStore};

const WAIT: Duration = Duration::from_secs(5);

/// Drives the pure core against a live engine, the way the console does.
struct Harness {
    state: DeadTasksState,
    engine: EngineHandle,
    events: EngineEvents,
}

impl Harness {
    fn new(store: Arc<InMemoryTaskStore>, config: ListConfig) -> Self {
        let (engine, events) = EngineHandle::new(store);
        Self {
            state: DeadTasksState::new(config),
            engine,
            events,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in &effects {
            match effect.clone() {
                Effect::FetchDeadTasks {
                    request_id,
                    queue,
                    page,
                } => self.engine.fetch(request_id, queue, page),
                Effect::DeleteDeadTask { queue, key } => self.engine.delete(queue, key),
                Effect::ArmRefreshTimer {
                    generation,
                    interval,
                } => self.engine.arm_timer(generation, interval),
                Effect::CancelRefreshTimer => self.engine.cancel_timer(),
            }
        }
        effects
    }

    /// Feeds the next engine event back into the core.
    fn pump(&mut self) -> EngineEvent {
        let event = self.events.recv_timeout(WAIT).expect("engine event");
        let msg = match event.clone() {
            EngineEvent::PageLoaded { request_id, result } => Msg::PageFetched {
                request_id,
                result: result.map_err(|err| StoreFailure::new(err.to_string())),
            },
            EngineEvent::DeleteCompleted { key, result } => Msg::DeleteFinished {
                key,
                result: result.map_err(|err| StoreFailure::new(err.to_string())),
            },
            EngineEvent::RefreshDue { generation } => Msg::RefreshTimerFired { generation },
        };
        self.dispatch(msg);
        event
    }
}

fn seeded(store: InMemoryTaskStore, count: usize) -> Arc<InMemoryTaskStore> {
    for n in 1..=count {
        store.insert(
            "default",
            DeadTask {
                id: format!("id-{n}"),
                key: format!("key-{n}"),
                task_type: "email:send".to_string(),
                payload: serde_json::json!({ "n": n }),
                last_failed_at: DateTime::<Utc>::UNIX_EPOCH,
                error_message: "smtp timeout".to_string(),
                request_pending: false,
            },
        );
    }
    Arc::new(store)
}

fn config(page_size: usize, poll_interval_ms: i64) -> ListConfig {
    ListConfig {
        page_size,
        poll_interval_ms,
        ..ListConfig::default()
    }
}

#[test]
fn select_all_on_first_of_three_pages() {
    let store = seeded(InMemoryTaskStore::new(), 12);
    let mut harness = Harness::new(store, config(5, 0));

    harness.dispatch(Msg::Mounted);
    harness.pump();
    harness.dispatch(Msg::SelectAllToggled(true));

    let selected: Vec<_> = harness.state.selection().iter().collect();
    assert_eq!(selected, vec!["id-1", "id-2", "id-3", "id-4", "id-5"]);
    let ListContent::Table(table) = harness.state.view(Utc::now()).content else {
        panic!("expected table");
    };
    assert_eq!(table.select_all, CheckState::Checked);
    assert_eq!(table.pagination.total_count, 12);
    assert_eq!(table.pagination.page_count, 3);
}

#[test]
fn delete_disables_row_then_removes_it() {
    let store = seeded(
        InMemoryTaskStore::new().with_delete_delay(Duration::from_millis(300)),
        3,
    );
    let mut harness = Harness::new(store.clone(), config(20, 0));
    harness.dispatch(Msg::Mounted);
    harness.pump();

    let started = Instant::now();
    let effects = harness.dispatch(Msg::DeleteClicked {
        key: "key-1".to_string(),
    });
    assert_eq!(effects.len(), 1);
    assert!(harness.state.list().tasks[0].request_pending);

    // A second click while pending dispatches nothing.
    assert!(harness
        .dispatch(Msg::DeleteClicked {
            key: "key-1".to_string(),
        })
        .is_empty());

    harness.pump();
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert!(harness.state.list().tasks.iter().all(|t| t.key != "key-1"));
    assert_eq!(store.len("default"), 2);
}

#[test]
fn polling_refetches_current_page() {
    let store = seeded(InMemoryTaskStore::new(), 3);
    let mut harness = Harness::new(store.clone(), config(20, 100));

    let effects = harness.dispatch(Msg::Mounted);
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchDeadTasks { .. }))
            .count(),
        1
    );
    assert!(matches!(harness.pump(), EngineEvent::PageLoaded { .. }));
    assert_eq!(harness.state.list().tasks.len(), 3);

    store.insert(
        "default",
        DeadTask {
            id: "id-4".to_string(),
            key: "key-4".to_string(),
            task_type: "email:send".to_string(),
            payload: serde_json::Value::Null,
            last_failed_at: DateTime::<Utc>::UNIX_EPOCH,
            error_message: String::new(),
            request_pending: false,
        },
    );

    assert!(matches!(harness.pump(), EngineEvent::RefreshDue { .. }));
    assert!(matches!(harness.pump(), EngineEvent::PageLoaded { .. }));
    assert_eq!(harness.state.list().tasks.len(), 4);

    harness.dispatch(Msg::Unmounted);
}
