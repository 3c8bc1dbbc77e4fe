use std::sync::mpsc;
use std::thread;

use console_logging::{console_info, console_warn};
use deadtasks_core::{Effect, Msg, StoreFailure};
use deadtasks_engine::{EngineEvent, EngineEvents, EngineHandle};

use super::app::AppInput;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Self {
        spawn_event_loop(events, input_tx);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchDeadTasks {
                    request_id,
                    queue,
                    page,
                } => {
                    console_info!(
                        "FetchDeadTasks request_id={} queue={} page={} size={}",
                        request_id,
                        queue,
                        page.page,
                        page.size
                    );
                    self.engine.fetch(request_id, queue, page);
                }
                Effect::DeleteDeadTask { queue, key } => {
                    console_info!("DeleteDeadTask queue={} key={}", queue, key);
                    self.engine.delete(queue, key);
                }
                Effect::ArmRefreshTimer {
                    generation,
                    interval,
                } => self.engine.arm_timer(generation, interval),
                Effect::CancelRefreshTimer => self.engine.cancel_timer(),
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if input_tx.send(AppInput::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageLoaded { request_id, result } => Msg::PageFetched {
            request_id,
            result: result.map_err(|err| {
                console_warn!("List request {} failed: {}", request_id, err);
                StoreFailure::new(err.to_string())
            }),
        },
        EngineEvent::DeleteCompleted { key, result } => Msg::DeleteFinished {
            result: result.map_err(|err| {
                console_warn!("Delete of {} failed: {}", key, err);
                StoreFailure::new(err.to_string())
            }),
            key,
        },
        EngineEvent::RefreshDue { generation } => Msg::RefreshTimerFired { generation },
    }
}
