use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use console_logging::{console_debug, console_error};
use deadtasks_core::{PageRequest, RequestId};

use crate::{EngineEvent, RefreshTimer, TaskStore};

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        queue: String,
        page: PageRequest,
    },
    Delete {
        queue: String,
        key: String,
    },
    ArmTimer {
        generation: u64,
        period: Duration,
    },
    CancelTimer,
}

/// Sending side of the engine. Commands run on a dedicated tokio runtime
/// thread; results come back through [`EngineEvents`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(store: Arc<dyn TaskStore>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    console_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut timer = RefreshTimer::new(runtime.handle().clone(), event_tx.clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ArmTimer { generation, period } => {
                        console_debug!("Arming refresh timer {} every {:?}", generation, period);
                        timer.arm(generation, period);
                    }
                    EngineCommand::CancelTimer => timer.cancel(),
                    command => {
                        let store = store.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_command(store.as_ref(), command, event_tx).await;
                        });
                    }
                }
            }
            timer.cancel();
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn fetch(&self, request_id: RequestId, queue: impl Into<String>, page: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            queue: queue.into(),
            page,
        });
    }

    pub fn delete(&self, queue: impl Into<String>, key: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Delete {
            queue: queue.into(),
            key: key.into(),
        });
    }

    pub fn arm_timer(&self, generation: u64, period: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ArmTimer { generation, period });
    }

    pub fn cancel_timer(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelTimer);
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    store: &dyn TaskStore,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Fetch {
            request_id,
            queue,
            page,
        } => EngineEvent::PageLoaded {
            request_id,
            result: store.list_dead_tasks(&queue, page).await,
        },
        EngineCommand::Delete { queue, key } => {
            let result = store.delete_dead_task(&queue, &key).await;
            EngineEvent::DeleteCompleted { key, result }
        }
        EngineCommand::ArmTimer { .. } | EngineCommand::CancelTimer => return,
    };
    let _ = event_tx.send(event);
}
