use std::sync::mpsc;
use std::time::Duration;

use console_logging::console_trace;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

/// Periodic refresh timer. At most one timer runs at a time: arming cancels
/// the previous one, and dropping the timer cancels it too.
pub struct RefreshTimer {
    runtime: Handle,
    event_tx: mpsc::Sender<EngineEvent>,
    current: Option<CancellationToken>,
}

impl RefreshTimer {
    pub fn new(runtime: Handle, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            runtime,
            event_tx,
            current: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Emits `RefreshDue { generation }` every `period`, starting one period from now.
    pub fn arm(&mut self, generation: u64, period: Duration) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let event_tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => {
                        console_trace!("Refresh timer generation {} fired", generation);
                        if event_tx.send(EngineEvent::RefreshDue { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        self.current = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
