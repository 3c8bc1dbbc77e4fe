use std::time::Duration;

use crate::Effect;

/// Converts the poll interval setting into a timer period.
/// Zero or negative values disable polling.
pub fn poll_interval_from_millis(millis: i64) -> Option<Duration> {
    u64::try_from(millis)
        .ok()
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
}

/// Bookkeeping for the periodic refresh timer.
///
/// Every re-arm bumps the generation; ticks carrying an older generation were
/// scheduled for a tuple that no longer exists and must not fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefreshTrigger {
    interval: Option<Duration>,
    generation: u64,
    armed: bool,
}

impl RefreshTrigger {
    pub fn new(poll_interval_ms: i64) -> Self {
        Self {
            interval: poll_interval_from_millis(poll_interval_ms),
            generation: 0,
            armed: false,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn set_interval_ms(&mut self, poll_interval_ms: i64) {
        self.interval = poll_interval_from_millis(poll_interval_ms);
    }

    /// Invalidates the running timer and returns the effect that replaces it.
    pub fn rearm(&mut self) -> Effect {
        self.generation += 1;
        match self.interval {
            Some(interval) => {
                self.armed = true;
                Effect::ArmRefreshTimer {
                    generation: self.generation,
                    interval,
                }
            }
            None => {
                self.armed = false;
                Effect::CancelRefreshTimer
            }
        }
    }

    /// Stops the timer for good (teardown).
    pub fn disarm(&mut self) -> Effect {
        self.generation += 1;
        self.armed = false;
        Effect::CancelRefreshTimer
    }

    /// True when a tick of `generation` belongs to the live timer.
    pub fn accepts(&self, generation: u64) -> bool {
        self.armed && generation == self.generation
    }
}
