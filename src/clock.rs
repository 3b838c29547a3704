//! Fixed-interval frame scheduling.
//!
//! Stands in for a display refresh callback: the host feeds in elapsed time
//! and runs one game tick per interval that has passed.

use crate::constants::MAX_CATCHUP_TICKS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: u64,
    accumulated_ms: u64,
}

impl FrameClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Add elapsed time and return how many ticks are due.
    ///
    /// At most `MAX_CATCHUP_TICKS` are returned; any backlog beyond that is
    /// dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        self.accumulated_ms += elapsed_ms;
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        if due > MAX_CATCHUP_TICKS as u64 {
            tracing::debug!(dropped = due - MAX_CATCHUP_TICKS as u64, "frame backlog dropped");
            MAX_CATCHUP_TICKS
        } else {
            due as u32
        }
    }

    /// Milliseconds until the next tick is due.
    pub fn until_next_ms(&self) -> u64 {
        self.interval_ms - self.accumulated_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}
