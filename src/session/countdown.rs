use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared seconds-remaining counter for a capture phase.
///
/// Counts down at one-second granularity from a configured ceiling to zero;
/// the session's tick task decrements it and forces a stop when it elapses.
/// Cloning shares the counter, so the HTTP layer can report the remaining
/// time while the tick task owns the countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Arc<AtomicU64>,
}

impl Countdown {
    pub fn new(ceiling_secs: u64) -> Self {
        Self {
            remaining: Arc::new(AtomicU64::new(ceiling_secs)),
        }
    }

    /// Restore the counter to a phase ceiling (called whenever a new capture
    /// phase begins).
    pub fn reset(&self, ceiling_secs: u64) {
        self.remaining.store(ceiling_secs, Ordering::SeqCst);
    }

    /// Decrement by one second, saturating at zero. Returns the new value.
    pub fn tick(&self) -> u64 {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(prev.saturating_sub(1))
            })
            .map(|prev| prev.saturating_sub(1))
            .unwrap_or(0)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining_secs() == 0
    }
}

/// `mm:ss` rendering of a seconds value, as shown on the session timer.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
