use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No capture running; start() is accepted
    Idle,
    /// Accumulating speech; segment events are applied
    Recording,
}

/// Statistics about a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Current lifecycle state
    pub state: SessionState,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Total elapsed time in seconds
    pub duration_secs: f64,

    /// Seconds left on the phase countdown
    pub remaining_secs: u64,

    /// Countdown rendered as `mm:ss`
    pub time_display: String,

    /// Number of finalized transcript segments
    pub segment_count: usize,

    /// Word count across finalized and interim text
    pub word_count: usize,
}
