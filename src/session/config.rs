use serde::{Deserialize, Serialize};

/// Configuration for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier
    pub session_id: String,

    /// Countdown ceiling for the presentation phase
    /// Default: 600 seconds (10 minutes)
    pub presentation_secs: u64,

    /// Countdown ceiling for the question-answer phase
    /// Default: 300 seconds (5 minutes)
    pub answer_secs: u64,

    /// Recognition event channel capacity
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            presentation_secs: 600, // 10 minute presentation
            answer_secs: 300,       // 5 minute question segment
            event_buffer: 64,
        }
    }
}
