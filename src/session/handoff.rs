use crate::error::{GraderError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Single-slot handoff carrying the finalized transcript from the capture
/// flow to the report flow.
///
/// Replaces ambient session storage with an explicit object owned by the
/// application state: the capture flow deposits on stop, the report flow
/// takes (consuming the slot), and a take from an empty slot fails with
/// `NoTranscriptFound` so the caller can route the user back to capture.
#[derive(Clone, Default)]
pub struct TranscriptHandoff {
    slot: Arc<RwLock<Option<String>>>,
}

impl TranscriptHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finalized transcript, replacing any previous one.
    pub async fn deposit(&self, transcript: String) {
        *self.slot.write().await = Some(transcript);
    }

    /// Consume the stored transcript.
    pub async fn take(&self) -> Result<String> {
        self.slot
            .write()
            .await
            .take()
            .ok_or(GraderError::NoTranscriptFound)
    }

    /// Read the stored transcript without consuming it.
    pub async fn peek(&self) -> Option<String> {
        self.slot.read().await.clone()
    }
}
