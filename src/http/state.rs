use crate::config::SessionTimings;
use crate::grading::GradingService;
use crate::llm::GenerativeModel;
use crate::questions::QuestionService;
use crate::session::{CaptureSession, QuestioningSession, SessionConfig, TranscriptHandoff};
use crate::speech::RecognizerHandle;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The session currently occupying the single active slot
pub enum ActiveSession {
    Capture(CaptureSession),
    Questioning(QuestioningSession),
}

impl ActiveSession {
    /// The underlying capture session, whichever phase is active.
    pub fn capture(&self) -> &CaptureSession {
        match self {
            ActiveSession::Capture(capture) => capture,
            ActiveSession::Questioning(questioning) => questioning.capture(),
        }
    }
}

/// Active session plus the handle the segments endpoint pushes through
pub struct SessionSlot {
    pub session: ActiveSession,
    pub handle: RecognizerHandle,
}

/// Shared application state for HTTP handlers.
///
/// Only one capture/questioning session is ever live, so the slot is a
/// single `Option` rather than a map; start answers 409 while it is
/// occupied.
#[derive(Clone)]
pub struct AppState {
    /// The single active session, if any
    pub slot: Arc<Mutex<Option<SessionSlot>>>,

    /// Transcript handoff between the capture and report flows
    pub handoff: TranscriptHandoff,

    /// Rubric grading service
    pub grading: Arc<GradingService>,

    /// Follow-up question service
    pub questions: Arc<QuestionService>,

    /// Phase ceilings applied to each new session
    pub timings: SessionTimings,
}

impl AppState {
    pub fn new(model: Arc<dyn GenerativeModel>, timings: SessionTimings) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            handoff: TranscriptHandoff::new(),
            grading: Arc::new(GradingService::new(Arc::clone(&model))),
            questions: Arc::new(QuestionService::new(model)),
            timings,
        }
    }

    /// Session configuration for a freshly started session.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            presentation_secs: self.timings.presentation_secs,
            answer_secs: self.timings.answer_secs,
            ..SessionConfig::default()
        }
    }
}
