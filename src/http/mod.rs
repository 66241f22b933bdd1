//! HTTP API server for the browser client
//!
//! This module provides the REST API the recorder/report pages drive:
//! - POST /grade - Grade a transcript against the rubric
//! - POST /questions - Generate follow-up questions
//! - POST /sessions/record/start - Start the capture session
//! - POST /sessions/record/stop - Stop it and hand off the transcript
//! - POST /sessions/segments - Push a recognition event
//! - GET /sessions/status - Query session state
//! - GET /sessions/transcript - Get the accumulated transcript
//! - POST /sessions/questioning/begin|advance - Drive the questioning phase
//! - GET /report - Grade the handed-off transcript, assemble the report
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{
    GradeRequest, QuestioningStatus, QuestioningStepResponse, QuestionsRequest, SegmentRequest,
    SegmentResponse, StartSessionResponse, StatusResponse, StopSessionResponse, TranscriptResponse,
};
pub use routes::create_router;
pub use state::{ActiveSession, AppState, SessionSlot};
