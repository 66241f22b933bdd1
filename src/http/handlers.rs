use super::state::{ActiveSession, AppState, SessionSlot};
use crate::error::GraderError;
use crate::grading::GradeRecord;
use crate::questions::QuestionList;
use crate::report::ReportView;
use crate::session::{CaptureSession, QuestioningSession, SessionStats};
use crate::speech::{recognition_channel, GrantedAudioInput, RecognitionEvent};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    /// Finalized transcript to grade
    pub transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    /// Finalized transcript to derive questions from
    pub transcript: Option<String>,
}

/// A `(isFinal, text)` tuple relayed from the speech-recognition
/// collaborator, or its error event.
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    #[serde(rename = "final", default)]
    pub is_final: bool,

    #[serde(default)]
    pub text: String,

    /// Recognition error reported by the collaborator
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub stats: SessionStats,
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    /// False when the session stopped before the event arrived
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub session_id: String,

    #[serde(flatten)]
    pub stats: SessionStats,

    pub last_error: Option<String>,

    /// Present while the questioning phase is active
    pub questioning: Option<QuestioningStatus>,
}

#[derive(Debug, Serialize)]
pub struct QuestioningStatus {
    pub current_index: usize,
    pub question_count: usize,
    pub current_question: Option<String>,
    pub finished: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
    pub interim: String,
}

#[derive(Debug, Serialize)]
pub struct QuestioningStepResponse {
    /// The question now posed, absent once the phase has finished
    pub question: Option<String>,
    pub index: usize,
    pub total: usize,
    pub finished: bool,
}

// ============================================================================
// Grading / Question Handlers
// ============================================================================

/// POST /grade
/// Grade a finalized transcript against the rubric
pub async fn grade(
    State(state): State<AppState>,
    Json(req): Json<GradeRequest>,
) -> Result<Json<GradeRecord>, GraderError> {
    let transcript = req.transcript.ok_or(GraderError::InvalidInput)?;
    let record = state.grading.grade(&transcript).await?;
    Ok(Json(record))
}

/// POST /questions
/// Generate follow-up questions for a finalized transcript
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionList>, GraderError> {
    let transcript = req.transcript.ok_or(GraderError::InvalidInput)?;
    let list = state.questions.generate_questions(&transcript).await?;
    Ok(Json(list))
}

// ============================================================================
// Session Handlers
// ============================================================================

/// POST /sessions/record/start
/// Start the presentation capture session
pub async fn start_session(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GraderError> {
    let mut slot = state.slot.lock().await;
    if slot.is_some() {
        return Err(GraderError::SessionActive);
    }

    let config = state.session_config();
    let session_id = config.session_id.clone();

    info!("Starting capture for session: {}", session_id);

    let (handle, recognizer) = recognition_channel(config.event_buffer);
    let capture = CaptureSession::new(config, Arc::new(GrantedAudioInput), Box::new(recognizer));

    capture.start().await?;

    *slot = Some(SessionSlot {
        session: ActiveSession::Capture(capture),
        handle,
    });

    info!("Capture started successfully for session: {}", session_id);

    Ok((
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "recording".to_string(),
            message: format!("Recording started for session {session_id}"),
        }),
    ))
}

/// POST /sessions/record/stop
/// Stop the active session and hand its transcript to the report flow
pub async fn stop_session(
    State(state): State<AppState>,
) -> Result<Json<StopSessionResponse>, GraderError> {
    let taken = state
        .slot
        .lock()
        .await
        .take()
        .ok_or(GraderError::NoActiveSession)?;

    let capture = match taken.session {
        ActiveSession::Capture(capture) => capture,
        ActiveSession::Questioning(questioning) => questioning.into_capture(),
    };

    info!("Stopping capture for session: {}", capture.session_id());

    let stats = capture.stop().await?;
    let transcript = capture.transcript_text().await;
    state.handoff.deposit(transcript.clone()).await;

    Ok(Json(StopSessionResponse {
        session_id: capture.session_id().to_string(),
        status: "stopped".to_string(),
        stats,
        transcript,
    }))
}

/// POST /sessions/segments
/// Push a recognition event from the speech collaborator
pub async fn push_segment(
    State(state): State<AppState>,
    Json(req): Json<SegmentRequest>,
) -> Result<Json<SegmentResponse>, GraderError> {
    let slot = state.slot.lock().await;
    let slot = slot.as_ref().ok_or(GraderError::NoActiveSession)?;

    let event = match req.error {
        Some(reason) => RecognitionEvent::Error(reason),
        None if req.is_final => RecognitionEvent::Final(req.text),
        None => RecognitionEvent::Interim(req.text),
    };

    let accepted = slot.handle.push(event).await;

    Ok(Json(SegmentResponse { accepted }))
}

/// GET /sessions/status
/// Status of the active session
pub async fn session_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, GraderError> {
    let slot = state.slot.lock().await;
    let slot = slot.as_ref().ok_or(GraderError::NoActiveSession)?;

    let capture = slot.session.capture();
    let stats = capture.stats().await;
    let last_error = capture.last_error().await;

    let questioning = match &slot.session {
        ActiveSession::Questioning(questioning) => Some(QuestioningStatus {
            current_index: questioning.current_index(),
            question_count: questioning.question_count(),
            current_question: questioning.current_question().map(str::to_string),
            finished: questioning.is_finished(),
        }),
        ActiveSession::Capture(_) => None,
    };

    Ok(Json(StatusResponse {
        session_id: capture.session_id().to_string(),
        stats,
        last_error,
        questioning,
    }))
}

/// GET /sessions/transcript
/// Accumulated transcript of the active session
pub async fn session_transcript(
    State(state): State<AppState>,
) -> Result<Json<TranscriptResponse>, GraderError> {
    let slot = state.slot.lock().await;
    let slot = slot.as_ref().ok_or(GraderError::NoActiveSession)?;

    let capture = slot.session.capture();

    Ok(Json(TranscriptResponse {
        transcript: capture.transcript_text().await,
        interim: capture.interim_text().await,
    }))
}

// ============================================================================
// Questioning Handlers
// ============================================================================

/// POST /sessions/questioning/begin
/// Generate questions from the captured transcript and enter the
/// questioning phase
pub async fn begin_questioning(
    State(state): State<AppState>,
) -> Result<Json<QuestioningStepResponse>, GraderError> {
    let mut slot = state.slot.lock().await;
    if slot.is_some() {
        return Err(GraderError::SessionActive);
    }

    let transcript = state
        .handoff
        .peek()
        .await
        .ok_or(GraderError::NoTranscriptFound)?;

    let questions = state.questions.generate_questions(&transcript).await?;
    let total = questions.len();

    let config = state.session_config();
    let session_id = config.session_id.clone();

    info!(
        "Beginning questioning for session {} ({} questions)",
        session_id, total
    );

    let (handle, recognizer) = recognition_channel(config.event_buffer);
    let capture = CaptureSession::new(config, Arc::new(GrantedAudioInput), Box::new(recognizer));
    capture.seed_transcript(transcript).await;

    let mut questioning = QuestioningSession::new(capture, questions)?;
    let first = questioning.begin().await?;

    *slot = Some(SessionSlot {
        session: ActiveSession::Questioning(questioning),
        handle,
    });

    Ok(Json(QuestioningStepResponse {
        question: Some(first),
        index: 0,
        total,
        finished: false,
    }))
}

/// POST /sessions/questioning/advance
/// Pose the next question, or end the phase after the last one
pub async fn advance_questioning(
    State(state): State<AppState>,
) -> Result<Json<QuestioningStepResponse>, GraderError> {
    let mut guard = state.slot.lock().await;
    let slot = guard.as_mut().ok_or(GraderError::NoActiveSession)?;

    let questioning = match &mut slot.session {
        ActiveSession::Questioning(questioning) => questioning,
        ActiveSession::Capture(_) => return Err(GraderError::NoActiveSession),
    };

    if let Some(question) = questioning.advance().await? {
        return Ok(Json(QuestioningStepResponse {
            question: Some(question),
            index: questioning.current_index(),
            total: questioning.question_count(),
            finished: false,
        }));
    }

    // Last question answered: hand the interleaved transcript to the
    // report flow and release the slot.
    let index = questioning.current_index();
    let total = questioning.question_count();
    let transcript = questioning.capture().transcript_text().await;
    state.handoff.deposit(transcript).await;
    *guard = None;

    Ok(Json(QuestioningStepResponse {
        question: None,
        index,
        total,
        finished: true,
    }))
}

// ============================================================================
// Report Handler
// ============================================================================

/// GET /report
/// Grade the handed-off transcript and assemble the report view
pub async fn report(State(state): State<AppState>) -> Result<Json<ReportView>, GraderError> {
    let transcript = state
        .handoff
        .peek()
        .await
        .ok_or(GraderError::NoTranscriptFound)?;

    let record = state.grading.grade(&transcript).await?;

    // Consume the handoff only once grading succeeded, so a failed
    // request leaves the transcript available for a retry.
    let _ = state.handoff.take().await;

    Ok(Json(ReportView::new(&record, &transcript)))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
