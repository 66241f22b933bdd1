use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Failure taxonomy shared across the capture, grading, and question flows.
///
/// Every failure is terminal for the request that produced it; nothing in
/// this service retries internally. The HTTP layer maps each variant to a
/// status code and the caller decides whether to re-record or re-submit.
#[derive(Debug, Error)]
pub enum GraderError {
    /// The audio-input collaborator refused microphone access.
    #[error("Microphone access required")]
    PermissionDenied,

    /// The speech-recognition collaborator is unavailable.
    #[error("Speech recognition is not supported in this environment")]
    UnsupportedEnvironment,

    /// An empty or missing transcript was submitted to a request.
    #[error("Invalid transcript provided")]
    InvalidInput,

    /// The generative-model collaborator errored, timed out, or returned
    /// data that does not satisfy the expected schema.
    #[error("Error processing request: {0}")]
    Upstream(String),

    /// The report flow was entered without a prior capture.
    #[error("No transcript found")]
    NoTranscriptFound,

    /// A capture session is already active.
    #[error("A recording session is already active")]
    SessionActive,

    /// No capture session is active.
    #[error("No active recording session")]
    NoActiveSession,
}

impl GraderError {
    /// HTTP status the variant surfaces as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GraderError::PermissionDenied => StatusCode::FORBIDDEN,
            GraderError::UnsupportedEnvironment => StatusCode::NOT_IMPLEMENTED,
            GraderError::InvalidInput => StatusCode::BAD_REQUEST,
            GraderError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GraderError::NoTranscriptFound => StatusCode::NOT_FOUND,
            GraderError::SessionActive => StatusCode::CONFLICT,
            GraderError::NoActiveSession => StatusCode::NOT_FOUND,
        }
    }

    /// Whether the user can recover by re-recording or retrying navigation.
    pub fn is_user_actionable(&self) -> bool {
        !matches!(self, GraderError::UnsupportedEnvironment)
    }
}

impl IntoResponse for GraderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            // Upstream failures surface a generic message plus diagnostic
            // detail, matching the endpoint contract.
            GraderError::Upstream(details) => serde_json::json!({
                "error": "Error processing request",
                "details": details,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GraderError>;
