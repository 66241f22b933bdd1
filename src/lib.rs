pub mod config;
pub mod error;
pub mod grading;
pub mod http;
pub mod llm;
pub mod questions;
pub mod report;
pub mod session;
pub mod speech;

pub use config::Config;
pub use error::{GraderError, Result};
pub use grading::{Criterion, CriterionReport, GradeRecord, GradingService};
pub use http::{create_router, AppState};
pub use llm::{GenerativeModel, OpenAiModel, StructuredSchema};
pub use questions::{QuestionList, QuestionService};
pub use report::ReportView;
pub use session::{
    CaptureSession, QuestioningSession, SessionConfig, SessionState, SessionStats, Transcript,
    TranscriptHandoff, TranscriptSegment,
};
pub use speech::{
    recognition_channel, AudioInput, ChannelRecognizer, GrantedAudioInput, RecognitionEvent,
    RecognizerHandle, SpeechRecognizer,
};
