use super::capture::CaptureSession;
use crate::error::{GraderError, Result};
use crate::questions::QuestionList;
use tracing::info;

/// The questioning phase: examiner questions interleaved with recorded
/// answers in one growing transcript.
///
/// The session consumes the question list through a single monotonically
/// advancing pointer. Each posed question is appended to the transcript as a
/// `Teacher:` prompt line followed by a `Student:` marker, so the finalized
/// answer segments land in chronological order between them; the resulting
/// interleaved transcript is what gets re-submitted to grading.
pub struct QuestioningSession {
    capture: CaptureSession,
    questions: Vec<String>,
    current: usize,
    begun: bool,
    finished: bool,
}

impl QuestioningSession {
    /// Wrap a capture session with a question list.
    ///
    /// Fails with `InvalidInput` when the list is empty; a session must not
    /// reach the questioning phase without questions to pose.
    pub fn new(capture: CaptureSession, questions: QuestionList) -> Result<Self> {
        if questions.is_empty() {
            return Err(GraderError::InvalidInput);
        }

        Ok(Self {
            capture,
            questions: questions.questions,
            current: 0,
            begun: false,
            finished: false,
        })
    }

    /// Enter the questioning phase: pose the first question, restart the
    /// countdown at the question-phase ceiling, and resume capture.
    pub async fn begin(&mut self) -> Result<String> {
        if self.begun {
            return Err(GraderError::SessionActive);
        }

        info!(
            "Beginning questioning phase ({} questions)",
            self.questions.len()
        );

        self.begun = true;
        self.current = 0;

        // Halt any presentation-phase capture before restarting with the
        // question-phase ceiling.
        self.capture.stop().await?;

        let question = self.questions[0].clone();
        self.capture
            .push_line(format!("\n\nTeacher: {question}\n\nStudent: "))
            .await;

        let answer_secs = self.capture.answer_secs();
        self.capture.start_phase(answer_secs).await?;

        Ok(question)
    }

    /// Advance to the next question.
    ///
    /// At the last index this stops capture and finishes the session;
    /// afterwards further calls are no-ops. Returns the newly posed question,
    /// or `None` once the session is (now) finished.
    pub async fn advance(&mut self) -> Result<Option<String>> {
        if !self.begun {
            return Err(GraderError::NoActiveSession);
        }
        if self.finished {
            return Ok(None);
        }

        if self.current + 1 >= self.questions.len() {
            info!("All questions posed, ending questioning phase");
            self.capture.stop().await?;
            self.finished = true;
            return Ok(None);
        }

        self.current += 1;
        let question = self.questions[self.current].clone();
        self.capture
            .push_line(format!("\nTeacher: {question}\nStudent:"))
            .await;

        Ok(Some(question))
    }

    /// Question currently posed, if the phase has begun and questions remain.
    pub fn current_question(&self) -> Option<&str> {
        if !self.begun || self.finished {
            return None;
        }
        self.questions.get(self.current).map(String::as_str)
    }

    /// Zero-based pointer into the question list.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The underlying capture session.
    pub fn capture(&self) -> &CaptureSession {
        &self.capture
    }

    /// Hand the capture session back once questioning is over.
    pub fn into_capture(self) -> CaptureSession {
        self.capture
    }
}
