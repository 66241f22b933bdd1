use super::config::SessionConfig;
use super::countdown::{format_mm_ss, Countdown};
use super::stats::{SessionState, SessionStats};
use super::transcript::Transcript;
use crate::error::{GraderError, Result};
use crate::speech::{AudioInput, RecognitionEvent, SpeechRecognizer};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A capture session that accumulates live speech into a transcript.
///
/// State machine: `Idle -> Recording -> Idle`. While recording, a drain task
/// applies recognition events in arrival order and ticks the one-second
/// countdown; when the countdown elapses the session stops itself and no
/// further segments are accepted until `start()` is called again.
pub struct CaptureSession {
    /// Session configuration
    config: SessionConfig,

    /// Audio-input collaborator (microphone access)
    audio: Arc<dyn AudioInput>,

    /// Speech-recognition collaborator
    recognizer: Arc<Mutex<Box<dyn SpeechRecognizer>>>,

    /// When the session was created
    started_at: chrono::DateTime<chrono::Utc>,

    /// Whether capture is currently active
    is_recording: Arc<AtomicBool>,

    /// Seconds remaining in the current phase
    countdown: Countdown,

    /// Accumulated transcript (finalized segments + interim buffer)
    transcript: Arc<Mutex<Transcript>>,

    /// Last recognition error, if any
    last_error: Arc<Mutex<Option<String>>>,

    /// Handle for the event drain task
    drain_task_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl CaptureSession {
    /// Create a new capture session around the two collaborators.
    pub fn new(
        config: SessionConfig,
        audio: Arc<dyn AudioInput>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> Self {
        info!("Creating capture session: {}", config.session_id);

        let presentation_secs = config.presentation_secs;
        Self {
            config,
            audio,
            recognizer: Arc::new(Mutex::new(recognizer)),
            started_at: Utc::now(),
            is_recording: Arc::new(AtomicBool::new(false)),
            countdown: Countdown::new(presentation_secs),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            last_error: Arc::new(Mutex::new(None)),
            drain_task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the presentation capture phase.
    pub async fn start(&self) -> Result<()> {
        self.start_phase(self.config.presentation_secs).await
    }

    /// Start a capture phase with the given countdown ceiling.
    ///
    /// Fails with `PermissionDenied` when the audio-input collaborator
    /// refuses access and `UnsupportedEnvironment` when no recognition
    /// engine is available. Starting while already recording is a no-op.
    pub(crate) async fn start_phase(&self, ceiling_secs: u64) -> Result<()> {
        if self.is_recording.load(Ordering::SeqCst) {
            warn!("Recording already started");
            return Ok(());
        }

        info!("Starting capture session: {}", self.config.session_id);

        self.audio.request_access().await?;

        let mut events = {
            let mut recognizer = self.recognizer.lock().await;
            recognizer.start().await?
        };

        self.countdown.reset(ceiling_secs);
        *self.last_error.lock().await = None;
        self.is_recording.store(true, Ordering::SeqCst);

        // Spawn the event drain task
        let is_recording = Arc::clone(&self.is_recording);
        let transcript = Arc::clone(&self.transcript);
        let recognizer = Arc::clone(&self.recognizer);
        let last_error = Arc::clone(&self.last_error);
        let countdown = self.countdown.clone();
        let session_id = self.config.session_id.clone();

        let drain_task = tokio::spawn(async move {
            info!("Capture drain task started");

            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it so the
            // countdown decrements once per elapsed second.
            ticker.tick().await;

            loop {
                if !is_recording.load(Ordering::SeqCst) {
                    break;
                }

                tokio::select! {
                    _ = ticker.tick() => {
                        if countdown.tick() == 0 {
                            info!("Countdown elapsed, stopping capture: {}", session_id);
                            is_recording.store(false, Ordering::SeqCst);
                            recognizer.lock().await.stop().await;
                            transcript.lock().await.clear_interim();
                            break;
                        }
                    }
                    event = events.recv() => {
                        match event {
                            Some(RecognitionEvent::Final(text)) => {
                                transcript.lock().await.push_final(text);
                            }
                            Some(RecognitionEvent::Interim(text)) => {
                                transcript.lock().await.set_interim(text);
                            }
                            Some(RecognitionEvent::Error(reason)) => {
                                error!("Speech recognition error: {}", reason);
                                *last_error.lock().await = Some(reason);
                                is_recording.store(false, Ordering::SeqCst);
                                recognizer.lock().await.stop().await;
                                transcript.lock().await.clear_interim();
                                break;
                            }
                            None => {
                                // Recognizer released; nothing more to drain
                                break;
                            }
                        }
                    }
                }
            }

            info!("Capture drain task stopped");
        });

        {
            let mut handle = self.drain_task_handle.lock().await;
            *handle = Some(drain_task);
        }

        info!("Capture session started successfully");

        Ok(())
    }

    /// Stop capturing. Idempotent.
    ///
    /// Halts accumulation, cancels the countdown tick, releases the
    /// recognizer, and discards the interim buffer; only finalized segments
    /// survive into the transcript.
    pub async fn stop(&self) -> Result<SessionStats> {
        if !self.is_recording.swap(false, Ordering::SeqCst) {
            warn!("Recording not active");
            return Ok(self.stats().await);
        }

        info!("Stopping capture session: {}", self.config.session_id);

        self.recognizer.lock().await.stop().await;
        self.transcript.lock().await.clear_interim();

        // Wait for the drain task to finish
        {
            let mut handle = self.drain_task_handle.lock().await;
            if let Some(task) = handle.take() {
                if let Err(e) = task.await {
                    error!("Capture drain task panicked: {}", e);
                }
            }
        }

        info!("Capture session stopped successfully");

        Ok(self.stats().await)
    }

    /// Clear all accumulated text and return to the phase ceiling.
    ///
    /// Only valid while idle; fails with `SessionActive` during recording.
    pub async fn reset(&self) -> Result<()> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(GraderError::SessionActive);
        }

        self.transcript.lock().await.clear();
        self.countdown.reset(self.config.presentation_secs);
        *self.last_error.lock().await = None;

        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.is_recording.load(Ordering::SeqCst) {
            SessionState::Recording
        } else {
            SessionState::Idle
        }
    }

    /// Seconds left on the phase countdown.
    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub(crate) fn answer_secs(&self) -> u64 {
        self.config.answer_secs
    }

    /// Concatenated finalized transcript text.
    pub async fn transcript_text(&self) -> String {
        self.transcript.lock().await.text()
    }

    /// Latest interim (provisional) text.
    pub async fn interim_text(&self) -> String {
        self.transcript.lock().await.interim().to_string()
    }

    /// Append a formatted speaker-prompt line (questioning phase).
    pub(crate) async fn push_line(&self, line: String) {
        self.transcript.lock().await.push_line(line);
    }

    /// Preload the transcript with text carried over from a previous phase.
    pub async fn seed_transcript(&self, text: String) {
        self.transcript.lock().await.push_final(text);
    }

    /// Last recognition error reported by the collaborator, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// Get current session statistics
    pub async fn stats(&self) -> SessionStats {
        let (segment_count, word_count) = {
            let transcript = self.transcript.lock().await;
            (transcript.segment_count(), transcript.word_count())
        };

        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            state: self.state(),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            remaining_secs: self.countdown.remaining_secs(),
            time_display: format_mm_ss(self.countdown.remaining_secs()),
            segment_count,
            word_count,
        }
    }
}
