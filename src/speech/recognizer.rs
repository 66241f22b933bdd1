use crate::error::{GraderError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// A typed recognition event emitted by the speech-to-text collaborator.
///
/// Events are applied in the order they are received: finalized text is
/// appended permanently, interim text replaces the previous interim buffer,
/// and an error force-stops the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// A finalized segment; immutable once appended to the transcript.
    Final(String),
    /// A provisional segment; replaces the prior interim buffer wholesale.
    Interim(String),
    /// The recognizer failed; the session records the reason and stops.
    Error(String),
}

/// Speech-recognition collaborator control surface.
///
/// `start` hands back the channel receiver the session drains; `stop`
/// releases the recognizer so no further events are delivered.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Start recognition and return the event stream.
    ///
    /// Fails with `GraderError::UnsupportedEnvironment` when no recognition
    /// engine is available.
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Stop recognition. Events pushed after this point are dropped.
    async fn stop(&mut self);

    /// Whether recognition is currently active
    fn is_listening(&self) -> bool;

    /// Recognizer name for logging
    fn name(&self) -> &str;
}

type SharedSender = Arc<Mutex<Option<mpsc::Sender<RecognitionEvent>>>>;

/// Create a linked handle/recognizer pair.
///
/// The `RecognizerHandle` side is held by whatever relays the browser
/// collaborator's output (the HTTP segments endpoint); the
/// `ChannelRecognizer` side is owned by the capture session.
pub fn recognition_channel(capacity: usize) -> (RecognizerHandle, ChannelRecognizer) {
    let shared: SharedSender = Arc::new(Mutex::new(None));
    (
        RecognizerHandle {
            sender: Arc::clone(&shared),
        },
        ChannelRecognizer {
            sender: shared,
            capacity,
            listening: false,
        },
    )
}

/// Producer half: pushes recognition events into the active capture session.
#[derive(Clone)]
pub struct RecognizerHandle {
    sender: SharedSender,
}

impl RecognizerHandle {
    /// Push an event from the collaborator.
    ///
    /// Returns `false` when no capture session is listening (stopped or not
    /// yet started); such events are dropped, matching the session contract
    /// that segments are not accepted outside `Recording`.
    pub async fn push(&self, event: RecognitionEvent) -> bool {
        let sender = { self.sender.lock().await.clone() };
        match sender {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }
}

/// Channel-backed recognizer implementation.
///
/// Each `start` opens a fresh event channel and publishes its sender to the
/// linked handle; `stop` withdraws the sender so later pushes are rejected.
pub struct ChannelRecognizer {
    sender: SharedSender,
    capacity: usize,
    listening: bool,
}

#[async_trait::async_trait]
impl SpeechRecognizer for ChannelRecognizer {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        let (tx, rx) = mpsc::channel(self.capacity);
        *self.sender.lock().await = Some(tx);
        self.listening = true;
        Ok(rx)
    }

    async fn stop(&mut self) {
        *self.sender.lock().await = None;
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn name(&self) -> &str {
        "channel"
    }
}

/// Recognizer standing in for an environment without a speech engine.
pub struct UnavailableRecognizer;

#[async_trait::async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        Err(GraderError::UnsupportedEnvironment)
    }

    async fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
