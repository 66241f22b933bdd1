//! Collaborator seams for live speech capture
//!
//! The browser owns the microphone and the speech-to-text engine; this
//! module defines the contracts the session state machine consumes:
//! - `AudioInput` - microphone access acquisition (PermissionDenied surface)
//! - `SpeechRecognizer` - start/stop control plus a typed event stream of
//!   finalized/interim segments
//! - `ChannelRecognizer` - production implementation fed by the HTTP layer,
//!   which relays the browser's `(isFinal, text)` tuples

mod audio;
mod recognizer;

pub use audio::{AudioInput, GrantedAudioInput};
pub use recognizer::{
    recognition_channel, ChannelRecognizer, RecognitionEvent, RecognizerHandle, SpeechRecognizer,
    UnavailableRecognizer,
};
