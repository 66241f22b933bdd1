use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single finalized segment received from the speech-recognition collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Transcribed text
    pub text: String,

    /// When this segment was finalized
    pub timestamp: DateTime<Utc>,
}

/// Accumulated transcript of a capture session.
///
/// Finalized segments are append-only: once pushed they are never mutated or
/// removed. The interim buffer holds the recognizer's provisional text and is
/// replaced wholesale on every update; it never becomes part of the
/// finalized text unless the recognizer re-emits it as final.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    segments: Vec<TranscriptSegment>,
    interim: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized segment. Permanent.
    pub fn push_final(&mut self, text: impl Into<String>) {
        self.segments.push(TranscriptSegment {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Replace the interim buffer with the recognizer's latest provisional text.
    pub fn set_interim(&mut self, text: impl Into<String>) {
        self.interim = text.into();
    }

    /// Drop the interim buffer (on stop: only finalized text survives).
    pub fn clear_interim(&mut self) {
        self.interim.clear();
    }

    /// Append a speaker-prompt line (questioning phase interleaving).
    /// The line lands as a finalized segment so it is permanent like any
    /// other transcript text.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.push_final(line);
    }

    /// Concatenation of all finalized segments, in arrival order.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Word count across finalized and interim text (displayed live by the UI).
    pub fn word_count(&self) -> usize {
        let mut text = self.text();
        text.push(' ');
        text.push_str(&self.interim);
        text.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Clear all accumulated text, finalized and interim.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.interim.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_segments_concatenate_in_order() {
        let mut transcript = Transcript::new();
        transcript.push_final("Hello ");
        transcript.push_final("world");
        assert_eq!(transcript.text(), "Hello world");
    }

    #[test]
    fn interim_does_not_mutate_finalized_text() {
        let mut transcript = Transcript::new();
        transcript.push_final("Hello ");
        transcript.push_final("world");
        transcript.set_interim("and more");
        assert_eq!(transcript.text(), "Hello world");
        assert_eq!(transcript.interim(), "and more");

        transcript.set_interim("replaced wholesale");
        assert_eq!(transcript.interim(), "replaced wholesale");
        assert_eq!(transcript.segment_count(), 2);
    }

    #[test]
    fn clear_empties_both_buffers() {
        let mut transcript = Transcript::new();
        transcript.push_final("something");
        transcript.set_interim("pending");
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.interim(), "");
    }

    #[test]
    fn word_count_spans_finalized_and_interim() {
        let mut transcript = Transcript::new();
        transcript.push_final("one two ");
        transcript.set_interim("three");
        assert_eq!(transcript.word_count(), 3);
    }
}
