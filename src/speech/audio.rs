use crate::error::Result;

/// Audio-input collaborator.
///
/// Capture asks for microphone access before recognition starts and fails
/// with `PermissionDenied` when the collaborator refuses. The granted stream
/// itself only feeds the waveform visualizer, which is outside this service,
/// so the seam carries no payload.
#[async_trait::async_trait]
pub trait AudioInput: Send + Sync {
    /// Acquire microphone access, or fail with `GraderError::PermissionDenied`.
    async fn request_access(&self) -> Result<()>;

    /// Collaborator name for logging
    fn name(&self) -> &str;
}

/// Audio input whose access was already granted by the hosting browser
/// before any segment reaches this service.
pub struct GrantedAudioInput;

#[async_trait::async_trait]
impl AudioInput for GrantedAudioInput {
    async fn request_access(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "granted"
    }
}
