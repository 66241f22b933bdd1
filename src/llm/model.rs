use crate::error::Result;
use serde_json::Value;

/// A named JSON schema the model's response must satisfy.
#[derive(Debug, Clone)]
pub struct StructuredSchema {
    /// Schema name advertised to the model provider
    pub name: &'static str,
    /// JSON Schema document
    pub schema: Value,
}

/// Generative-model collaborator contract.
///
/// Used identically by the grading and question services with different
/// prompts and schemas. Implementations return the provider's object as
/// parsed JSON; domain validation happens in the calling service. Failures
/// surface as `GraderError::Upstream` and are never retried here.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate an object conforming to `schema` from the given prompts.
    async fn generate_structured(
        &self,
        system: &str,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<Value>;

    /// Model name for logging
    fn name(&self) -> &str;
}
