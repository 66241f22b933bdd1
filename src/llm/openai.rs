use super::model::{GenerativeModel, StructuredSchema};
use crate::error::{GraderError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_MODEL: &str = "gpt-4o";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat-completions client constrained to structured (JSON schema) output.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load the API key from `OPENAI_API_KEY`, the model name from
    /// `OPENAI_MODEL_NAME` (defaulting to `gpt-4o`).
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            GraderError::Upstream("OPENAI_API_KEY not found in environment".to_string())
        })?;
        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Per-request timeout for the round-trip to the provider.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(BASE_URL)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|err| GraderError::Upstream(format!("model request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .map(|wrapper| wrapper.error.message)
                .unwrap_or(body_text);
            warn!("Model request rejected ({}): {}", status, message);
            return Err(GraderError::Upstream(format!("{status}: {message}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| GraderError::Upstream(format!("failed to parse response: {err}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GraderError::Upstream("model returned no content".to_string()))
    }
}

#[async_trait::async_trait]
impl GenerativeModel for OpenAiModel {
    async fn generate_structured(
        &self,
        system: &str,
        prompt: &str,
        schema: &StructuredSchema,
    ) -> Result<Value> {
        info!("Requesting structured completion: {}", schema.name);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema.name,
                    strict: true,
                    schema: &schema.schema,
                },
            },
        };

        let content = self.send_request(&request).await?;

        serde_json::from_str(&content)
            .map_err(|err| GraderError::Upstream(format!("response is not valid JSON: {err}")))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
