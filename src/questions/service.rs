use crate::error::{GraderError, Result};
use crate::llm::{GenerativeModel, StructuredSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Ordered follow-up questions for the questioning phase.
///
/// The prompt asks for 10-12 questions, but that cardinality is a request to
/// the collaborator, not a schema bound; only the list-of-text shape and
/// non-emptiness are enforced (the questioning phase needs at least one
/// question to pose).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<String>,
}

impl QuestionList {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Generates examiner questions from a finalized transcript.
pub struct QuestionService {
    model: Arc<dyn GenerativeModel>,
}

impl QuestionService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Generate follow-up questions. Fails with `InvalidInput` on
    /// empty/blank text and `Upstream` on collaborator or schema failure.
    pub async fn generate_questions(&self, transcript: &str) -> Result<QuestionList> {
        if transcript.trim().is_empty() {
            return Err(GraderError::InvalidInput);
        }

        info!("Generating questions for transcript ({} chars)", transcript.len());

        let schema = question_schema();
        let value = self
            .model
            .generate_structured(
                &question_prompt(transcript),
                "Please respond to this IB English Oral presentation transcript with questions.",
                &schema,
            )
            .await?;

        let list: QuestionList = serde_json::from_value(value).map_err(|err| {
            GraderError::Upstream(format!("response does not match the question schema: {err}"))
        })?;

        if list.is_empty() {
            return Err(GraderError::Upstream(
                "model returned an empty question list".to_string(),
            ));
        }

        info!("Generated {} questions", list.len());

        Ok(list)
    }
}

/// System prompt for the question segment.
fn question_prompt(transcript: &str) -> String {
    format!(
        r#"
You are an expert IB English examiner conducting the question segment of an Individual Oral (IO) assessment.
<Transcript>
{transcript}
</Transcript>
The student has just completed their 10-minute presentation, where they analyzed a global issue through a literary text and a non-literary text. Now, they have 5 minutes to answer follow-up questions.

Your role is to generate a set of thought-provoking and engaging questions that will allow the student to further explore and articulate their ideas.

Your questions should:
- Encourage deeper discussion and critical thinking.
- Expand on key ideas that could benefit from further analysis.
- Align with the IB IO assessment rubric, ensuring all major criteria are explored: knowledge, understanding and interpretation; analysis and evaluation; focus and organization; language.
- Be open-ended and encourage reflection, rather than simple yes/no answers.

Each question should naturally prompt the student to elaborate, helping them:
- Strengthen their interpretation of the texts.
- Provide more evidence and reasoning.
- Discuss authorial choices in greater depth.
- Clarify connections between the texts and the global issue.

Generate 10-12 well-crafted questions, ensuring they cover all key areas of the rubric, encourage a balanced discussion, and are framed in a way that allows the student to fully express their understanding.

Use UK English spelling and maintain an academic yet conversational tone. Make the questions sound natural and human-like.
"#
    )
}

/// JSON schema for the question response
fn question_schema() -> StructuredSchema {
    StructuredSchema {
        name: "question_list",
        schema: json!({
            "type": "object",
            "properties": {
                "questions": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["questions"],
            "additionalProperties": false
        }),
    }
}
