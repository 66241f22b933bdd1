use super::record::GradeRecord;
use crate::error::{GraderError, Result};
use crate::llm::{GenerativeModel, StructuredSchema};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Grades a finalized transcript against the fixed four-criterion rubric.
///
/// The rubric lives in the system prompt; the collaborator's response is
/// constrained to the grade schema and then checked against the scoring
/// invariants. No retry is performed here; the caller decides whether to
/// re-submit.
pub struct GradingService {
    model: Arc<dyn GenerativeModel>,
}

impl GradingService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Grade a transcript. Fails with `InvalidInput` on empty/blank text and
    /// `Upstream` on any collaborator or schema failure.
    pub async fn grade(&self, transcript: &str) -> Result<GradeRecord> {
        if transcript.trim().is_empty() {
            return Err(GraderError::InvalidInput);
        }

        info!("Grading transcript ({} chars)", transcript.len());

        let schema = grade_schema();
        let value = self
            .model
            .generate_structured(
                &grading_prompt(transcript),
                "Please grade this IB English Oral presentation transcript.",
                &schema,
            )
            .await?;

        let record: GradeRecord = serde_json::from_value(value).map_err(|err| {
            GraderError::Upstream(format!("response does not match the grade schema: {err}"))
        })?;

        record.validate()?;

        info!(
            "Graded transcript: total={} percentage={}",
            record.total_score, record.percentage
        );

        Ok(record)
    }
}

/// System prompt embedding the transcript in the grading rubric.
fn grading_prompt(transcript: &str) -> String {
    format!(
        r#"
You are an expert IB English examiner. Analyze the following Individual Oral presentation transcript based on the official IB rubric:

<Transcript>
{transcript}
</Transcript>

Evaluate the presentation based on these criteria from the IB rubric:

Criterion A: Knowledge, understanding, and interpretation (10 marks)
- Demonstrate knowledge and understanding of the work(s)
- Offer interpretations that are coherent and supported by the work(s)

Criterion B: Analysis and evaluation (10 marks)
- Analyze and evaluate how the author uses stylistic and structural features to shape meaning
- Support claims with well-chosen examples

Criterion C: Focus and organization (10 marks)
- Sustain focused and developed ideas
- Logical structure with coherent progression

Criterion D: Language (10 marks)
- Clear, varied, and precise language
- Appropriate register and style for academic discourse

Provide:
1. Numerical scores for each criterion (0-10)
2. Percentage equivalent of total score
3. Detailed feedback for each criterion
4. Overall strengths and areas for improvement
5. Final total score out of 40

Use UK English spelling and academic tone.
"#
    )
}

/// JSON schema for the grade response
fn grade_schema() -> StructuredSchema {
    let criterion = json!({
        "type": "object",
        "properties": {
            "score": { "type": "integer", "minimum": 0, "maximum": 10 },
            "feedback": { "type": "string" }
        },
        "required": ["score", "feedback"],
        "additionalProperties": false
    });

    StructuredSchema {
        name: "grade_record",
        schema: json!({
            "type": "object",
            "properties": {
                "criterionA": criterion.clone(),
                "criterionB": criterion.clone(),
                "criterionC": criterion.clone(),
                "criterionD": criterion,
                "totalScore": { "type": "integer", "minimum": 0, "maximum": 40 },
                "percentage": { "type": "number", "minimum": 0, "maximum": 100 },
                "overview": { "type": "string" },
                "strengths": { "type": "array", "items": { "type": "string" } },
                "improvements": { "type": "array", "items": { "type": "string" } }
            },
            "required": [
                "criterionA", "criterionB", "criterionC", "criterionD",
                "totalScore", "percentage", "overview", "strengths", "improvements"
            ],
            "additionalProperties": false
        }),
    }
}
