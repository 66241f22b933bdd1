// Integration tests for the grading service
//
// A stub generative model stands in for the collaborator, so these tests
// pin down the schema validation: any structurally non-conforming response
// is rejected rather than passed through.

use anyhow::Result;
use oral_grader::error::GraderError;
use oral_grader::grading::GradingService;
use oral_grader::llm::{GenerativeModel, StructuredSchema};
use serde_json::{json, Value};
use std::sync::Arc;

/// Model returning a canned response
struct StubModel {
    response: Value,
}

#[async_trait::async_trait]
impl GenerativeModel for StubModel {
    async fn generate_structured(
        &self,
        _system: &str,
        _prompt: &str,
        _schema: &StructuredSchema,
    ) -> oral_grader::Result<Value> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Model that always fails, as a timed-out or erroring collaborator would
struct FailingModel;

#[async_trait::async_trait]
impl GenerativeModel for FailingModel {
    async fn generate_structured(
        &self,
        _system: &str,
        _prompt: &str,
        _schema: &StructuredSchema,
    ) -> oral_grader::Result<Value> {
        Err(GraderError::Upstream("connection timed out".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn service_with(response: Value) -> GradingService {
    GradingService::new(Arc::new(StubModel { response }))
}

fn criterion(score: i64) -> Value {
    json!({ "score": score, "feedback": "Feedback text." })
}

fn valid_response() -> Value {
    json!({
        "criterionA": criterion(3),
        "criterionB": criterion(2),
        "criterionC": criterion(4),
        "criterionD": criterion(3),
        "totalScore": 12,
        "percentage": 30,
        "overview": "A short but focused response.",
        "strengths": ["Clear structure"],
        "improvements": ["More textual evidence"]
    })
}

#[tokio::test]
async fn grade_returns_validated_record() -> Result<()> {
    let service = service_with(valid_response());
    let record = service.grade("Short answer.").await?;

    assert_eq!(record.criterion_a.score, 3);
    assert_eq!(record.criterion_b.score, 2);
    assert_eq!(record.criterion_c.score, 4);
    assert_eq!(record.criterion_d.score, 3);
    assert_eq!(record.total_score, 12);
    assert_eq!(record.percentage, 30.0);
    assert_eq!(record.strengths.len(), 1);
    Ok(())
}

#[tokio::test]
async fn grade_rejects_empty_transcript_without_calling_the_model() {
    let service = service_with(valid_response());

    assert!(matches!(
        service.grade("").await,
        Err(GraderError::InvalidInput)
    ));
    assert!(matches!(
        service.grade("   \n  ").await,
        Err(GraderError::InvalidInput)
    ));
}

#[tokio::test]
async fn grade_rejects_score_out_of_range() {
    let mut response = valid_response();
    response["criterionA"] = criterion(11);
    response["totalScore"] = json!(20);
    response["percentage"] = json!(50);

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_negative_score() {
    let mut response = valid_response();
    response["criterionB"] = criterion(-1);

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_missing_field() {
    let mut response = valid_response();
    response.as_object_mut().unwrap().remove("overview");

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_wrong_type() {
    let mut response = valid_response();
    response["criterionC"] = json!({ "score": "four", "feedback": "Feedback." });

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_fractional_score() {
    let mut response = valid_response();
    response["criterionD"] = json!({ "score": 7.5, "feedback": "Feedback." });

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_total_not_matching_criterion_sum() {
    let mut response = valid_response();
    response["totalScore"] = json!(13);
    response["percentage"] = json!(32.5);

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_rejects_percentage_not_derived_from_total() {
    let mut response = valid_response();
    response["percentage"] = json!(31);

    let service = service_with(response);
    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}

#[tokio::test]
async fn grade_propagates_collaborator_failure() {
    let service = GradingService::new(Arc::new(FailingModel));

    assert!(matches!(
        service.grade("Some transcript.").await,
        Err(GraderError::Upstream(_))
    ));
}
