// Handler-level tests for the HTTP API
//
// The router is driven through tower's oneshot, with a stub generative
// model behind the grading and question services, so the wire shapes and
// status codes are pinned down without a network.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use oral_grader::config::SessionTimings;
use oral_grader::error::GraderError;
use oral_grader::http::{create_router, AppState};
use oral_grader::llm::{GenerativeModel, StructuredSchema};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tower::util::ServiceExt;

/// Stub model answering the grade and question schemas with canned data
struct StubModel;

#[async_trait::async_trait]
impl GenerativeModel for StubModel {
    async fn generate_structured(
        &self,
        _system: &str,
        _prompt: &str,
        schema: &StructuredSchema,
    ) -> oral_grader::Result<Value> {
        match schema.name {
            "grade_record" => Ok(json!({
                "criterionA": { "score": 3, "feedback": "Solid grounding." },
                "criterionB": { "score": 2, "feedback": "Analysis stays surface level." },
                "criterionC": { "score": 4, "feedback": "Well organised." },
                "criterionD": { "score": 3, "feedback": "Clear register." },
                "totalScore": 12,
                "percentage": 30,
                "overview": "A short but focused response.",
                "strengths": ["Clear structure"],
                "improvements": ["More textual evidence"]
            })),
            "question_list" => Ok(json!({
                "questions": ["How does the text frame the issue?", "What would you add?"]
            })),
            other => Err(GraderError::Upstream(format!("unexpected schema {other}"))),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Model that returns a structurally broken grade
struct BrokenModel;

#[async_trait::async_trait]
impl GenerativeModel for BrokenModel {
    async fn generate_structured(
        &self,
        _system: &str,
        _prompt: &str,
        _schema: &StructuredSchema,
    ) -> oral_grader::Result<Value> {
        Ok(json!({ "totalScore": 99 }))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

fn app() -> Router {
    app_with(Arc::new(StubModel))
}

fn app_with(model: Arc<dyn GenerativeModel>) -> Router {
    let timings = SessionTimings {
        presentation_secs: 600,
        answer_secs: 300,
    };
    create_router(AppState::new(model, timings))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_check_responds_ok() {
    let response = app().oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn grade_returns_the_record_shape() {
    let response = app()
        .oneshot(post_json("/grade", json!({ "transcript": "Short answer." })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalScore"], 12);
    assert_eq!(body["percentage"], 30.0);
    assert_eq!(body["criterionA"]["score"], 3);
    assert!(body["strengths"].is_array());
}

#[tokio::test]
async fn grade_rejects_missing_and_empty_transcripts() {
    let response = app()
        .oneshot(post_json("/grade", json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    let response = app()
        .oneshot(post_json("/grade", json!({ "transcript": "" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn grade_surfaces_schema_violations_as_upstream_errors() {
    let response = app_with(Arc::new(BrokenModel))
        .oneshot(post_json("/grade", json!({ "transcript": "Short answer." })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error processing request");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn questions_returns_the_list_shape() {
    let response = app()
        .oneshot(post_json("/questions", json!({ "transcript": "Short answer." })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let questions = body["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 2);
}

#[tokio::test]
async fn report_without_prior_capture_is_not_found() {
    let response = app().oneshot(get("/report")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No transcript found");
}

#[tokio::test]
async fn recording_flow_hands_the_transcript_to_the_report() {
    let app = app();

    // Start the capture session
    let response = app
        .clone()
        .oneshot(post_empty("/sessions/record/start"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // A second start conflicts with the active session
    let response = app
        .clone()
        .oneshot(post_empty("/sessions/record/start"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The collaborator pushes a finalized segment
    let response = app
        .clone()
        .oneshot(post_json(
            "/sessions/segments",
            json!({ "final": true, "text": "Short answer." }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["accepted"], true);

    // Let the drain task apply the event
    sleep(Duration::from_millis(50)).await;

    let response = app
        .clone()
        .oneshot(get("/sessions/status"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["state"], "recording");
    assert_eq!(status["segment_count"], 1);

    // Stop: the transcript is handed off to the report flow
    let response = app
        .clone()
        .oneshot(post_empty("/sessions/record/stop"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["transcript"], "Short answer.");

    // No session left to query
    let response = app
        .clone()
        .oneshot(get("/sessions/status"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The report grades the handed-off transcript
    let response = app.clone().oneshot(get("/report")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["totalScore"], 12);
    assert_eq!(report["percentage"], 30.0);
    assert_eq!(report["criteria"].as_array().expect("criteria").len(), 4);
    assert_eq!(report["transcriptParagraphs"][0], "Short answer.");

    // The handoff is consumed by a successful report
    let response = app.clone().oneshot(get("/report")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn segments_without_a_session_are_not_found() {
    let response = app()
        .oneshot(post_json(
            "/sessions/segments",
            json!({ "final": true, "text": "orphan" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn questioning_flow_interleaves_and_finishes() {
    let app = app();

    // Capture a presentation first
    app.clone()
        .oneshot(post_empty("/sessions/record/start"))
        .await
        .expect("response");
    app.clone()
        .oneshot(post_json(
            "/sessions/segments",
            json!({ "final": true, "text": "My presentation." }),
        ))
        .await
        .expect("response");
    sleep(Duration::from_millis(50)).await;
    app.clone()
        .oneshot(post_empty("/sessions/record/stop"))
        .await
        .expect("response");

    // Enter the questioning phase
    let response = app
        .clone()
        .oneshot(post_empty("/sessions/questioning/begin"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["question"], "How does the text frame the issue?");
    assert_eq!(body["total"], 2);
    assert_eq!(body["finished"], false);

    // Answer, then advance to the second question
    app.clone()
        .oneshot(post_json(
            "/sessions/segments",
            json!({ "final": true, "text": "Because of the framing. " }),
        ))
        .await
        .expect("response");
    sleep(Duration::from_millis(50)).await;

    let response = app
        .clone()
        .oneshot(post_empty("/sessions/questioning/advance"))
        .await
        .expect("response");
    let body = body_json(response).await;
    assert_eq!(body["question"], "What would you add?");
    assert_eq!(body["finished"], false);

    // Advancing past the last question ends the phase
    let response = app
        .clone()
        .oneshot(post_empty("/sessions/questioning/advance"))
        .await
        .expect("response");
    let body = body_json(response).await;
    assert_eq!(body["question"], Value::Null);
    assert_eq!(body["finished"], true);

    // The interleaved transcript reached the report flow
    let response = app.clone().oneshot(get("/report")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    let paragraphs = report["transcriptParagraphs"]
        .as_array()
        .expect("paragraphs");
    let joined = paragraphs
        .iter()
        .map(|p| p.as_str().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n\n");
    assert!(joined.contains("My presentation."));
    assert!(joined.contains("Teacher: How does the text frame the issue?"));
    assert!(joined.contains("Because of the framing."));
}

#[tokio::test]
async fn questioning_without_a_transcript_is_not_found() {
    let response = app()
        .oneshot(post_empty("/sessions/questioning/begin"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No transcript found");
}
