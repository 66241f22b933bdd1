//! Rubric-based grading
//!
//! This module owns the transcript-to-structured-grade pipeline:
//! - `GradeRecord` / `CriterionReport` - the validated grade shape
//! - `Criterion` - closed enum over the four rubric criteria
//! - `GradingService` - embeds a transcript in the fixed rubric prompt,
//!   drives the generative-model collaborator, and rejects any response
//!   that does not satisfy the schema and scoring invariants

mod record;
mod service;

pub use record::{Criterion, CriterionReport, GradeRecord, MAX_CRITERION_SCORE, MAX_TOTAL_SCORE};
pub use service::GradingService;
