//! Report assembly
//!
//! Pure consumer of a `GradeRecord`: builds the display-ready shape the
//! report page renders - four criterion panels with rubric bands, the
//! aggregate score bar, strengths/improvements lists, and the original
//! transcript reformatted into paragraphs. No failure modes of its own.

use crate::grading::{Criterion, CriterionReport, GradeRecord, MAX_CRITERION_SCORE, MAX_TOTAL_SCORE};
use serde::Serialize;

/// Score bands of the rubric, lowest to highest
pub const SCORE_RANGES: [&str; 6] = ["0", "1-2", "3-4", "5-6", "7-8", "9-10"];

/// Band bucket a score falls into.
pub fn score_range(score: u8) -> &'static str {
    let index = usize::from((score.min(MAX_CRITERION_SCORE) + 1) / 2);
    SCORE_RANGES[index]
}

/// Rubric descriptor for each band of a criterion, lowest to highest.
pub fn rubric_bands(criterion: Criterion) -> [&'static str; 6] {
    match criterion {
        Criterion::KnowledgeAndUnderstanding => [
            "The work does not reach a standard described by the descriptors below.",
            "There is little knowledge and understanding of the extracts and the works/texts in relation to the global issue. References to the extracts and to the works/texts are infrequent or are rarely appropriate.",
            "There is some knowledge and understanding of the extracts and the works/texts in relation to the global issue. References to the extracts and to the works/texts are at times appropriate.",
            "There is satisfactory knowledge and understanding of the extracts and the works/texts and an interpretation of their implications in relation to the global issue. References to the extracts and to the works/texts are generally relevant and mostly support the candidate's ideas.",
            "There is good knowledge and understanding of the extracts and the works/texts and a sustained interpretation of their implications in relation to the global issue. References to the extracts and to the works/texts are relevant and support the candidate's ideas.",
            "There is excellent knowledge and understanding of the extracts and of the works/texts and a persuasive interpretation of their implications in relation to the global issue. References to the extracts and to the works/texts are well chosen and effectively support the candidate's ideas.",
        ],
        Criterion::AnalysisAndEvaluation => [
            "The work does not reach a standard described by the descriptors below.",
            "There is little analysis or evaluation of the ways in which authorial choices present the global issue. References to the extracts and to the works/texts are infrequent or are rarely appropriate.",
            "There is some analysis or evaluation of the ways in which authorial choices present the global issue. References to the extracts and to the works/texts are at times appropriate.",
            "There is satisfactory analysis and evaluation of the ways in which authorial choices present the global issue. References to the extracts and to the works/texts are generally relevant and mostly support the candidate's ideas.",
            "There is good analysis and evaluation of the ways in which authorial choices present the global issue. References to the extracts and to the works/texts are relevant and support the candidate's ideas.",
            "There is excellent analysis and evaluation of the ways in which authorial choices present the global issue. References to the extracts and to the works/texts are well chosen and effectively support the candidate's ideas.",
        ],
        Criterion::FocusAndOrganization => [
            "The work does not reach a standard described by the descriptors below.",
            "The oral rarely focuses on the task. There are few connections between ideas.",
            "The oral only sometimes focuses on the task, and treatment of the extracts, and of the works/texts may be unbalanced. There are some connections between ideas, but these are not always coherent.",
            "The oral maintains a focus on the task, despite some lapses; treatment of the extracts and works/texts is mostly balanced. The development of ideas is mostly logical; ideas are generally connected in a cohesive manner.",
            "The oral maintains a mostly clear and sustained focus on the task; treatment of the extracts and works/texts is balanced. The development of ideas is logical; ideas are cohesively connected in an effective manner.",
            "The oral maintains a clear and sustained focus on the task; treatment of the extracts and works/texts is well balanced. The development of ideas is logical and convincing; ideas are connected in a cogent manner.",
        ],
        Criterion::Language => [
            "The work does not reach a standard described by the descriptors below.",
            "The language is rarely clear or accurate; errors often hinder communication. Vocabulary and syntax are imprecise and frequently inaccurate. Elements of style (for example, register, tone and rhetorical devices) are inappropriate to the task and detract from the oral.",
            "The language is generally clear; errors sometimes hinder communication. Vocabulary and syntax are often imprecise with inaccuracies. Elements of style (for example, register, tone and rhetorical devices) are often inappropriate to the task and detract from the oral.",
            "The language is clear; errors do not hinder communication. Vocabulary and syntax are appropriate to the task but simple and repetitive. Elements of style (for example, register, tone and rhetorical devices) are appropriate to the task and neither enhance nor detract from the oral.",
            "The language is clear and accurate; occasional errors do not hinder communication. Vocabulary and syntax are appropriate and varied. Elements of style (for example, register, tone and rhetorical devices) are appropriate to the task and somewhat enhance the oral.",
            "The language is clear, accurate and varied; occasional errors do not hinder communication. Vocabulary and syntax are varied and create effect. Elements of style (for example, register, tone and rhetorical devices) are appropriate to the task and enhance the oral.",
        ],
    }
}

/// Transcript text reformatted into paragraphs split on blank-line
/// boundaries.
pub fn paragraphs(transcript: &str) -> Vec<String> {
    transcript
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// One criterion panel of the report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionPanel {
    pub title: &'static str,
    pub description: &'static str,
    pub score: u8,
    pub max_score: u8,
    pub score_range: &'static str,
    pub feedback: String,
    pub rubric_bands: [&'static str; 6],
}

impl CriterionPanel {
    fn new(criterion: Criterion, report: &CriterionReport) -> Self {
        Self {
            title: criterion.title(),
            description: criterion.description(),
            score: report.score,
            max_score: MAX_CRITERION_SCORE,
            score_range: score_range(report.score),
            feedback: report.feedback.clone(),
            rubric_bands: rubric_bands(criterion),
        }
    }
}

/// Display-ready report for one graded transcript
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub total_score: u8,
    pub max_total_score: u8,
    pub percentage: f64,
    pub overview: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub criteria: Vec<CriterionPanel>,
    pub transcript_paragraphs: Vec<String>,
}

impl ReportView {
    /// Assemble the report from a validated grade record and the transcript
    /// it was produced from.
    pub fn new(record: &GradeRecord, transcript: &str) -> Self {
        let criteria = Criterion::ALL
            .iter()
            .map(|&criterion| CriterionPanel::new(criterion, record.criterion(criterion)))
            .collect();

        Self {
            total_score: record.total_score,
            max_total_score: MAX_TOTAL_SCORE,
            percentage: record.percentage,
            overview: record.overview.clone(),
            strengths: record.strengths.clone(),
            improvements: record.improvements.clone(),
            criteria,
            transcript_paragraphs: paragraphs(transcript),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_ranges_follow_rubric_bands() {
        assert_eq!(score_range(0), "0");
        assert_eq!(score_range(1), "1-2");
        assert_eq!(score_range(2), "1-2");
        assert_eq!(score_range(3), "3-4");
        assert_eq!(score_range(6), "5-6");
        assert_eq!(score_range(7), "7-8");
        assert_eq!(score_range(10), "9-10");
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "First paragraph.\n\nSecond paragraph\nstill second.\n\n\n\nThird.";
        assert_eq!(
            paragraphs(text),
            vec![
                "First paragraph.".to_string(),
                "Second paragraph\nstill second.".to_string(),
                "Third.".to_string(),
            ]
        );
    }

    #[test]
    fn paragraphs_of_empty_text_is_empty() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n  \n\n").is_empty());
    }
}
