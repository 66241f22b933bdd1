use crate::error::{GraderError, Result};
use serde::{Deserialize, Serialize};

/// Marks available per criterion
pub const MAX_CRITERION_SCORE: u8 = 10;

/// Marks available across all four criteria
pub const MAX_TOTAL_SCORE: u8 = 40;

/// The four assessment criteria of the oral rubric.
///
/// A closed enum: criterion lookups go through named record fields, never
/// through string-built keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    KnowledgeAndUnderstanding,
    AnalysisAndEvaluation,
    FocusAndOrganization,
    Language,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::KnowledgeAndUnderstanding,
        Criterion::AnalysisAndEvaluation,
        Criterion::FocusAndOrganization,
        Criterion::Language,
    ];

    /// Display title, as the report panels show it
    pub fn title(&self) -> &'static str {
        match self {
            Criterion::KnowledgeAndUnderstanding => "Knowledge, Understanding and Interpretation",
            Criterion::AnalysisAndEvaluation => "Analysis and Evaluation",
            Criterion::FocusAndOrganization => "Focus and Organization",
            Criterion::Language => "Language",
        }
    }

    /// What the criterion evaluates
    pub fn description(&self) -> &'static str {
        match self {
            Criterion::KnowledgeAndUnderstanding => {
                "Evaluates the candidate's knowledge and understanding of the extracts and texts, \
                 and their ability to draw conclusions related to the global issue."
            }
            Criterion::AnalysisAndEvaluation => {
                "Assesses how well the candidate analyzes and evaluates the ways in which \
                 authorial choices present the global issue."
            }
            Criterion::FocusAndOrganization => {
                "Evaluates the structure, balance, and focus of the oral presentation, as well \
                 as the cohesive connection of ideas."
            }
            Criterion::Language => {
                "Assesses the clarity, accuracy, and effectiveness of language use, including \
                 vocabulary, syntax, and style."
            }
        }
    }
}

/// Score and feedback for a single criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionReport {
    /// Marks awarded, 0-10
    pub score: u8,

    /// Examiner feedback for this criterion
    pub feedback: String,
}

/// A complete validated grade for one transcript.
///
/// Wire shape matches the grading endpoint contract (`criterionA` ..
/// `criterionD`, `totalScore`, `percentage`). Immutable after creation; the
/// report view owns it for the lifetime of one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub criterion_a: CriterionReport,
    pub criterion_b: CriterionReport,
    pub criterion_c: CriterionReport,
    pub criterion_d: CriterionReport,

    /// Sum of the four criterion scores, 0-40
    pub total_score: u8,

    /// `totalScore / 40 * 100`
    pub percentage: f64,

    /// Overall assessment summary
    pub overview: String,

    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl GradeRecord {
    /// Look up the sub-record for a criterion.
    pub fn criterion(&self, criterion: Criterion) -> &CriterionReport {
        match criterion {
            Criterion::KnowledgeAndUnderstanding => &self.criterion_a,
            Criterion::AnalysisAndEvaluation => &self.criterion_b,
            Criterion::FocusAndOrganization => &self.criterion_c,
            Criterion::Language => &self.criterion_d,
        }
    }

    /// Check the scoring invariants.
    ///
    /// Rejects any record whose scores fall outside 0-10, whose total is not
    /// the sum of the criterion scores, or whose percentage deviates from
    /// `totalScore / 40 * 100`. Every reachable percentage is a multiple of
    /// 2.5 and exactly representable, so the comparison needs no rounding;
    /// the epsilon only absorbs serialization noise.
    pub fn validate(&self) -> Result<()> {
        let mut sum: u32 = 0;
        for criterion in Criterion::ALL {
            let report = self.criterion(criterion);
            if report.score > MAX_CRITERION_SCORE {
                return Err(GraderError::Upstream(format!(
                    "criterion '{}' score {} is out of range 0-{}",
                    criterion.title(),
                    report.score,
                    MAX_CRITERION_SCORE
                )));
            }
            sum += u32::from(report.score);
        }

        if u32::from(self.total_score) != sum {
            return Err(GraderError::Upstream(format!(
                "total score {} does not equal the criterion sum {}",
                self.total_score, sum
            )));
        }

        let expected = f64::from(self.total_score) / f64::from(MAX_TOTAL_SCORE) * 100.0;
        if (self.percentage - expected).abs() > 1e-6 {
            return Err(GraderError::Upstream(format!(
                "percentage {} does not equal {} for total score {}",
                self.percentage, expected, self.total_score
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: u8) -> CriterionReport {
        CriterionReport {
            score,
            feedback: "feedback".to_string(),
        }
    }

    fn record(scores: [u8; 4], total: u8, percentage: f64) -> GradeRecord {
        GradeRecord {
            criterion_a: report(scores[0]),
            criterion_b: report(scores[1]),
            criterion_c: report(scores[2]),
            criterion_d: report(scores[3]),
            total_score: total,
            percentage,
            overview: "overview".to_string(),
            strengths: vec!["strength".to_string()],
            improvements: vec!["improvement".to_string()],
        }
    }

    #[test]
    fn accepts_consistent_record() {
        assert!(record([3, 2, 4, 3], 12, 30.0).validate().is_ok());
        assert!(record([10, 10, 10, 10], 40, 100.0).validate().is_ok());
        assert!(record([0, 0, 0, 0], 0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_score_out_of_range() {
        let result = record([11, 2, 4, 3], 20, 50.0).validate();
        assert!(matches!(result, Err(GraderError::Upstream(_))));
    }

    #[test]
    fn rejects_total_not_matching_sum() {
        let result = record([3, 2, 4, 3], 13, 32.5).validate();
        assert!(matches!(result, Err(GraderError::Upstream(_))));
    }

    #[test]
    fn rejects_percentage_not_matching_total() {
        let result = record([3, 2, 4, 3], 12, 31.0).validate();
        assert!(matches!(result, Err(GraderError::Upstream(_))));
    }

    #[test]
    fn criterion_lookup_uses_fixed_fields() {
        let record = record([1, 2, 3, 4], 10, 25.0);
        assert_eq!(record.criterion(Criterion::KnowledgeAndUnderstanding).score, 1);
        assert_eq!(record.criterion(Criterion::Language).score, 4);
    }
}
