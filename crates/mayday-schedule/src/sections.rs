//! Splits a response body into its analysis prose and its plan block.

use thiserror::Error;

pub const ANALYSIS_MARKER: &str = "Task Analysis:";
pub const PLAN_MARKER: &str = "Scheduling Plan:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("missing section marker \"Task Analysis:\"")]
    MissingAnalysis,

    #[error("missing section marker \"Scheduling Plan:\"")]
    MissingPlan,

    #[error("missing section markers \"Task Analysis:\" and \"Scheduling Plan:\"")]
    MissingBoth,

    #[error("\"Scheduling Plan:\" appears before \"Task Analysis:\"")]
    OutOfOrder,
}

/// The two parts of a well-formed response, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a> {
    pub analysis: &'a str,
    pub plan: &'a str,
}

/// Locate both markers (exact, case-sensitive, first occurrence) and
/// return the trimmed text between and after them.
pub fn split_sections(body: &str) -> Result<Sections<'_>, SectionError> {
    let analysis_at = body.find(ANALYSIS_MARKER);
    let plan_at = body.find(PLAN_MARKER);

    let (analysis_at, plan_at) = match (analysis_at, plan_at) {
        (Some(a), Some(p)) => (a, p),
        (None, Some(_)) => return Err(SectionError::MissingAnalysis),
        (Some(_), None) => return Err(SectionError::MissingPlan),
        (None, None) => return Err(SectionError::MissingBoth),
    };

    let analysis_end = analysis_at + ANALYSIS_MARKER.len();
    if plan_at < analysis_end {
        return Err(SectionError::OutOfOrder);
    }

    Ok(Sections {
        analysis: body[analysis_end..plan_at].trim(),
        plan: body[plan_at + PLAN_MARKER.len()..].trim(),
    })
}
