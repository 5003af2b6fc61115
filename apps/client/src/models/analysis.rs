use serde::{Deserialize, Serialize};

/// Match counts reported by the backend's keyword scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub matched_count: u32,
    pub total_jd_keywords: u32,
}

impl KeywordAnalysis {
    /// Holds when the backend's scorer is consistent. The client displays
    /// whatever comes back either way; the gateway logs a warning on
    /// violation.
    pub fn is_consistent(&self) -> bool {
        self.matched_count <= self.total_jd_keywords
    }
}

/// Result of the backend `analyze` call. Field names mirror the wire format;
/// the struct deserializes straight from the success envelope.
///
/// Immutable once stored in the session; a re-analysis replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0–100 percentage of JD keywords found in the résumé.
    pub ats_score: f64,
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub analysis: KeywordAnalysis,
    /// Plain text the backend extracted from the uploaded file. Carried here
    /// so tailoring can re-submit it without re-uploading.
    pub resume_text: String,
}

impl AnalysisResult {
    /// Headline score, e.g. `62%`.
    pub fn score_display(&self) -> String {
        format!("{}%", self.ats_score)
    }

    /// Match summary line, e.g. `31 of 50 keywords matched`.
    pub fn match_summary(&self) -> String {
        format!(
            "{} of {} keywords matched",
            self.analysis.matched_count, self.analysis.total_jd_keywords
        )
    }
}
