use serde::{Deserialize, Serialize};

/// Default name offered for the compiled PDF when the backend omits one.
pub const DEFAULT_PDF_FILENAME: &str = "tailored_resume.pdf";

/// Filename stem sent with legacy downloads and used for saved txt/docx files.
pub const DOWNLOAD_FILENAME_STEM: &str = "tailored_resume";

/// Compiled-PDF payload as returned by the backend. The two encodings carry
/// different download semantics: a data URL is navigable as-is, raw base64
/// must be decoded into bytes before it can be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfPayload {
    DataUrl(String),
    RawBase64(String),
}

impl PdfPayload {
    /// Classifies a backend `pdf_base64` string once, at parse time. Empty
    /// strings mean no PDF was produced.
    pub fn classify(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else if raw.starts_with("data:") {
            Some(PdfPayload::DataUrl(raw))
        } else {
            Some(PdfPayload::RawBase64(raw))
        }
    }
}

/// File formats the user can ask for from the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Pdf,
    Txt,
    Docx,
}

impl DownloadFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DownloadFormat::Pdf => "pdf",
            DownloadFormat::Txt => "txt",
            DownloadFormat::Docx => "docx",
        }
    }

    /// Path segment for the legacy `/download/{format}` endpoint. PDF is
    /// served from the stored payload and never re-requested.
    pub fn legacy_segment(&self) -> Option<&'static str> {
        match self {
            DownloadFormat::Pdf => None,
            DownloadFormat::Txt => Some("txt"),
            DownloadFormat::Docx => Some("docx"),
        }
    }
}

/// Success payload of `POST /tailor_resume_overleaf`, as it appears on the
/// wire. The gateway hands this to callers untouched; `TailoredResult`
/// applies the renames and derivations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailorOutcome {
    pub ats_after: f64,
    pub latex_source: Option<String>,
    pub pdf_base64: Option<String>,
    pub filename: Option<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    pub page_count: Option<u32>,
}

/// Result of a completed tailor call, as held in the session.
///
/// `improvement()` is a pure function of the new score and the baseline
/// captured when tailoring was requested — it is never supplied by the
/// backend and never stored.
#[derive(Debug, Clone)]
pub struct TailoredResult {
    pub new_ats_score: f64,
    /// `AnalysisResult.ats_score` at the moment the tailor call was issued.
    pub baseline_ats_score: f64,
    /// LaTeX source, display/copy only. May be absent in a degraded success.
    pub tailored_resume: Option<String>,
    /// Compiled PDF. May be absent in a degraded success.
    pub pdf: Option<PdfPayload>,
    pub filename: String,
    /// Keywords still missing after tailoring, per the backend.
    pub missing_keywords: Vec<String>,
    pub page_count: Option<u32>,
}

impl TailoredResult {
    pub fn from_outcome(outcome: TailorOutcome, baseline_ats_score: f64) -> Self {
        Self {
            new_ats_score: outcome.ats_after,
            baseline_ats_score,
            tailored_resume: outcome.latex_source.filter(|s| !s.is_empty()),
            pdf: outcome.pdf_base64.and_then(PdfPayload::classify),
            filename: outcome
                .filename
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_PDF_FILENAME.to_string()),
            missing_keywords: outcome.missing_keywords,
            page_count: outcome.page_count,
        }
    }

    /// Signed score delta against the pre-tailoring analysis.
    pub fn improvement(&self) -> f64 {
        self.new_ats_score - self.baseline_ats_score
    }

    pub fn has_latex(&self) -> bool {
        self.tailored_resume.is_some()
    }

    pub fn has_pdf(&self) -> bool {
        self.pdf.is_some()
    }

    /// False when the backend succeeded but one of the expected artifacts is
    /// missing — the warnable, still-stored state.
    pub fn is_complete(&self) -> bool {
        self.has_latex() && self.has_pdf()
    }
}
