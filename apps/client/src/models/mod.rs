pub mod analysis;
pub mod tailored;

pub use analysis::{AnalysisResult, KeywordAnalysis};
pub use tailored::{DownloadFormat, PdfPayload, TailorOutcome, TailoredResult};

/// An uploaded résumé file as the browser hands it over: name, reported MIME
/// type, and the raw bytes. Nothing is read from disk by this crate.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
