//! File-download plumbing for the results view.
//!
//! Two-path policy: the compiled PDF is served from the payload already held
//! in the session (zero extra round-trips); only txt/docx regenerate through
//! the backend. Downloads never mutate the stored result, so repeating one
//! yields an equivalent payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;

use crate::errors::AppError;
use crate::gateway::Backend;
use crate::models::tailored::DOWNLOAD_FILENAME_STEM;
use crate::models::{DownloadFormat, PdfPayload, TailoredResult};

/// What the saver receives. The two cases carry the decode/no-decode contract
/// explicitly rather than as a string-prefix check at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    /// Already navigable as-is; nothing was allocated, nothing to release.
    Href(String),
    /// Locally decoded or fetched bytes. Passed to the saver by value and
    /// dropped once the save completes — the ownership window is the call.
    Bytes(Vec<u8>),
}

/// Sink for a prepared download. The host environment decides what "save"
/// means (trigger a browser save, write to disk in tests).
pub trait FileSaver {
    fn save(&mut self, filename: &str, source: DownloadSource) -> Result<(), AppError>;
}

/// Resolves the stored PDF payload into a save source. A data URL passes
/// through untouched; raw base64 is decoded into an owned buffer.
pub fn pdf_download_source(payload: &PdfPayload) -> Result<DownloadSource, AppError> {
    match payload {
        PdfPayload::DataUrl(url) => Ok(DownloadSource::Href(url.clone())),
        PdfPayload::RawBase64(b64) => Ok(DownloadSource::Bytes(BASE64.decode(b64)?)),
    }
}

/// Executes a download for the stored tailored result.
///
/// PDF requires a stored payload; txt/docx require the stored LaTeX source
/// and a backend round-trip. Both preconditions are local validation
/// failures, not network errors.
pub async fn download(
    format: DownloadFormat,
    tailored: &TailoredResult,
    backend: &dyn Backend,
    saver: &mut dyn FileSaver,
) -> Result<(), AppError> {
    match format {
        DownloadFormat::Pdf => {
            let payload = tailored.pdf.as_ref().ok_or_else(|| {
                AppError::Validation("No compiled PDF is available for this result".to_string())
            })?;
            let source = pdf_download_source(payload)?;
            debug!("saving pdf from stored payload as {}", tailored.filename);
            saver.save(&tailored.filename, source)
        }
        DownloadFormat::Txt | DownloadFormat::Docx => {
            let resume_text = tailored.tailored_resume.as_deref().ok_or_else(|| {
                AppError::Validation("No tailored resume text is available".to_string())
            })?;
            let bytes = backend
                .download(format, resume_text, DOWNLOAD_FILENAME_STEM)
                .await?;
            let filename = format!("{DOWNLOAD_FILENAME_STEM}.{}", format.extension());
            debug!("saving {} ({} bytes)", filename, bytes.len());
            saver.save(&filename, DownloadSource::Bytes(bytes.to_vec()))
        }
    }
}
