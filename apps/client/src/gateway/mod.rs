//! Backend Gateway — the single point of entry for all HireMe backend calls.
//!
//! ARCHITECTURAL RULE: no other module may issue HTTP requests directly.
//! Exactly four request shapes exist — analyze, tailor, download-legacy —
//! and nothing else. One exchange per call: no retries, no streaming, no
//! timeout beyond the transport default.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{AnalysisResult, DownloadFormat, ResumeFile, TailorOutcome};

/// Fixed fallback messages, shown when the backend supplies no detail.
pub const ANALYZE_FALLBACK: &str = "Failed to analyze resume";
pub const TAILOR_FALLBACK: &str = "Failed to tailor resume";
pub const DOWNLOAD_FALLBACK: &str = "Failed to download file";

/// The gateway's operations behind a trait so views can be exercised against
/// mocks without a live backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn analyze(
        &self,
        file: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError>;

    async fn tailor(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailorOutcome, AppError>;

    async fn download(
        &self,
        format: DownloadFormat,
        resume_text: &str,
        filename_stem: &str,
    ) -> Result<Bytes, AppError>;
}

#[derive(Debug, Serialize)]
struct TailorRequest<'a> {
    resume_text: &'a str,
    job_description: &'a str,
    /// Always true: the client requests the backend's fast render path.
    fast: bool,
}

/// HTTP implementation of [`Backend`] against one configured base URL.
pub struct BackendGateway {
    client: Client,
    base_url: String,
}

impl BackendGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for BackendGateway {
    async fn analyze(
        &self,
        file: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("resume", part)
            .text("job_description", job_description.to_string());

        let response = self.client.post(self.url("analyze")).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &body));
        }

        let result: AnalysisResult = parse_success(&body)?;
        if !result.analysis.is_consistent() {
            warn!(
                "analyze returned matched_count {} > total_jd_keywords {}",
                result.analysis.matched_count, result.analysis.total_jd_keywords
            );
        }
        debug!(
            "analyze succeeded: ats_score={}, {} matching / {} missing keywords",
            result.ats_score,
            result.matching_keywords.len(),
            result.missing_keywords.len()
        );
        Ok(result)
    }

    async fn tailor(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailorOutcome, AppError> {
        let request = TailorRequest {
            resume_text,
            job_description,
            fast: true,
        };

        let response = self
            .client
            .post(self.url("tailor_resume_overleaf"))
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &body));
        }

        let outcome: TailorOutcome = parse_success(&body)?;
        debug!(
            "tailor succeeded: ats_after={}, latex={}, pdf={}",
            outcome.ats_after,
            outcome.latex_source.is_some(),
            outcome.pdf_base64.is_some()
        );
        Ok(outcome)
    }

    async fn download(
        &self,
        format: DownloadFormat,
        resume_text: &str,
        filename_stem: &str,
    ) -> Result<Bytes, AppError> {
        let segment = format.legacy_segment().ok_or_else(|| {
            AppError::Validation(
                "PDF downloads are served from the stored payload, not the backend".to_string(),
            )
        })?;

        let form = Form::new()
            .text("resume_text", resume_text.to_string())
            .text("filename", filename_stem.to_string());

        let response = self
            .client
            .post(self.url(&format!("download/{segment}")))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(backend_error(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        debug!("download/{segment} succeeded: {} bytes", bytes.len());
        Ok(bytes)
    }
}

/// Parses a 2xx body against the success contract: a JSON envelope whose
/// `status` field equals `"success"`, with the payload alongside it.
fn parse_success<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::Envelope(format!("response was not JSON: {e}")))?;

    match value.get("status").and_then(Value::as_str) {
        Some("success") => serde_json::from_value(value)
            .map_err(|e| AppError::Envelope(format!("malformed success payload: {e}"))),
        other => Err(AppError::Envelope(format!("envelope status was {other:?}"))),
    }
}

/// Builds the error for a non-2xx response. FastAPI-style bodies carry a
/// `detail` field; anything else leaves the detail empty so the caller's
/// fixed fallback is shown instead.
fn backend_error(status: u16, body: &str) -> AppError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(String::from))
        .unwrap_or_default();
    AppError::Backend { status, detail }
}
