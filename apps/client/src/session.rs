//! Ephemeral client state for one browsing session.
//!
//! Everything here lives in memory only and vanishes on reload — there is no
//! persistence layer. Views borrow from the session; nothing outside it owns
//! or mutates the stored results.

use crate::models::{AnalysisResult, TailoredResult};

#[derive(Debug, Default)]
pub struct Session {
    api_key: Option<String>,
    resume_text: String,
    job_description: String,
    analysis: Option<AnalysisResult>,
    tailored: Option<TailoredResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the credential as given — it is never validated client-side.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The `Upload` gate: a credential counts only when non-empty.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Records a completed analysis along with the inputs that produced it.
    /// The extracted text comes back from the backend so tailoring can
    /// re-submit it without a second upload.
    ///
    /// A re-analysis replaces the previous result wholesale. Any earlier
    /// tailored result is left in place, matching back-navigation semantics:
    /// downstream state survives until the session resets.
    pub fn record_analysis(&mut self, result: AnalysisResult, job_description: impl Into<String>) {
        self.resume_text = result.resume_text.clone();
        self.job_description = job_description.into();
        self.analysis = Some(result);
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn record_tailored(&mut self, result: TailoredResult) {
        self.tailored = Some(result);
    }

    pub fn tailored(&self) -> Option<&TailoredResult> {
        self.tailored.as_ref()
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Drops every entity. The only way any of them is destroyed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
