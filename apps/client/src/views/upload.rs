//! Upload form state — file acceptance, job-description validation, and the
//! analyze submission. Validation failures are local and pre-flight: no
//! network call is attempted until both inputs pass.

use tracing::debug;

use crate::gateway::{Backend, ANALYZE_FALLBACK};
use crate::models::ResumeFile;
use crate::session::Session;
use crate::workflow::Stage;

/// MIME types the file input accepts. A lowercased `.txt` filename is also
/// accepted as a fallback for browsers that report no or a wrong MIME type.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "text/plain",
];

pub const REJECTED_FILE_MESSAGE: &str = "Please upload a PDF, Word document, or text file";
pub const MISSING_FILE_MESSAGE: &str = "Please upload a resume file";
pub const MISSING_JOB_DESCRIPTION_MESSAGE: &str = "Please enter a job description";

/// Acceptance predicate for an uploaded file.
pub fn is_accepted_file(name: &str, content_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&content_type) || name.to_lowercase().ends_with(".txt")
}

#[derive(Debug, Default)]
pub struct UploadForm {
    resume_file: Option<ResumeFile>,
    job_description: String,
    error: Option<String>,
    loading: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the acceptance predicate. A rejected file clears any
    /// previously accepted one and sets the fixed message; the rest of the
    /// form state is untouched.
    pub fn set_file(&mut self, file: ResumeFile) {
        if is_accepted_file(&file.name, &file.content_type) {
            self.resume_file = Some(file);
            self.error = None;
        } else {
            self.resume_file = None;
            self.error = Some(REJECTED_FILE_MESSAGE.to_string());
        }
    }

    pub fn clear_file(&mut self) {
        self.resume_file = None;
    }

    pub fn resume_file(&self) -> Option<&ResumeFile> {
        self.resume_file.as_ref()
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submits the analyze request. Returns the stage to navigate to on
    /// success (`Results`), `None` otherwise.
    ///
    /// A submit while a request is in flight is a no-op — the busy flag is
    /// the only duplicate-submission guard. The flag is cleared on every
    /// completion path.
    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        session: &mut Session,
    ) -> Option<Stage> {
        if self.loading {
            debug!("analyze already in flight; submit ignored");
            return None;
        }

        let Some(file) = self.resume_file.clone() else {
            self.error = Some(MISSING_FILE_MESSAGE.to_string());
            return None;
        };
        if self.job_description.trim().is_empty() {
            self.error = Some(MISSING_JOB_DESCRIPTION_MESSAGE.to_string());
            return None;
        }

        self.loading = true;
        self.error = None;

        let result = backend.analyze(&file, &self.job_description).await;
        self.loading = false;

        match result {
            Ok(analysis) => {
                session.record_analysis(analysis, self.job_description.clone());
                Some(Stage::Results)
            }
            Err(e) => {
                self.error = Some(e.user_message(ANALYZE_FALLBACK));
                None
            }
        }
    }
}
