//! Results view state — tailoring, per-section expand/collapse toggles, the
//! LaTeX modal with its copy-to-clipboard side effect, and download
//! orchestration.

use tracing::debug;

use crate::download::{download, FileSaver};
use crate::errors::AppError;
use crate::gateway::{Backend, DOWNLOAD_FALLBACK, TAILOR_FALLBACK};
use crate::models::{DownloadFormat, TailoredResult};
use crate::session::Session;

/// Non-blocking alert shown when tailoring succeeded but an expected
/// artifact is missing. The partial result is stored regardless.
pub const PARTIAL_RESULT_WARNING: &str =
    "Generation succeeded but missing PDF or LaTeX. Please retry.";

/// Clipboard seam for the LaTeX modal's copy button. Write failures are a
/// soft failure: swallowed, never surfaced to the user.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct ResultsView {
    expanded_original: bool,
    expanded_tailored: bool,
    latex_open: bool,
    loading: bool,
    error: Option<String>,
    warning: Option<String>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    // Each section toggles on its own flag; flipping one never touches the
    // other.

    pub fn toggle_original(&mut self) {
        self.expanded_original = !self.expanded_original;
    }

    pub fn toggle_tailored(&mut self) {
        self.expanded_tailored = !self.expanded_tailored;
    }

    pub fn is_original_expanded(&self) -> bool {
        self.expanded_original
    }

    pub fn is_tailored_expanded(&self) -> bool {
        self.expanded_tailored
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Runs the tailor call against the session's stored analysis inputs.
    /// On success the result is recorded (even when partial) and the
    /// tailored section auto-expands.
    pub async fn tailor(&mut self, backend: &dyn Backend, session: &mut Session) {
        if self.loading {
            debug!("tailor already in flight; ignored");
            return;
        }
        // The Results gate guarantees an analysis; without one there is
        // nothing to tailor against.
        let Some(baseline) = session.analysis().map(|a| a.ats_score) else {
            return;
        };
        let resume_text = session.resume_text().to_string();
        let job_description = session.job_description().to_string();

        self.loading = true;
        self.error = None;

        let result = backend.tailor(&resume_text, &job_description).await;
        self.loading = false;

        match result {
            Ok(outcome) => {
                let tailored = TailoredResult::from_outcome(outcome, baseline);
                if !tailored.is_complete() {
                    self.warning = Some(PARTIAL_RESULT_WARNING.to_string());
                }
                session.record_tailored(tailored);
                self.expanded_tailored = true;
            }
            Err(e) => {
                self.error = Some(e.user_message(TAILOR_FALLBACK));
            }
        }
    }

    /// The `View LaTeX` control is enabled only when a non-empty source is
    /// stored.
    pub fn can_view_latex(&self, session: &Session) -> bool {
        session.tailored().map(TailoredResult::has_latex).unwrap_or(false)
    }

    pub fn open_latex(&mut self, session: &Session) {
        if self.can_view_latex(session) {
            self.latex_open = true;
        }
    }

    pub fn close_latex(&mut self) {
        self.latex_open = false;
    }

    pub fn is_latex_open(&self) -> bool {
        self.latex_open
    }

    /// Copies the stored LaTeX source. Clipboard-permission failures are
    /// swallowed — no user-visible error, by contract.
    pub fn copy_latex(&self, session: &Session, clipboard: &mut dyn Clipboard) {
        let Some(latex) = session.tailored().and_then(|t| t.tailored_resume.as_deref()) else {
            return;
        };
        if let Err(e) = clipboard.write_text(latex) {
            debug!("clipboard write failed (ignored): {e}");
        }
    }

    /// Triggers a download for the stored tailored result. Failures surface
    /// the fixed generic message; the stored result is never mutated.
    ///
    /// Downloads share the view's busy flag: the txt/docx path is a backend
    /// round-trip, so the triggering control is disabled while one is in
    /// flight, the same as `tailor`.
    pub async fn download(
        &mut self,
        format: DownloadFormat,
        session: &Session,
        backend: &dyn Backend,
        saver: &mut dyn FileSaver,
    ) {
        if self.loading {
            debug!("download already in flight; ignored");
            return;
        }
        let Some(tailored) = session.tailored() else {
            return;
        };

        self.loading = true;
        let result = download(format, tailored, backend, saver).await;
        self.loading = false;

        if let Err(e) = result {
            debug!("download failed: {e}");
            self.error = Some(DOWNLOAD_FALLBACK.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadSource;
    use crate::models::{AnalysisResult, KeywordAnalysis, ResumeFile, TailorOutcome};
    use async_trait::async_trait;
    use bytes::Bytes;

    struct MockBackend {
        tailor_response: Result<TailorOutcome, AppError>,
        download_response: Result<Bytes, AppError>,
    }

    impl MockBackend {
        fn tailoring(response: Result<TailorOutcome, AppError>) -> Self {
            Self {
                tailor_response: response,
                download_response: Ok(Bytes::from_static(b"bytes")),
            }
        }

        fn failing_download() -> Self {
            Self {
                tailor_response: Err(AppError::Envelope("unused".to_string())),
                download_response: Err(AppError::Backend {
                    status: 500,
                    detail: "Download failed: conversion error".to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn analyze(
            &self,
            _file: &ResumeFile,
            _job_description: &str,
        ) -> Result<AnalysisResult, AppError> {
            panic!("analyze must not be called from the results view")
        }

        async fn tailor(
            &self,
            _resume_text: &str,
            _job_description: &str,
        ) -> Result<TailorOutcome, AppError> {
            clone_result(&self.tailor_response)
        }

        async fn download(
            &self,
            _format: DownloadFormat,
            _resume_text: &str,
            _filename_stem: &str,
        ) -> Result<Bytes, AppError> {
            match &self.download_response {
                Ok(bytes) => Ok(bytes.clone()),
                Err(AppError::Backend { status, detail }) => Err(AppError::Backend {
                    status: *status,
                    detail: detail.clone(),
                }),
                Err(_) => Err(AppError::Envelope("mock".to_string())),
            }
        }
    }

    fn clone_result(
        result: &Result<TailorOutcome, AppError>,
    ) -> Result<TailorOutcome, AppError> {
        match result {
            Ok(outcome) => Ok(outcome.clone()),
            Err(AppError::Backend { status, detail }) => Err(AppError::Backend {
                status: *status,
                detail: detail.clone(),
            }),
            Err(_) => Err(AppError::Envelope("mock".to_string())),
        }
    }

    struct NullSaver;

    impl FileSaver for NullSaver {
        fn save(&mut self, _filename: &str, _source: DownloadSource) -> Result<(), AppError> {
            Ok(())
        }
    }

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), AppError> {
            Err(AppError::Validation("clipboard permission denied".to_string()))
        }
    }

    struct RecordingClipboard {
        copied: Option<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), AppError> {
            self.copied = Some(text.to_string());
            Ok(())
        }
    }

    fn session_with_analysis() -> Session {
        let mut session = Session::new();
        session.set_api_key("key");
        session.record_analysis(
            AnalysisResult {
                ats_score: 62.0,
                matching_keywords: vec![],
                missing_keywords: vec![],
                analysis: KeywordAnalysis {
                    matched_count: 31,
                    total_jd_keywords: 50,
                },
                resume_text: "extracted".to_string(),
            },
            "jd",
        );
        session
    }

    fn outcome(latex: Option<&str>, pdf: Option<&str>) -> TailorOutcome {
        TailorOutcome {
            ats_after: 78.5,
            latex_source: latex.map(String::from),
            pdf_base64: pdf.map(String::from),
            filename: None,
            missing_keywords: vec!["terraform".to_string()],
            page_count: Some(1),
        }
    }

    #[test]
    fn test_section_toggles_are_independent() {
        let mut view = ResultsView::new();
        view.toggle_original();
        assert!(view.is_original_expanded());
        assert!(!view.is_tailored_expanded());

        view.toggle_tailored();
        view.toggle_original();
        assert!(!view.is_original_expanded());
        assert!(view.is_tailored_expanded());
    }

    #[tokio::test]
    async fn test_tailor_stores_result_and_expands_section() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        let backend = MockBackend::tailoring(Ok(outcome(
            Some("\\documentclass"),
            Some("data:application/pdf;base64,AAAA"),
        )));

        view.tailor(&backend, &mut session).await;

        let tailored = session.tailored().unwrap();
        assert_eq!(tailored.new_ats_score, 78.5);
        assert_eq!(tailored.improvement(), 78.5 - 62.0);
        assert!(view.is_tailored_expanded());
        assert!(view.warning().is_none());
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_partial_tailor_warns_but_still_stores() {
        // Missing PDF: result accepted, warning raised, LaTeX control
        // enabled, PDF controls reflect absence.
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        let backend = MockBackend::tailoring(Ok(outcome(Some("\\documentclass"), None)));

        view.tailor(&backend, &mut session).await;

        assert_eq!(view.warning(), Some(PARTIAL_RESULT_WARNING));
        let tailored = session.tailored().unwrap();
        assert!(tailored.has_latex());
        assert!(!tailored.has_pdf());
        assert!(view.can_view_latex(&session));
    }

    #[tokio::test]
    async fn test_tailor_error_surfaces_backend_detail() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        let backend = MockBackend::tailoring(Err(AppError::Backend {
            status: 400,
            detail: "API key not set".to_string(),
        }));

        view.tailor(&backend, &mut session).await;

        assert_eq!(view.error(), Some("API key not set"));
        assert!(session.tailored().is_none());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_latex_modal_requires_stored_source() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();

        view.open_latex(&session);
        assert!(!view.is_latex_open());

        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass"), None),
            62.0,
        ));
        view.open_latex(&session);
        assert!(view.is_latex_open());
        view.close_latex();
        assert!(!view.is_latex_open());
    }

    #[test]
    fn test_copy_latex_reaches_clipboard() {
        let view = ResultsView::new();
        let mut session = session_with_analysis();
        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass{article}"), None),
            62.0,
        ));

        let mut clipboard = RecordingClipboard { copied: None };
        view.copy_latex(&session, &mut clipboard);
        assert_eq!(clipboard.copied.as_deref(), Some("\\documentclass{article}"));
    }

    #[test]
    fn test_clipboard_failure_is_silent() {
        let view = ResultsView::new();
        let mut session = session_with_analysis();
        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass"), None),
            62.0,
        ));

        view.copy_latex(&session, &mut FailingClipboard);
        // Soft failure: nothing surfaced anywhere.
    }

    /// Backend whose download never resolves, for busy-flag inspection.
    struct StalledBackend;

    #[async_trait]
    impl Backend for StalledBackend {
        async fn analyze(
            &self,
            _file: &ResumeFile,
            _job_description: &str,
        ) -> Result<AnalysisResult, AppError> {
            panic!("analyze must not be called from the results view")
        }

        async fn tailor(
            &self,
            _resume_text: &str,
            _job_description: &str,
        ) -> Result<TailorOutcome, AppError> {
            std::future::pending().await
        }

        async fn download(
            &self,
            _format: DownloadFormat,
            _resume_text: &str,
            _filename_stem: &str,
        ) -> Result<Bytes, AppError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_marks_view_busy_while_in_flight() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass"), None),
            62.0,
        ));

        let backend = StalledBackend;
        let mut saver = NullSaver;
        let in_flight = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            view.download(DownloadFormat::Txt, &session, &backend, &mut saver),
        )
        .await;
        assert!(in_flight.is_err(), "download should still be in flight");

        // The request never completed, so the triggering control stays
        // disabled — same contract as tailor.
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn test_download_clears_busy_flag_on_both_paths() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass"), Some("data:application/pdf;base64,AAAA")),
            62.0,
        ));
        let mut saver = NullSaver;

        // Success path (stored-payload pdf, no round-trip).
        let backend = MockBackend::failing_download();
        view.download(DownloadFormat::Pdf, &session, &backend, &mut saver)
            .await;
        assert!(!view.is_loading());
        assert!(view.error().is_none());

        // Failure path (txt round-trip rejected by the backend).
        view.download(DownloadFormat::Txt, &session, &backend, &mut saver)
            .await;
        assert!(!view.is_loading());
        assert_eq!(view.error(), Some(DOWNLOAD_FALLBACK));
    }

    #[tokio::test]
    async fn test_download_failure_shows_generic_message() {
        let mut view = ResultsView::new();
        let mut session = session_with_analysis();
        session.record_tailored(TailoredResult::from_outcome(
            outcome(Some("\\documentclass"), None),
            62.0,
        ));

        let backend = MockBackend::failing_download();
        let mut saver = NullSaver;
        view.download(DownloadFormat::Txt, &session, &backend, &mut saver)
            .await;

        // Always the fixed message, never the backend detail.
        assert_eq!(view.error(), Some(DOWNLOAD_FALLBACK));
    }

    #[tokio::test]
    async fn test_download_without_tailored_result_is_a_noop() {
        let mut view = ResultsView::new();
        let session = session_with_analysis();
        let backend = MockBackend::failing_download();
        let mut saver = NullSaver;

        view.download(DownloadFormat::Pdf, &session, &backend, &mut saver)
            .await;
        assert!(view.error().is_none());
    }
}
