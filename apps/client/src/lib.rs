//! HireMe client core — session state, workflow gating, and the HTTP gateway
//! to the résumé-optimization backend.
//!
//! The crate is a library: the hosting shell owns rendering and routing
//! mechanics, and plugs in through three seams — [`gateway::Backend`] for
//! HTTP, [`views::Clipboard`] for copy, and [`download::FileSaver`] for file
//! saves. Everything the user accumulates during a visit lives in
//! [`session::Session`] and vanishes with it.

pub mod config;
pub mod download;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod session;
pub mod views;
pub mod workflow;

pub use config::Config;
pub use errors::AppError;
pub use gateway::{Backend, BackendGateway};
pub use models::{AnalysisResult, DownloadFormat, PdfPayload, ResumeFile, TailoredResult};
pub use session::Session;
pub use views::{ResultsView, UploadForm};
pub use workflow::{current_stage, Stage, StepRouter};
