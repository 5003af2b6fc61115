use thiserror::Error;

/// Application-level error type shared across the gateway, views, and
/// download plumbing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `detail` is the
    /// server-supplied message when the body carried one.
    #[error("Backend error (status {status}): {detail}")]
    Backend { status: u16, detail: String },

    /// A 2xx response whose envelope did not match the success contract.
    #[error("Unexpected response envelope: {0}")]
    Envelope(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message shown to the user for this error.
    ///
    /// Backend-supplied detail wins; everything else (transport failures,
    /// malformed envelopes) collapses to the operation's fixed fallback so
    /// internals never leak into the UI.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Backend { detail, .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}
