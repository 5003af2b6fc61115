/// Backend endpoint configuration, resolved once and passed into the gateway
/// at construction. Precedence: `HIREME_API_URL` if set and non-blank, else
/// the fixed local default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
}

/// Default backend address when no override is supplied.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "HIREME_API_URL";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let override_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self::with_base_url(override_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()))
    }

    /// Explicit constructor, used by tests and embedders to avoid environment
    /// mutation.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}
