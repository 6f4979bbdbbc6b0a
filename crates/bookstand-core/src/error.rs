// ── Core error types ──
//
// User-facing errors from bookstand-core. Consumers never see raw HTTP
// details or JSON parse failures directly: the `From<bookstand_api::Error>`
// impl translates transport-layer errors into domain variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the library at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Book not found: {identifier}")]
    BookNotFound { identifier: String },

    #[error("Shelf not found: {identifier}")]
    ShelfNotFound { identifier: String },

    #[error("Not found: {identifier}")]
    NotFound { identifier: String, message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Request rejected by the server: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("No confirmation is pending")]
    NothingToConfirm,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<bookstand_api::Error> for CoreError {
    fn from(err: bookstand_api::Error) -> Self {
        use bookstand_api::Error as Api;

        match err {
            Api::Authentication { status } => CoreError::AuthenticationFailed {
                message: format!("session missing or expired (HTTP {status})"),
            },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            Api::InvalidConfig(message) => CoreError::Config { message },
            Api::Http {
                status: 404,
                message,
            } => CoreError::NotFound {
                identifier: "resource".into(),
                message,
            },
            Api::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            Api::Api { message } => CoreError::Rejected { message },
            Api::MissingField { field } => CoreError::Api {
                message: format!("response is missing '{field}'"),
                status: None,
            },
            Api::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unexpected response from server: {message}"),
                status: None,
            },
        }
    }
}
