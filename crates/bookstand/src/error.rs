//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use bookstand_config::ConfigError;
use bookstand_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the library at {url}")]
    #[diagnostic(
        code(bookstand::connection_failed),
        help(
            "Check that the server is running and the URL points at its API root.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(bookstand::auth_failed),
        help(
            "Sign in through the web UI, copy the session cookie, then run:\n\
             bookstand config set-session"
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(bookstand::not_found),
        help("Run: bookstand {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Server has no {identifier}: {message}")]
    #[diagnostic(
        code(bookstand::remote_not_found),
        help("Check that the server URL points at the bookshelf API root.")
    )]
    RemoteNotFound { identifier: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(bookstand::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bookstand::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(bookstand::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: bookstand config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(bookstand::no_config),
        help(
            "Create a profile with: bookstand config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(bookstand::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(bookstand::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(bookstand::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("Cannot read {}", path.display())]
    #[diagnostic(code(bookstand::file))]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Cannot serialize output: {0}")]
    #[diagnostic(code(bookstand::json))]
    Json(#[from] serde_json::Error),

    #[error("Cannot serialize output: {0}")]
    #[diagnostic(code(bookstand::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::RemoteNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },

            CoreError::BookNotFound { identifier } => Self::NotFound {
                resource_type: "book".into(),
                identifier,
                list_command: "books list".into(),
            },

            CoreError::ShelfNotFound { identifier } => Self::NotFound {
                resource_type: "shelf".into(),
                identifier,
                list_command: "shelves list".into(),
            },

            CoreError::NotFound {
                identifier,
                message,
            } => Self::RemoteNotFound {
                identifier,
                message,
            },

            CoreError::Rejected { message } => Self::ApiError {
                code: "rejected".into(),
                message,
            },

            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::NothingToConfirm => Self::Validation {
                field: "confirmation".into(),
                reason: "nothing is waiting for confirmation".into(),
            },

            CoreError::Api { message, status } => Self::ApiError {
                code: status.map_or_else(|| "api".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Io { path, source } => Self::File { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_exit_class() {
        let cases = [
            (
                CoreError::AuthenticationFailed {
                    message: "expired".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::BookNotFound {
                    identifier: "9".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (CoreError::Timeout { timeout_secs: 5 }, exit_code::TIMEOUT),
            (
                CoreError::ConnectionFailed {
                    url: "http://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (
                CoreError::ValidationFailed {
                    message: "blank".into(),
                },
                exit_code::USAGE,
            ),
            (
                CoreError::Rejected {
                    message: "nope".into(),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn api_status_becomes_code() {
        let err = CliError::from(CoreError::Api {
            message: "db locked".into(),
            status: Some(500),
        });
        assert_eq!(err.to_string(), "API error (500): db locked");
    }
}
