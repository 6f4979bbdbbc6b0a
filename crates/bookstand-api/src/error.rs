use thiserror::Error;

/// Top-level error type for the `bookstand-api` crate.
///
/// Covers every failure mode of the REST boundary: transport, HTTP status,
/// application-level `{status: "error"}` envelopes, and malformed bodies.
/// `bookstand-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// The server refused the session (HTTP 401/403 or a redirect to its login page).
    #[error("Authentication required (HTTP {status}) -- the session is missing or expired")]
    Authentication { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A configured value could not be turned into a request header.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    // ── Server responses ────────────────────────────────────────────
    /// Non-success HTTP status.
    #[error("Server returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Success HTTP status, but the envelope reported `status != "success"`.
    #[error("Server rejected the request: {message}")]
    Api { message: String },

    /// A mutation succeeded but the response lacked a field the caller needs.
    #[error("Response is missing the '{field}' field")]
    MissingField { field: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
