// Shared transport configuration for building reqwest::Client instances.
//
// TLS, timeout, and the session cookie jar live here so the
// client module only deals with URLs and envelopes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("bookstand/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode (api-level mirror of core's TlsVerification).
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-hosted servers with self-signed certs).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Raw `Cookie` header value of an already-established web session
    /// (e.g. `session=...; remember_token=...`).
    pub session_cookie: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            session_cookie: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` for the server at `base_url`.
    ///
    /// A configured session is seeded into the client's cookie jar, so a
    /// `Set-Cookie` from the server replaces it for later requests.
    pub fn build_client(&self, base_url: &Url) -> Result<reqwest::Client, Error> {
        let jar = match &self.session_cookie {
            Some(session) => session_jar(session, base_url)?,
            None => Jar::default(),
        };
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::new(jar));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Attach an existing session cookie.
    pub fn with_session(mut self, cookie: SecretString) -> Self {
        self.session_cookie = Some(cookie);
        self
    }
}

/// Split a raw `Cookie` header (`a=1; b=2`) into site-wide jar entries.
fn session_jar(session: &SecretString, base_url: &Url) -> Result<Jar, Error> {
    let jar = Jar::default();
    for pair in session.expose_secret().split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        if !pair.contains('=') || HeaderValue::from_str(pair).is_err() {
            return Err(Error::InvalidConfig(
                "session cookie must be `name=value` pairs separated by `;`".into(),
            ));
        }
        jar.add_cookie_str(&format!("{pair}; Path=/"), base_url);
    }
    Ok(jar)
}
