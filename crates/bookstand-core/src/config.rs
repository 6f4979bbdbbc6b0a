// ── Runtime connection configuration ──
//
// Describes *how* to reach a bookshelf server. Carries the session secret
// and connection tuning but never touches disk: the CLI builds a
// `LibraryConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use bookstand_api::transport::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-hosted servers with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one bookshelf server.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// API root, e.g. `https://books.example.org/bookshelf/api/`.
    pub url: Url,
    /// Raw `Cookie` header of an existing web session. `None` for servers
    /// that allow anonymous access.
    pub session: Option<SecretString>,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl LibraryConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            session: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let transport = TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            session_cookie: None,
        };
        match &self.session {
            Some(session) => transport.with_session(session.clone()),
            None => transport,
        }
    }
}
