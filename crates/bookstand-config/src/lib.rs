//! Shared configuration for bookstand.
//!
//! TOML profiles, session resolution (env + keyring + plaintext), and
//! translation to `bookstand_core::LibraryConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use bookstand_core::{LibraryConfig, TlsVerification};

/// Keyring service name for stored sessions.
pub const KEYRING_SERVICE: &str = "bookstand";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root URL (e.g. "https://books.example.org/bookshelf/api").
    pub server: String,

    /// Session cookie (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Environment variable name holding the session cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_env: Option<String>,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override the insecure TLS default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override the timeout default (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bookstand", "bookstand").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bookstand");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. Layering: defaults, then the file, then
/// `BOOKSTAND_*` env vars (`__` separates nested keys, e.g.
/// `BOOKSTAND_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("BOOKSTAND_").split("__"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session resolution ──────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/session"),
    )?)
}

/// Resolve the session cookie for a profile.
///
/// Order: the profile's `session_env` variable, the system keyring, then
/// plaintext in the config. No session at all is valid for servers that
/// allow anonymous reads.
pub fn resolve_session(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's session_env → env var lookup
    if let Some(ref env_name) = profile.session_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(secret) =
        keyring_entry(profile_name).and_then(|e| e.get_password().map_err(ConfigError::from))
    {
        return Some(SecretString::from(secret));
    }

    // 3. Plaintext in config
    profile.session.clone().map(SecretString::from)
}

/// Store a session cookie in the system keyring.
pub fn store_session(profile_name: &str, session: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(session)?;
    Ok(())
}

// ── LibraryConfig translation ───────────────────────────────────────

/// Parse a profile's server URL.
pub fn parse_server_url(raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// TLS strategy for a profile: insecure wins, then a custom CA, else the
/// system store.
pub fn tls_for(profile: &Profile, insecure: bool) -> TlsVerification {
    if insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}

/// Build a `LibraryConfig` from a profile and global defaults, with no
/// CLI flag overrides.
pub fn profile_to_library_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<LibraryConfig, ConfigError> {
    let url = parse_server_url(&profile.server)?;

    Ok(LibraryConfig {
        url,
        session: resolve_session(profile, profile_name),
        tls: tls_for(profile, defaults.insecure),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn profile() -> Profile {
        Profile {
            server: "https://books.example.org/bookshelf/api".into(),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("home".into(), profile());
        cfg.default_profile = Some("home".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("home"));
        assert_eq!(loaded.profile("home").unwrap().server, profile().server);
    }

    #[test]
    fn unknown_profile_is_reported() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn unset_session_env_falls_back_to_plaintext() {
        let p = Profile {
            session: Some("plain=1".into()),
            session_env: Some("BOOKSTAND_TEST_SESSION_NEVER_SET".into()),
            ..profile()
        };
        let resolved = resolve_session(&p, "bookstand-test-no-keyring");
        assert_eq!(
            resolved.map(|s| s.expose_secret().to_owned()),
            Some("plain=1".into())
        );
    }

    #[test]
    fn tls_policy_order() {
        let mut p = profile();
        assert_eq!(tls_for(&p, false), TlsVerification::SystemDefaults);
        p.ca_cert = Some("/etc/ca.pem".into());
        assert_eq!(
            tls_for(&p, false),
            TlsVerification::CustomCa("/etc/ca.pem".into())
        );
        assert_eq!(tls_for(&p, true), TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn invalid_server_url_is_validation_error() {
        let p = Profile {
            server: "not a url".into(),
            ..Profile::default()
        };
        let result = profile_to_library_config(&p, "x", &Defaults::default());
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn profile_timeout_overrides_default() {
        let p = Profile {
            timeout: Some(5),
            ..profile()
        };
        let cfg = profile_to_library_config(&p, "bookstand-test-no-keyring", &Defaults::default())
            .unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }
}
