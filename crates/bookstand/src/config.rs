//! CLI configuration: thin wrapper around `bookstand_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides (--server,
//! --session, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use bookstand_core::{LibraryConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use bookstand_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the `LibraryConfig` for this invocation.
///
/// A configured profile is the base and flags override it. Without a
/// profile, `--server` alone is enough.
pub fn resolve_library_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<LibraryConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut resolved = match config.profiles.get(&profile_name) {
        Some(profile) => {
            let profile = match global.server {
                Some(ref server) => Profile {
                    server: server.clone(),
                    ..profile.clone()
                },
                None => profile.clone(),
            };
            bookstand_config::profile_to_library_config(&profile, &profile_name, &config.defaults)?
        }
        None => {
            let Some(server) = global.server.as_deref() else {
                return Err(if global.profile.is_some() {
                    CliError::ProfileNotFound {
                        name: profile_name,
                        available: available_profiles(config),
                    }
                } else {
                    CliError::NoConfig {
                        path: config_path().display().to_string(),
                    }
                });
            };
            let mut base = LibraryConfig::new(bookstand_config::parse_server_url(server)?);
            base.timeout = Duration::from_secs(config.defaults.timeout);
            if config.defaults.insecure {
                base.tls = TlsVerification::DangerAcceptInvalid;
            }
            base
        }
    };

    if let Some(ref session) = global.session {
        resolved.session = Some(SecretString::from(session.clone()));
    }
    if global.insecure {
        resolved.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        resolved.timeout = Duration::from_secs(secs);
    }
    Ok(resolved)
}
