//! Config subcommand handlers.

use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Config as TOML-ish text with the session cookie masked.
fn format_config_redacted(cfg: &Config) -> String {
    let mut sections = Vec::new();

    if let Some(ref default) = cfg.default_profile {
        sections.push(format!("default_profile = \"{default}\""));
    }
    sections.push(format!(
        "[defaults]\noutput = \"{}\"\ncolor = \"{}\"\ninsecure = {}\ntimeout = {}",
        cfg.defaults.output, cfg.defaults.color, cfg.defaults.insecure, cfg.defaults.timeout
    ));

    for (name, p) in &cfg.profiles {
        let mut lines = vec![
            format!("[profiles.{name}]"),
            format!("server = \"{}\"", p.server),
        ];
        if p.session.is_some() {
            lines.push("session = \"****\"".into());
        }
        if let Some(ref env) = p.session_env {
            lines.push(format!("session_env = \"{env}\""));
        }
        if let Some(ref ca) = p.ca_cert {
            lines.push(format!("ca_cert = \"{}\"", ca.display()));
        }
        if let Some(insecure) = p.insecure {
            lines.push(format!("insecure = {insecure}"));
        }
        if let Some(timeout) = p.timeout {
            lines.push(format!("timeout = {timeout}"));
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

/// Copy of the config safe to serialize for `--output json|yaml`.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.session.is_some() {
            profile.session = Some("****".into());
        }
    }
    cfg
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    tracing::debug!(path = %path.display(), "config written");
    Ok(())
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_session() -> Result<String, CliError> {
    let session = rpassword::prompt_password("Session cookie (name=value): ").map_err(prompt_err)?;
    let session = session.trim();
    if session.is_empty() {
        return Err(CliError::Validation {
            field: "session".into(),
            reason: "session cookie cannot be empty".into(),
        });
    }
    Ok(session.to_owned())
}

/// Keyring or plaintext. Returns `Some(session)` for plaintext storage.
fn prompt_session_storage(profile_name: &str, session: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the session cookie?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        bookstand_config::store_session(profile_name, session)?;
        eprintln!("   ✓ Session stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(session.to_owned()))
    }
}

#[derive(Clone, Serialize, Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Default")]
    #[serde(rename = "default")]
    is_default: bool,
}

fn profile_rows(cfg: &Config) -> Vec<ProfileRow> {
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    cfg.profiles
        .iter()
        .map(|(name, p)| ProfileRow {
            name: name.clone(),
            server: p.server.clone(),
            is_default: name == default,
        })
        .collect()
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    CliError::ProfileNotFound {
        name,
        available: config::available_profiles(cfg),
    }
}

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("bookstand configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let server: String = Input::new()
                .with_prompt("Library API URL")
                .default("http://localhost:8083/api/".into())
                .validate_with(|s: &String| {
                    bookstand_config::parse_server_url(s)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let with_session = Select::new()
                .with_prompt("Does the server require a session cookie?")
                .items(&["No", "Yes"])
                .default(0)
                .interact()
                .map_err(prompt_err)?
                == 1;

            let session = if with_session {
                let cookie = prompt_session()?;
                prompt_session_storage(&profile_name, &cookie)?
            } else {
                None
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    session,
                    ..Profile::default()
                },
            );
            cfg.default_profile = Some(profile_name.clone());
            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: bookstand stats");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |c| {
                c.default_profile.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            match key.replace('-', "_").as_str() {
                "server" => {
                    bookstand_config::parse_server_url(&value)?;
                    profile.server = value;
                }
                "session" => profile.session = Some(value),
                "session_env" => profile.session_env = Some(value),
                "ca_cert" => profile.ca_cert = Some(value.into()),
                "insecure" => {
                    profile.insecure =
                        Some(parse_flag("insecure", &value, "must be 'true' or 'false'")?);
                }
                "timeout" => {
                    profile.timeout =
                        Some(parse_flag("timeout", &value, "must be a number (seconds)")?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: server, session, \
                             session_env, ca_cert, insecure, timeout"
                        ),
                    });
                }
            }

            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: bookstand config init");
                return Ok(());
            }
            let rows = profile_rows(&cfg);
            let out = output::render_list(&global.output, &rows, ProfileRow::clone, |r| {
                r.name.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetSession ─────────────────────────────────────────────
        ConfigCommand::SetSession => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }
            let session = prompt_session()?;
            bookstand_config::store_session(&profile_name, &session)?;
            eprintln!("✓ Session stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let home = Profile {
            server: "http://books.lan/api/".into(),
            session: Some("session=secret".into()),
            timeout: Some(10),
            ..Profile::default()
        };
        Config {
            default_profile: Some("home".into()),
            profiles: [("home".to_owned(), home)].into_iter().collect(),
            ..Config::default()
        }
    }

    #[test]
    fn redacted_text_masks_session() {
        let text = format_config_redacted(&sample());
        assert!(text.contains("[profiles.home]"));
        assert!(text.contains("session = \"****\""));
        assert!(text.contains("timeout = 10"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn profile_rows_mark_the_default() {
        let rows = profile_rows(&sample());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].server, "http://books.lan/api/");
        assert!(rows[0].is_default);
    }

    #[test]
    fn redacted_copy_is_safe_to_serialize() {
        let cfg = redacted(&sample());
        assert_eq!(cfg.profiles["home"].session.as_deref(), Some("****"));
    }
}
