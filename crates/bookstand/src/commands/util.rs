//! Shared helpers for command handlers.

use std::io::{IsTerminal, stderr, stdin};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use bookstand_core::{
    ConfirmAction, EntityId, Library, OverlayLevel, ReadingStatus, Snapshot, Theme,
};

use crate::cli::{GlobalOpts, StatusArg, ThemeArg};
use crate::error::CliError;

impl From<StatusArg> for ReadingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Wanted => Self::Wanted,
            StatusArg::Reading => Self::Reading,
            StatusArg::Finished => Self::Finished,
        }
    }
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Initial library load, with a spinner on interactive terminals.
pub async fn load(library: &Library, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = (!global.quiet && stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Loading your library...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = library.load().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    // The error itself is reported by main; drop the overlay copy.
    library.notifier().hide();
    result.map_err(CliError::from)
}

/// Print and clear a non-error overlay left behind by a library call.
pub fn report_overlay(library: &Library, quiet: bool) {
    let Some(overlay) = library.notifier().current() else {
        return;
    };
    library.notifier().hide();
    if quiet || overlay.level == OverlayLevel::Error {
        return;
    }
    eprintln!("✓ {}", overlay.body);
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Walk a pending destructive action through the prompt, then fire or
/// dismiss it. Returns whether it ran.
pub async fn settle_confirmation(
    library: &Library,
    action: &ConfirmAction,
    global: &GlobalOpts,
) -> Result<bool, CliError> {
    let name = match action {
        ConfirmAction::DeleteBook { .. } => "books delete",
        ConfirmAction::DeleteShelf { .. } => "shelves delete",
    };
    match confirm(&action.to_string(), name, global.yes) {
        Ok(true) => {
            library.confirm().await?;
            Ok(true)
        }
        Ok(false) => {
            library.dismiss();
            Ok(false)
        }
        Err(e) => {
            library.dismiss();
            Err(e)
        }
    }
}

/// Resolve a book by ID or exact (case-insensitive) title.
pub fn resolve_book(snapshot: &Snapshot, identifier: &str) -> Result<EntityId, CliError> {
    let id = EntityId::from(identifier);
    let wanted = identifier.trim().to_lowercase();
    snapshot
        .book(&id)
        .or_else(|| {
            snapshot
                .books
                .iter()
                .find(|b| b.title.to_lowercase() == wanted)
        })
        .map(|b| b.id.clone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "book".into(),
            identifier: identifier.into(),
            list_command: "books list".into(),
        })
}

/// Resolve a shelf by ID or exact (case-insensitive) name.
pub fn resolve_shelf(snapshot: &Snapshot, identifier: &str) -> Result<EntityId, CliError> {
    let id = EntityId::from(identifier);
    let wanted = identifier.trim().to_lowercase();
    snapshot
        .shelf(&id)
        .or_else(|| {
            snapshot
                .shelves
                .iter()
                .find(|s| s.name.to_lowercase() == wanted)
        })
        .map(|s| s.id.clone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "shelf".into(),
            identifier: identifier.into(),
            list_command: "shelves list".into(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bookstand_core::{Book, Shelf};

    fn snapshot() -> Snapshot {
        Snapshot {
            books: vec![Book::new(1, "Dune"), Book::new(2, "Emma")],
            shelves: vec![Shelf::new(10, "Sci-Fi")],
            ..Snapshot::default()
        }
    }

    #[test]
    fn books_resolve_by_id_or_title() {
        let snap = snapshot();
        assert_eq!(resolve_book(&snap, "2").unwrap(), EntityId::Numeric(2));
        assert_eq!(resolve_book(&snap, "dune").unwrap(), EntityId::Numeric(1));
        assert!(matches!(
            resolve_book(&snap, "Missing"),
            Err(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn shelves_resolve_by_id_or_name() {
        let snap = snapshot();
        assert_eq!(resolve_shelf(&snap, "10").unwrap(), EntityId::Numeric(10));
        assert_eq!(resolve_shelf(&snap, "SCI-FI").unwrap(), EntityId::Numeric(10));
    }

    #[test]
    fn accented_names_match_without_case() {
        let snap = Snapshot {
            books: vec![Book::new(3, "Émile")],
            shelves: vec![Shelf::new(11, "Ficção")],
            ..Snapshot::default()
        };
        assert_eq!(resolve_book(&snap, "ÉMILE").unwrap(), EntityId::Numeric(3));
        assert_eq!(resolve_shelf(&snap, "FICÇÃO").unwrap(), EntityId::Numeric(11));
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Delete?", "books delete", true).unwrap());
    }
}
