//! Shelf command handlers.

use serde::Serialize;
use tabled::Tabled;

use bookstand_core::{Library, Shelf};

use crate::cli::{GlobalOpts, OutputFormat, ShelvesArgs, ShelvesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// A shelf together with its derived book count.
#[derive(Serialize)]
struct ShelfSummary<'a> {
    #[serde(flatten)]
    shelf: &'a Shelf,
    books: usize,
}

#[derive(Tabled)]
struct ShelfRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Books")]
    books: usize,
    #[tabled(rename = "Public")]
    public: String,
}

fn shelf_row(s: &ShelfSummary<'_>) -> ShelfRow {
    ShelfRow {
        id: s.shelf.id.to_string(),
        name: s.shelf.name.clone(),
        books: s.books,
        public: if s.shelf.is_public { "yes".into() } else { String::new() },
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    library: &Library,
    args: ShelvesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ShelvesCommand::List => {
            let snapshot = library.snapshot();
            let summaries: Vec<ShelfSummary<'_>> = snapshot
                .shelves_sorted()
                .into_iter()
                .map(|shelf| ShelfSummary {
                    shelf,
                    books: snapshot.shelf_book_count(&shelf.id),
                })
                .collect();
            let out = output::render_list(
                &global.output,
                &summaries,
                shelf_row,
                |s| s.shelf.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShelvesCommand::Create { name } => {
            let id = library.create_shelf(&name).await?;
            if global.quiet {
                return Ok(());
            }
            if matches!(global.output, OutputFormat::Plain) {
                println!("{id}");
            } else {
                eprintln!("✓ Created shelf '{}' ({id})", name.trim());
            }
            Ok(())
        }

        ShelvesCommand::Delete { shelf } => {
            let id = util::resolve_shelf(&library.snapshot(), &shelf)?;
            let action = library.request_delete_shelf(&id)?;
            if util::settle_confirmation(library, &action, global).await? && !global.quiet {
                eprintln!("✓ Deleted shelf {id}");
            }
            Ok(())
        }
    }
}
