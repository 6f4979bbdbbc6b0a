//! Book command handlers.

use std::collections::BTreeSet;

use tabled::Tabled;

use bookstand_core::{Book, BookDraft, BookFilter, Library, ReadingStatus, Snapshot, StatusFilter};
use bookstand_view::markup::percent;

use crate::cli::{BooksArgs, BooksCommand, GlobalOpts, SaveBookArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Shelves")]
    shelves: String,
    #[tabled(rename = "Last read")]
    last_read: String,
}

fn book_row(book: &Book, snapshot: &Snapshot, color: bool) -> BookRow {
    BookRow {
        id: book.id.to_string(),
        title: book.title.clone(),
        author: book.author.clone(),
        status: output::status_label(book.status, color),
        progress: book
            .progress
            .map(|p| format!("{}%", percent(p)))
            .unwrap_or_default(),
        shelves: shelf_names(book, snapshot).join(", "),
        last_read: book
            .last_read
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

fn shelf_names(book: &Book, snapshot: &Snapshot) -> Vec<String> {
    book.shelves
        .iter()
        .filter_map(|id| snapshot.shelf(id))
        .map(|s| s.name.clone())
        .collect()
}

fn detail(book: &Book, snapshot: &Snapshot, color: bool) -> String {
    let meta = &book.meta;
    let series = book.series.as_deref().map_or_else(String::new, |s| {
        book.series_index
            .map_or_else(|| s.to_owned(), |i| format!("{s} #{i}"))
    });
    output::detail_lines(&[
        ("ID", book.id.to_string()),
        ("Title", book.title.clone()),
        ("Author", book.author.clone()),
        ("Series", series),
        ("Status", output::status_label(book.status, color)),
        (
            "Progress",
            book.progress
                .map(|p| format!("{}%", percent(p)))
                .unwrap_or_default(),
        ),
        ("Shelves", shelf_names(book, snapshot).join(", ")),
        ("Rating", meta.rating.map(|r| r.to_string()).unwrap_or_default()),
        ("Favorite", if meta.favorite { "yes".into() } else { String::new() }),
        ("Format", meta.media_type.clone().unwrap_or_default()),
        ("Pages", meta.total_pages.map(|p| p.to_string()).unwrap_or_default()),
        ("Started", meta.start_date.clone().unwrap_or_default()),
        ("Finished", meta.end_date.clone().unwrap_or_default()),
        ("Feelings", meta.feelings.join(", ")),
        ("Review", meta.review.clone().unwrap_or_default()),
    ])
}

fn build_draft(
    args: SaveBookArgs,
    snapshot: &Snapshot,
) -> Result<BookDraft, CliError> {
    let id = util::resolve_book(snapshot, &args.book)?;
    let shelves = if args.no_shelves {
        Some(BTreeSet::new())
    } else if args.shelves.is_empty() {
        None
    } else {
        Some(
            args.shelves
                .iter()
                .map(|s| util::resolve_shelf(snapshot, s))
                .collect::<Result<BTreeSet<_>, _>>()?,
        )
    };

    Ok(BookDraft {
        status: args.status.map(ReadingStatus::from),
        rating: args.rating,
        feelings: args.feelings,
        start_date: args.start_date,
        end_date: args.end_date,
        media_type: args.media_type,
        total_pages: args.pages,
        total_time: args.time,
        review: args.review,
        synopsis: args.synopsis,
        favorite: args.favorite,
        cover_url: args.cover_url,
        shelves,
        ..BookDraft::for_book(id)
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    library: &Library,
    args: BooksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let snapshot = library.snapshot();

    match args.command {
        BooksCommand::List {
            search,
            status,
            shelf,
        } => {
            let filter = BookFilter::new(
                search.unwrap_or_default(),
                status.map_or(StatusFilter::All, |s| ReadingStatus::from(s).into()),
            );
            let mut books = snapshot.filtered_books(&filter);
            if let Some(shelf) = shelf {
                let shelf = util::resolve_shelf(&snapshot, &shelf)?;
                books.retain(|b| b.is_on_shelf(&shelf));
            }
            let out = output::render_list(
                &global.output,
                &books,
                |b| book_row(b, &snapshot, color),
                |b| b.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Show { book } => {
            let id = util::resolve_book(&snapshot, &book)?;
            let book = snapshot
                .book(&id)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "book".into(),
                    identifier: id.to_string(),
                    list_command: "books list".into(),
                })?;
            let out = output::render_single(
                &global.output,
                book,
                |b| detail(b, &snapshot, color),
                |b| b.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BooksCommand::Save(save) => {
            let draft = build_draft(save, &snapshot)?;
            let id = library.save_book(draft).await?;
            if !global.quiet {
                eprintln!("✓ Saved book {id}");
            }
            Ok(())
        }

        BooksCommand::Delete { book } => {
            let id = util::resolve_book(&snapshot, &book)?;
            let action = library.request_delete_book(&id)?;
            if util::settle_confirmation(library, &action, global).await? && !global.quiet {
                eprintln!("✓ Removed book {id}");
            }
            Ok(())
        }
    }
}
