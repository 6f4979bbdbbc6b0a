// ── Modal content ──
//
// Markup for the modal routes (book detail, add/edit form) and for the
// overlay slot itself. Modal bodies are produced here already escaped; every
// other overlay body is plain text and gets escaped on the way out.

use strum::IntoEnumIterator;

use bookstand_core::{
    Book, BookDraft, EntityId, Overlay, OverlayLevel, ReadingStatus, Route, Snapshot,
};

use crate::markup::{cover_url, escape_html, option, percent};

/// Title and body markup for a modal route, `None` for page routes.
pub fn for_route(route: &Route, snapshot: &Snapshot) -> Option<(String, String)> {
    match route {
        Route::AddBook => Some(("Add book".into(), book_form(snapshot, None))),
        Route::ViewBook(id) => Some(match snapshot.book(id) {
            Some(book) => (book.title.clone(), book_detail(snapshot, book)),
            None => ("Book not found".into(), not_found(id)),
        }),
        Route::EditBook(id) => Some(match snapshot.book(id) {
            Some(book) => (format!("Edit {}", book.title), book_form(snapshot, Some(book))),
            None => ("Book not found".into(), not_found(id)),
        }),
        _ => None,
    }
}

pub fn not_found(id: &EntityId) -> String {
    format!(
        r#"<p class="modal-not-found">No book with id {} is in your library.</p>"#,
        escape_html(&id.to_string())
    )
}

pub fn book_detail(snapshot: &Snapshot, book: &Book) -> String {
    let id = escape_html(&book.id.to_string());
    let mut rows: Vec<(&str, String)> = vec![
        ("Author", escape_html(&book.author)),
        ("Status", book.status.label().to_owned()),
    ];
    if let Some(series) = book.series.as_deref() {
        let series = match book.series_index {
            Some(index) => format!("{series} #{index}"),
            None => series.to_owned(),
        };
        rows.push(("Series", escape_html(&series)));
    }
    if let Some(progress) = book.progress {
        rows.push(("Progress", format!("{}%", percent(progress))));
    }
    if let Some(rating) = book.meta.rating {
        rows.push(("Rating", format!("{rating}")));
    }
    let shelves: Vec<String> = book
        .shelves
        .iter()
        .filter_map(|id| snapshot.shelf(id))
        .map(|s| escape_html(&s.name))
        .collect();
    if !shelves.is_empty() {
        rows.push(("Shelves", shelves.join(", ")));
    }

    let mut html = format!(
        r#"<div class="book-detail flex gap-6" data-book-id="{id}"><img src="{}" alt="{}" class="w-32 h-48 object-cover rounded"><dl class="space-y-1">"#,
        escape_html(&cover_url(book)),
        escape_html(&book.title),
    );
    for (label, value) in rows {
        html.push_str(&format!("<dt>{label}</dt><dd>{value}</dd>"));
    }
    html.push_str("</dl></div>");

    if let Some(review) = book.meta.review.as_deref().filter(|r| !r.trim().is_empty()) {
        html.push_str(&format!(
            r#"<blockquote class="review mt-4 italic">{}</blockquote>"#,
            escape_html(review)
        ));
    }
    html.push_str(&format!(
        r##"<div class="flex gap-2 mt-6"><a href="#/edit/{id}" class="btn-expressive btn-primary">Edit</a><button class="delete-book-btn btn-expressive" data-book-id="{id}">Remove</button></div>"##
    ));
    html
}

/// Add form (blank, with a picker for the library book to track) or edit
/// form (prefilled from the book).
pub fn book_form(snapshot: &Snapshot, book: Option<&Book>) -> String {
    let draft = book.map_or_else(BookDraft::default, BookDraft::from_book);
    let mut html = String::from(r#"<form id="book-form" class="space-y-4">"#);

    match book {
        Some(book) => {
            html.push_str(&format!(
                r#"<input type="hidden" name="id" value="{}">"#,
                escape_html(&book.id.to_string())
            ));
        }
        None => {
            html.push_str(r#"<label>Book <select name="id" required>"#);
            html.push_str(&option("", "Choose a book...", true));
            for b in &snapshot.books {
                html.push_str(&option(&b.id.to_string(), &b.title, false));
            }
            html.push_str("</select></label>");
        }
    }

    html.push_str(r#"<label>Status <select name="status">"#);
    for status in ReadingStatus::iter() {
        html.push_str(&option(
            status.wire_value(),
            status.label(),
            draft.status.unwrap_or_default() == status,
        ));
    }
    html.push_str("</select></label>");

    let rating = draft.rating.map(|r| r.to_string());
    let pages = draft.total_pages.map(|p| p.to_string());
    for (label, name, kind, value) in [
        ("Rating", "rating", "number", rating.as_deref()),
        ("Started", "startDate", "date", draft.start_date.as_deref()),
        ("Finished", "endDate", "date", draft.end_date.as_deref()),
        ("Format", "mediaType", "text", draft.media_type.as_deref()),
        ("Pages", "totalPages", "number", pages.as_deref()),
        ("Listening time", "totalTime", "text", draft.total_time.as_deref()),
        ("Cover URL", "coverUrl", "url", draft.cover_url.as_deref()),
    ] {
        html.push_str(&format!(
            r#"<label>{label} <input type="{kind}" name="{name}" value="{}"></label>"#,
            escape_html(value.unwrap_or_default())
        ));
    }

    let feelings = draft.feelings.unwrap_or_default().join(", ");
    html.push_str(&format!(
        r#"<label>Feelings <input type="text" name="feelings" value="{}"></label>"#,
        escape_html(&feelings)
    ));
    for (label, name, value) in [
        ("Synopsis", "synopsis", draft.synopsis.as_deref()),
        ("Review", "review", draft.review.as_deref()),
    ] {
        html.push_str(&format!(
            r#"<label>{label} <textarea name="{name}">{}</textarea></label>"#,
            escape_html(value.unwrap_or_default())
        ));
    }
    html.push_str(&format!(
        r#"<label><input type="checkbox" name="favorite"{}> Favorite</label>"#,
        if draft.favorite.unwrap_or(false) { " checked" } else { "" }
    ));

    let selected = draft.shelves.unwrap_or_default();
    if !snapshot.shelves.is_empty() {
        html.push_str(r#"<fieldset><legend>Shelves</legend>"#);
        for shelf in snapshot.shelves_sorted() {
            html.push_str(&format!(
                r#"<label><input type="checkbox" name="shelves" value="{}"{}> {}</label>"#,
                escape_html(&shelf.id.to_string()),
                if selected.contains(&shelf.id) { " checked" } else { "" },
                escape_html(&shelf.name),
            ));
        }
        html.push_str("</fieldset>");
    }

    html.push_str(r#"<button type="submit" class="btn-expressive btn-primary">Save</button></form>"#);
    html
}

fn level_class(level: OverlayLevel) -> &'static str {
    match level {
        OverlayLevel::Info => "info",
        OverlayLevel::Success => "success",
        OverlayLevel::Error => "error",
        OverlayLevel::Loading => "loading",
        OverlayLevel::Confirm => "confirm",
        OverlayLevel::Modal => "modal",
    }
}

/// The overlay container for whatever the notifier slot holds.
pub fn overlay(overlay: &Overlay) -> String {
    let body = match overlay.level {
        OverlayLevel::Modal => overlay.body.clone(),
        _ => format!("<p>{}</p>", escape_html(&overlay.body)),
    };
    let actions = match overlay.level {
        OverlayLevel::Confirm => {
            r#"<div class="flex justify-end gap-2"><button data-action="dismiss" class="btn-expressive">Cancel</button><button data-action="confirm" class="btn-expressive btn-danger">Confirm</button></div>"#
        }
        OverlayLevel::Loading => r#"<div class="spinner" aria-busy="true"></div>"#,
        _ => {
            r#"<div class="flex justify-end"><button data-action="close" class="btn-expressive btn-primary">Close</button></div>"#
        }
    };
    format!(
        r#"<div id="modal-container" class="overlay overlay-{}" role="dialog"><div class="card-expressive p-6 max-w-lg w-full"><h2 class="text-xl font-bold mb-4">{}</h2><div class="mb-6">{body}</div>{actions}</div></div>"#,
        level_class(overlay.level),
        escape_html(&overlay.title),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bookstand_core::{ConfirmAction, Notifier, Shelf};

    fn snapshot() -> Snapshot {
        let mut dune = Book::new(42, "Dune");
        dune.author = "Frank Herbert".into();
        dune.status = ReadingStatus::Reading;
        dune.progress = Some(0.25);
        dune.series = Some("Dune".into());
        dune.series_index = Some(1.0);
        dune.shelves.insert(EntityId::Numeric(7));
        dune.meta.review = Some("Spice <3".into());
        Snapshot {
            books: vec![dune, Book::new(43, "Emma")],
            shelves: vec![Shelf::new(7, "Sci-Fi"), Shelf::new(8, "Classics")],
            ..Snapshot::default()
        }
    }

    #[test]
    fn view_route_renders_detail() {
        let snap = snapshot();
        let (title, html) = for_route(&Route::parse("#/book/42"), &snap).unwrap();
        assert_eq!(title, "Dune");
        assert!(html.contains(r#"data-book-id="42""#));
        assert!(html.contains("<dd>Frank Herbert</dd>"));
        assert!(html.contains("<dd>Dune #1</dd>"));
        assert!(html.contains("<dd>25%</dd>"));
        assert!(html.contains("<dd>Sci-Fi</dd>"));
        assert!(html.contains("Spice &lt;3"));
        assert!(html.contains(r##"href="#/edit/42""##));
    }

    #[test]
    fn unknown_id_renders_not_found() {
        let (title, html) =
            for_route(&Route::parse("#/book/999"), &snapshot()).unwrap();
        assert_eq!(title, "Book not found");
        assert!(html.contains("No book with id 999"));
    }

    #[test]
    fn page_routes_have_no_modal() {
        assert!(for_route(&Route::MyBooks, &snapshot()).is_none());
    }

    #[test]
    fn edit_form_is_prefilled() {
        let snap = snapshot();
        let (_, html) = for_route(&Route::parse("#/edit/42"), &snap).unwrap();
        assert!(html.contains(r#"<input type="hidden" name="id" value="42">"#));
        assert!(html.contains(r#"<option value="lendo" selected>Reading</option>"#));
        assert!(html.contains(r#"value="7" checked> Sci-Fi"#));
        assert!(html.contains(r#"value="8"> Classics"#));
        assert!(html.contains("<textarea name=\"review\">Spice &lt;3</textarea>"));
    }

    #[test]
    fn add_form_is_blank_with_book_picker() {
        let snap = snapshot();
        let (title, html) = for_route(&Route::AddBook, &snap).unwrap();
        assert_eq!(title, "Add book");
        assert!(html.contains(r#"<select name="id" required>"#));
        assert!(html.contains(r#"<option value="43">Emma</option>"#));
        assert!(html.contains(r#"<option value="quero-ler" selected>Want to read</option>"#));
        assert!(!html.contains(" checked"));
    }

    #[test]
    fn plain_overlays_escape_their_body() {
        let n = Notifier::new();
        n.error("Error", "<b>boom</b>");
        let html = overlay(&n.current().unwrap());
        assert!(html.contains("<p>&lt;b&gt;boom&lt;/b&gt;</p>"));
        assert!(html.contains("overlay-error"));
        assert!(html.contains(r#"data-action="close""#));
    }

    #[test]
    fn modal_overlay_keeps_markup() {
        let n = Notifier::new();
        n.modal("Dune", "<dl><dt>Author</dt></dl>");
        let html = overlay(&n.current().unwrap());
        assert!(html.contains("<dl><dt>Author</dt></dl>"));
    }

    #[test]
    fn confirm_overlay_offers_both_choices() {
        let n = Notifier::new();
        n.confirm(ConfirmAction::DeleteShelf {
            id: EntityId::Numeric(7),
            name: "Sci-Fi".into(),
        });
        let html = overlay(&n.current().unwrap());
        assert!(html.contains(r#"data-action="dismiss""#));
        assert!(html.contains(r#"data-action="confirm""#));
        assert!(html.contains("Sci-Fi"));
    }
}
