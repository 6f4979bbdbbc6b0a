// ── Shelves overview ──
//
// Status counts, the new-shelf form, and one card per shelf with a short
// cover strip.

use bookstand_core::{Shelf, Snapshot};

use super::{PageId, header};
use crate::markup::{cover_url, escape_html};

/// Books shown in a shelf's preview strip.
pub const PREVIEW_LEN: usize = 7;

pub fn render(snapshot: &Snapshot) -> String {
    let counts = snapshot.status_counts();
    let mut html = String::from(r#"<div class="max-w-6xl mx-auto space-y-8">"#);
    html.push_str(&header(PageId::Shelves.label(), &snapshot.profile));

    html.push_str(r#"<div class="grid grid-cols-2 md:grid-cols-4 gap-4">"#);
    for (label, value, class) in [
        ("Total books", counts.total, "stat-total"),
        ("Finished", counts.finished, "stat-finished"),
        ("Reading", counts.reading, "stat-reading"),
        ("Want to read", counts.wanted, "stat-wanted"),
    ] {
        html.push_str(&format!(
            r#"<div class="card-expressive p-4 text-center {class}"><p class="text-sm text-neutral-400">{label}</p><p class="font-display text-3xl font-bold">{value}</p></div>"#
        ));
    }
    html.push_str("</div>");

    html.push_str(
        r#"<div class="card-expressive p-6"><h3 class="text-lg font-bold mb-4">New shelf</h3><div class="flex gap-2"><input type="text" id="new-shelf-name" placeholder="Shelf name..." class="flex-grow rounded-xl p-3"><button id="add-shelf-btn" class="btn-expressive btn-primary whitespace-nowrap"><span class="material-symbols-outlined mr-2">add</span>Create</button></div></div>"#,
    );

    html.push_str(r#"<div id="shelves-container" class="space-y-8">"#);
    for shelf in snapshot.shelves_sorted() {
        html.push_str(&shelf_card(snapshot, shelf));
    }
    html.push_str("</div></div>");
    html
}

/// One shelf card: name, book count badge, delete button, preview strip.
pub fn shelf_card(snapshot: &Snapshot, shelf: &Shelf) -> String {
    let books = snapshot.books_on_shelf(&shelf.id);
    let id = escape_html(&shelf.id.to_string());

    let mut html = format!(
        r#"<div class="card-expressive p-6 shelf-container" data-shelf-id="{id}"><div class="flex items-center justify-between mb-4"><h2 class="text-xl font-bold flex items-center gap-2"><span class="material-symbols-outlined">shelves</span> {name} <span class="shelf-count text-sm rounded-full px-2">{count}</span></h2><div class="flex gap-2"><button class="delete-shelf-btn" data-shelf-id="{id}" title="Delete shelf"><span class="material-symbols-outlined">delete</span></button></div></div><div class="flex gap-4 overflow-x-auto pb-4">"#,
        name = escape_html(&shelf.name),
        count = books.len(),
    );

    if books.is_empty() {
        html.push_str(r#"<p class="text-neutral-500 italic text-sm">Empty shelf</p>"#);
    } else {
        for book in books.iter().take(PREVIEW_LEN) {
            html.push_str(&format!(
                r##"<a href="#/book/{}" class="flex-shrink-0 w-24"><img src="{}" alt="{}" class="w-full h-36 object-cover rounded shadow-md"></a>"##,
                escape_html(&book.id.to_string()),
                escape_html(&cover_url(book)),
                escape_html(&book.title),
            ));
        }
    }
    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstand_core::{Book, EntityId, ReadingStatus};

    fn on_shelf(id: i64, shelf: i64) -> Book {
        let mut book = Book::new(id, format!("Book {id}"));
        book.shelves.insert(EntityId::Numeric(shelf));
        book
    }

    #[test]
    fn preview_stops_at_seven() {
        let snapshot = Snapshot {
            books: (1..=10).map(|i| on_shelf(i, 5)).collect(),
            shelves: vec![Shelf::new(5, "Big")],
            ..Snapshot::default()
        };
        let html = shelf_card(&snapshot, &snapshot.shelves[0]);
        assert_eq!(html.matches("href=\"#/book/").count(), PREVIEW_LEN);
        assert!(html.contains(r#"<span class="shelf-count text-sm rounded-full px-2">10</span>"#));
    }

    #[test]
    fn empty_shelf_gets_a_note() {
        let snapshot = Snapshot {
            shelves: vec![Shelf::new(5, "Nothing")],
            ..Snapshot::default()
        };
        let html = shelf_card(&snapshot, &snapshot.shelves[0]);
        assert!(html.contains("Empty shelf"));
        assert!(html.contains(">0</span>"));
    }

    #[test]
    fn shelves_render_in_name_order() {
        let snapshot = Snapshot {
            shelves: vec![
                Shelf::new(1, "zines"),
                Shelf::new(2, "Art"),
                Shelf::new(3, "classics"),
            ],
            ..Snapshot::default()
        };
        let html = render(&snapshot);
        let art = html.find("> Art <").unwrap_or(usize::MAX);
        let classics = html.find("> classics <").unwrap_or(usize::MAX);
        let zines = html.find("> zines <").unwrap_or(usize::MAX);
        assert!(art < classics && classics < zines);
    }

    #[test]
    fn overview_counts_statuses() {
        let mut done = Book::new(1, "Done");
        done.status = ReadingStatus::Finished;
        let snapshot = Snapshot {
            books: vec![done, Book::new(2, "Later")],
            ..Snapshot::default()
        };
        let html = render(&snapshot);
        assert!(html.contains(r#"Total books</p><p class="font-display text-3xl font-bold">2<"#));
        assert!(html.contains(r#"Finished</p><p class="font-display text-3xl font-bold">1<"#));
        assert!(html.contains(r#"id="new-shelf-name""#));
    }

    #[test]
    fn shelf_names_are_escaped() {
        let snapshot = Snapshot {
            shelves: vec![Shelf::new(1, "<script>")],
            ..Snapshot::default()
        };
        let html = render(&snapshot);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
