// ── Books grid ──

use strum::IntoEnumIterator;

use bookstand_core::{Book, BookFilter, ReadingStatus, Snapshot, StatusFilter};

use super::{PageId, header};
use crate::markup::{cover_url, escape_html, option, percent};

/// Full page: search box, status select, and the grid. The current search
/// term and status selection are written back into the controls.
pub fn render(snapshot: &Snapshot, filter: &BookFilter) -> String {
    let mut html = String::from(r#"<div class="max-w-6xl mx-auto space-y-6">"#);
    html.push_str(&header(PageId::MyBooks.label(), &snapshot.profile));

    html.push_str(&format!(
        r#"<div class="flex gap-4 mb-6"><input type="search" id="book-search" placeholder="Search..." class="w-full rounded-xl p-3" value="{}"><select id="status-filter" class="rounded-xl p-3">"#,
        escape_html(&filter.search)
    ));
    for status in StatusFilter::iter() {
        html.push_str(&option(
            status.wire_value(),
            status.label(),
            status == filter.status,
        ));
    }
    html.push_str("</select></div>");

    html.push_str(r#"<div id="books-grid" class="grid grid-cols-2 md:grid-cols-4 lg:grid-cols-5 gap-6">"#);
    html.push_str(&grid(snapshot, filter));
    html.push_str("</div></div>");
    html
}

/// Grid contents only.
pub fn grid(snapshot: &Snapshot, filter: &BookFilter) -> String {
    let books = snapshot.filtered_books(filter);
    if books.is_empty() {
        return r#"<p class="col-span-full text-neutral-500 italic">No books match.</p>"#.into();
    }
    books.into_iter().map(card).collect()
}

pub fn card(book: &Book) -> String {
    let progress = if book.status == ReadingStatus::Reading {
        format!(
            r#"<div class="progress w-full h-1 mt-1 rounded-full"><div class="progress-bar h-1 rounded-full" style="width: {}%"></div></div>"#,
            percent(book.progress.unwrap_or(0.0))
        )
    } else {
        String::new()
    };

    format!(
        r##"<a href="#/book/{id}" class="book-card group relative block rounded-xl overflow-hidden" data-status="{status}"><img src="{cover}" alt="{title}" class="w-full h-full object-cover"><div class="absolute bottom-0 left-0 w-full p-2"><p class="text-sm font-bold truncate">{title}</p><p class="text-xs truncate">{author}</p>{progress}</div></a>"##,
        id = escape_html(&book.id.to_string()),
        status = book.status.wire_value(),
        cover = escape_html(&cover_url(book)),
        title = escape_html(&book.title),
        author = escape_html(&book.author),
    )
}
