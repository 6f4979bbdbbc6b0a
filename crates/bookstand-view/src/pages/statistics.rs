// ── Statistics page ──

use bookstand_core::Snapshot;

use super::{PageId, header};

pub fn render(snapshot: &Snapshot) -> String {
    let stats = snapshot.statistics();
    let average = stats
        .average_rating
        .map_or_else(|| "-".to_owned(), |r| format!("{r:.1}"));

    let mut html = String::from(r#"<div class="max-w-6xl mx-auto space-y-8">"#);
    html.push_str(&header(PageId::Statistics.label(), &snapshot.profile));
    html.push_str(r#"<dl class="stats grid grid-cols-2 md:grid-cols-4 gap-4">"#);
    for (label, value) in [
        ("Books", stats.counts.total.to_string()),
        ("Finished", stats.counts.finished.to_string()),
        ("Reading", stats.counts.reading.to_string()),
        ("Want to read", stats.counts.wanted.to_string()),
        ("Favorites", stats.favorites.to_string()),
        ("Average rating", average),
        ("Pages read", stats.pages_read.to_string()),
        ("Shelves", stats.shelves.to_string()),
    ] {
        html.push_str(&format!(
            r#"<div class="card-expressive p-4"><dt class="text-sm text-neutral-400">{label}</dt><dd class="font-display text-3xl font-bold">{value}</dd></div>"#
        ));
    }
    html.push_str("</dl></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstand_core::{Book, ReadingStatus};

    #[test]
    fn shows_average_and_pages() {
        let mut a = Book::new(1, "A");
        a.status = ReadingStatus::Finished;
        a.meta.total_pages = Some(320);
        a.meta.rating = Some(4.0);
        let mut b = Book::new(2, "B");
        b.meta.rating = Some(3.0);
        let snapshot = Snapshot {
            books: vec![a, b],
            ..Snapshot::default()
        };

        let html = render(&snapshot);
        assert!(html.contains(r#"Average rating</dt><dd class="font-display text-3xl font-bold">3.5<"#));
        assert!(html.contains(r#"Pages read</dt><dd class="font-display text-3xl font-bold">320<"#));
    }

    #[test]
    fn empty_library_has_no_average() {
        let html = render(&Snapshot::default());
        assert!(html.contains(r#"Average rating</dt><dd class="font-display text-3xl font-bold">-<"#));
    }
}
