//! Small HTML helpers shared by pages and modals.

use bookstand_core::Book;

const PLACEHOLDER_COVER: &str = "https://placehold.co/128x194/1a1a1a/ffffff";

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Pick the cover image for a book.
///
/// An explicit remote URL wins unless it is itself a generated placeholder,
/// then the library's own cover, then a placeholder labelled with the title.
pub fn cover_url(book: &Book) -> String {
    if let Some(url) = book
        .cover_url
        .as_deref()
        .filter(|u| !u.trim().is_empty() && !u.contains("placehold.co"))
    {
        return url.to_owned();
    }
    if let Some(cover) = book.cover.as_deref().filter(|c| !c.trim().is_empty()) {
        return cover.to_owned();
    }

    let label = if book.title.trim().is_empty() {
        "No cover"
    } else {
        book.title.as_str()
    };
    let text: String = url::form_urlencoded::byte_serialize(label.as_bytes()).collect();
    format!("{PLACEHOLDER_COVER}?text={text}")
}

/// Format a 0-1 fraction as a percentage without trailing zeros
/// (`0.5` -> `"50"`, `0.125` -> `"12.5"`).
pub fn percent(fraction: f64) -> String {
    let pct = if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let fixed = format!("{pct:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// `<option>` with the `selected` attribute when `selected` holds.
pub(crate) fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn explicit_cover_url_wins() {
        let mut book = Book::new(1, "Dune");
        book.cover = Some("/cover/1".into());
        book.cover_url = Some("https://covers.example/dune.jpg".into());
        assert_eq!(cover_url(&book), "https://covers.example/dune.jpg");
    }

    #[test]
    fn placeholder_cover_url_is_skipped() {
        let mut book = Book::new(1, "Dune");
        book.cover = Some("/cover/1".into());
        book.cover_url = Some("https://placehold.co/128x194?text=old".into());
        assert_eq!(cover_url(&book), "/cover/1");
    }

    #[test]
    fn generated_placeholder_carries_title() {
        let book = Book::new(1, "War & Peace");
        assert_eq!(
            cover_url(&book),
            "https://placehold.co/128x194/1a1a1a/ffffff?text=War+%26+Peace"
        );
        assert!(cover_url(&Book::new(2, "")).ends_with("?text=No+cover"));
    }

    #[test]
    fn percent_trims_zeros() {
        assert_eq!(percent(0.5), "50");
        assert_eq!(percent(0.125), "12.5");
        assert_eq!(percent(0.0), "0");
        assert_eq!(percent(1.0), "100");
        assert_eq!(percent(f64::NAN), "0");
        assert_eq!(percent(3.0), "100");
    }

    #[test]
    fn option_marks_selection() {
        assert_eq!(
            option("lido", "Finished", true),
            r#"<option value="lido" selected>Finished</option>"#
        );
        assert_eq!(option("a&b", "A", false), r#"<option value="a&amp;b">A</option>"#);
    }
}
