// ── Fragment routes ──
//
// The part of the URL after `#` selects either a page or a modal. Anything
// unrecognised lands on the shelves page.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Shelves,
    MyBooks,
    Statistics,
    Tools,
    Profile,
    Settings,
    AddBook,
    ViewBook(EntityId),
    EditBook(EntityId),
}

impl Route {
    /// Parse a fragment such as `#/book/42`. The leading `#` and `/` are
    /// optional; unmatched input yields [`Route::Shelves`].
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.strip_prefix('/').unwrap_or(path);

        let mut segments = path.split('/');
        let head = segments.next().unwrap_or_default();
        let id = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(EntityId::from);

        match (head, id) {
            ("estantes", None) => Self::Shelves,
            ("meus-livros", None) => Self::MyBooks,
            ("estatisticas", None) => Self::Statistics,
            ("ferramentas", None) => Self::Tools,
            ("profile", None) => Self::Profile,
            ("settings", None) => Self::Settings,
            ("add", None) => Self::AddBook,
            ("book", Some(id)) => Self::ViewBook(id),
            ("edit", Some(id)) => Self::EditBook(id),
            _ => Self::Shelves,
        }
    }

    /// Canonical fragment, including the leading `#`.
    pub fn fragment(&self) -> String {
        match self {
            Self::Shelves => "#/estantes".into(),
            Self::MyBooks => "#/meus-livros".into(),
            Self::Statistics => "#/estatisticas".into(),
            Self::Tools => "#/ferramentas".into(),
            Self::Profile => "#/profile".into(),
            Self::Settings => "#/settings".into(),
            Self::AddBook => "#/add".into(),
            Self::ViewBook(id) => format!("#/book/{id}"),
            Self::EditBook(id) => format!("#/edit/{id}"),
        }
    }

    /// Modal routes open an overlay instead of switching pages.
    pub fn is_modal(&self) -> bool {
        matches!(self, Self::AddBook | Self::ViewBook(_) | Self::EditBook(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_page_routes() {
        assert_eq!(Route::parse("#/estantes"), Route::Shelves);
        assert_eq!(Route::parse("#/meus-livros"), Route::MyBooks);
        assert_eq!(Route::parse("#/estatisticas"), Route::Statistics);
        assert_eq!(Route::parse("#/ferramentas"), Route::Tools);
        assert_eq!(Route::parse("#/profile"), Route::Profile);
        assert_eq!(Route::parse("/settings"), Route::Settings);
        assert_eq!(Route::parse("add"), Route::AddBook);
    }

    #[test]
    fn parses_book_ids() {
        assert_eq!(Route::parse("#/book/42"), Route::ViewBook(EntityId::Numeric(42)));
        assert_eq!(
            Route::parse("#/edit/abc"),
            Route::EditBook(EntityId::Key("abc".into()))
        );
        assert_eq!(Route::parse("#/book/42/extra"), Route::ViewBook(EntityId::Numeric(42)));
    }

    #[test]
    fn unmatched_falls_back_to_shelves() {
        assert_eq!(Route::parse(""), Route::Shelves);
        assert_eq!(Route::parse("#/nowhere"), Route::Shelves);
        assert_eq!(Route::parse("#/book/"), Route::Shelves);
        assert_eq!(Route::parse("#/estantes/3"), Route::Shelves);
    }

    #[test]
    fn fragments_round_trip() {
        for route in [
            Route::Shelves,
            Route::MyBooks,
            Route::Statistics,
            Route::Tools,
            Route::Profile,
            Route::Settings,
            Route::AddBook,
            Route::ViewBook(EntityId::Numeric(5)),
            Route::EditBook(EntityId::Key("x".into())),
        ] {
            assert_eq!(Route::parse(&route.fragment()), route);
        }
    }

    #[test]
    fn modal_routes() {
        assert!(Route::AddBook.is_modal());
        assert!(Route::ViewBook(EntityId::Numeric(1)).is_modal());
        assert!(!Route::MyBooks.is_modal());
    }
}
