//! Page identifiers and per-page renderers.

use std::fmt;

use bookstand_core::{Profile, Route, Snapshot, UiState};

use crate::markup::escape_html;

pub mod books;
pub mod profile;
pub mod settings;
pub mod shelves;
pub mod statistics;

/// Identifies each page container of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Shelves,
    MyBooks,
    Statistics,
    Tools,
    Profile,
    Settings,
}

impl PageId {
    /// All pages in navigation order.
    pub const ALL: [PageId; 6] = [
        Self::Shelves,
        Self::MyBooks,
        Self::Statistics,
        Self::Tools,
        Self::Profile,
        Self::Settings,
    ];

    /// Element id of the page's container.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Shelves => "page-estantes",
            Self::MyBooks => "page-meus-livros",
            Self::Statistics => "page-estatisticas",
            Self::Tools => "page-ferramentas",
            Self::Profile => "page-profile",
            Self::Settings => "page-settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Shelves => "Shelves",
            Self::MyBooks => "My Books",
            Self::Statistics => "Statistics",
            Self::Tools => "Tools",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
        }
    }

    /// Material symbol shown next to the nav label.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Shelves => "shelves",
            Self::MyBooks => "menu_book",
            Self::Statistics => "bar_chart",
            Self::Tools => "build",
            Self::Profile => "person",
            Self::Settings => "settings",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Self::Shelves => Route::Shelves,
            Self::MyBooks => Route::MyBooks,
            Self::Statistics => Route::Statistics,
            Self::Tools => Route::Tools,
            Self::Profile => Route::Profile,
            Self::Settings => Route::Settings,
        }
    }

    pub fn fragment(self) -> String {
        self.route().fragment()
    }

    /// The page a route shows. Modal routes have none.
    pub fn for_route(route: &Route) -> Option<Self> {
        match route {
            Route::Shelves => Some(Self::Shelves),
            Route::MyBooks => Some(Self::MyBooks),
            Route::Statistics => Some(Self::Statistics),
            Route::Tools => Some(Self::Tools),
            Route::Profile => Some(Self::Profile),
            Route::Settings => Some(Self::Settings),
            Route::AddBook | Route::ViewBook(_) | Route::EditBook(_) => None,
        }
    }

    /// Render this page's content from the snapshot and UI state.
    pub fn render(self, snapshot: &Snapshot, ui: &UiState) -> String {
        match self {
            Self::Shelves => shelves::render(snapshot),
            Self::MyBooks => books::render(snapshot, &ui.filter),
            Self::Statistics => statistics::render(snapshot),
            Self::Tools => tools(&snapshot.profile),
            Self::Profile => profile::render(&snapshot.profile),
            Self::Settings => settings::render(&snapshot.profile),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Page header: title plus the user's avatar or a placeholder glyph.
pub fn header(title: &str, profile: &Profile) -> String {
    let avatar = match profile.avatar.as_deref().filter(|a| !a.trim().is_empty()) {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" class="avatar w-10 h-10 rounded-full">"#,
            escape_html(src),
            escape_html(&profile.name)
        ),
        None => r#"<span class="material-symbols-outlined text-3xl">account_circle</span>"#.into(),
    };
    format!(
        r#"<header class="mb-8 flex items-center justify-between"><h1 class="font-display text-4xl font-bold">{}</h1><div class="flex items-center gap-4">{avatar}</div></header>"#,
        escape_html(title)
    )
}

fn tools(profile: &Profile) -> String {
    format!(
        r#"<div class="max-w-6xl mx-auto space-y-8">{}<p class="text-neutral-500 italic">Nothing here yet.</p></div>"#,
        header(PageId::Tools.label(), profile)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_page_maps_back_from_its_route() {
        for page in PageId::ALL {
            assert_eq!(PageId::for_route(&page.route()), Some(page));
        }
        assert_eq!(PageId::for_route(&Route::AddBook), None);
    }

    #[test]
    fn fragments_match_dom_ids() {
        assert_eq!(PageId::MyBooks.fragment(), "#/meus-livros");
        assert_eq!(PageId::MyBooks.dom_id(), "page-meus-livros");
        assert_eq!(PageId::Statistics.fragment(), "#/estatisticas");
    }

    #[test]
    fn header_uses_glyph_without_avatar() {
        let html = header("Shelves", &Profile::default());
        assert!(html.contains("account_circle"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn header_escapes_avatar_source() {
        let profile = Profile {
            avatar: Some(r#"/a.png" onerror="x"#.into()),
            name: "Ana".into(),
            ..Profile::default()
        };
        let html = header("<Shelves>", &profile);
        assert!(html.contains(r#"src="/a.png&quot; onerror=&quot;x""#));
        assert!(html.contains("&lt;Shelves&gt;"));
    }
}
