// ── Fragment router ──
//
// Turns fragment changes into transitions. Page routes switch the visible
// container; modal routes open the overlay on top of whichever page was
// last shown.

use tracing::debug;

use bookstand_core::Route;

use crate::pages::PageId;

/// What the document should do for a route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    ShowPage(PageId),
    OpenModal(Route),
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
    page: PageId,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active route, modal or not.
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Last page shown. Stays put while a modal is open.
    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn navigate(&mut self, fragment: &str) -> Transition {
        self.go(Route::parse(fragment))
    }

    pub fn go(&mut self, route: Route) -> Transition {
        debug!(%route, "navigate");
        let transition = match PageId::for_route(&route) {
            Some(page) => {
                self.page = page;
                Transition::ShowPage(page)
            }
            None => Transition::OpenModal(route.clone()),
        };
        self.current = route;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstand_core::EntityId;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_fragments_show_pages() {
        let mut router = Router::new();
        assert_eq!(
            router.navigate("#/meus-livros"),
            Transition::ShowPage(PageId::MyBooks)
        );
        assert_eq!(router.page(), PageId::MyBooks);
        assert_eq!(router.current(), &Route::MyBooks);
    }

    #[test]
    fn book_fragment_opens_modal_keyed_to_id() {
        let mut router = Router::new();
        router.navigate("#/estatisticas");
        assert_eq!(
            router.navigate("#/book/42"),
            Transition::OpenModal(Route::ViewBook(EntityId::Numeric(42)))
        );
        // Page beneath is unchanged.
        assert_eq!(router.page(), PageId::Statistics);
    }

    #[test]
    fn unmatched_fragment_shows_shelves() {
        let mut router = Router::new();
        router.navigate("#/settings");
        assert_eq!(
            router.navigate("#/no/such/place"),
            Transition::ShowPage(PageId::Shelves)
        );
        assert_eq!(router.current(), &Route::Shelves);
    }
}
