// ── Document shell ──
//
// The rendered document: one container per page, the nav links, the theme
// class, and the overlay. Views read the library snapshot and UI state from
// the `Library` they are given; nothing here is global.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use bookstand_core::{
    BookDraft, ConfirmAction, CoreError, EntityId, Library, OverlayLevel, ProfileUpdate, Route,
    StatusFilter, Theme,
};

use crate::markup::escape_html;
use crate::modal;
use crate::pages::PageId;
use crate::router::{Router, Transition};

/// One page's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContainer {
    pub hidden: bool,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub page: PageId,
    pub href: String,
    pub active: bool,
}

pub struct Shell {
    library: Library,
    router: Router,
    pages: IndexMap<PageId, PageContainer>,
    nav: Vec<NavLink>,
}

impl Shell {
    /// Every container starts hidden and empty until the first navigation.
    pub fn new(library: Library) -> Self {
        let pages = PageId::ALL
            .into_iter()
            .map(|page| {
                (
                    page,
                    PageContainer {
                        hidden: true,
                        html: String::new(),
                    },
                )
            })
            .collect();
        let nav = PageId::ALL
            .into_iter()
            .map(|page| NavLink {
                page,
                href: page.fragment(),
                active: false,
            })
            .collect();
        Self {
            library,
            router: Router::new(),
            pages,
            nav,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    /// Handle a fragment change.
    pub fn navigate(&mut self, fragment: &str) -> Transition {
        let transition = self.router.navigate(fragment);
        self.library.store().set_route(self.router.current().clone());

        match &transition {
            Transition::ShowPage(page) => {
                for container in self.pages.values_mut() {
                    container.hidden = true;
                }
                if let Some(container) = self.pages.get_mut(page) {
                    container.hidden = false;
                }
                let href = self.router.current().fragment();
                for link in &mut self.nav {
                    link.active = link.href == href;
                }
                self.render_page(*page);
            }
            Transition::OpenModal(route) => self.open_modal(route),
        }
        transition
    }

    /// Re-run the current route against the latest snapshot. A modal is only
    /// redrawn while it still owns the overlay.
    pub fn rerender(&mut self) {
        let page = self.router.page();
        if self.pages.get(&page).is_some_and(|c| !c.hidden) {
            self.render_page(page);
        }

        let route = self.router.current().clone();
        let modal_open = self
            .library
            .notifier()
            .current()
            .is_some_and(|o| o.level == OverlayLevel::Modal);
        if route.is_modal() && modal_open {
            self.open_modal(&route);
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.library.store().set_search(term);
        self.refresh_grid();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.library.store().set_status_filter(status);
        self.refresh_grid();
    }

    /// Hide the overlay. Closing a modal returns to the page beneath it.
    pub fn close_overlay(&mut self) {
        self.library.notifier().hide();
        if self.router.current().is_modal() {
            let route = self.router.page().route();
            self.router.go(route.clone());
            self.library.store().set_route(route);
        }
    }

    // ── Mutations ────────────────────────────────────────────────────
    //
    // Each forwards to the library, which refetches on success; the current
    // route is then re-run against the new snapshot. On failure the store is
    // untouched and the error overlay is already up.

    pub async fn save_book(&mut self, draft: BookDraft) -> Result<EntityId, CoreError> {
        let result = self.library.save_book(draft).await;
        self.after_mutation(result)
    }

    pub async fn create_shelf(&mut self, name: &str) -> Result<EntityId, CoreError> {
        let result = self.library.create_shelf(name).await;
        self.after_mutation(result)
    }

    /// Fire the pending delete confirmation.
    pub async fn confirm(&mut self) -> Result<ConfirmAction, CoreError> {
        let result = self.library.confirm().await;
        self.after_mutation(result)
    }

    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), CoreError> {
        let result = self.library.update_profile(update).await;
        self.after_mutation(result)
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), CoreError> {
        let result = self.library.set_theme(theme).await;
        self.after_mutation(result)
    }

    pub async fn upload_avatar(&mut self, path: &Path) -> Result<String, CoreError> {
        let result = self.library.upload_avatar(path).await;
        self.after_mutation(result)
    }

    // ── Document state ───────────────────────────────────────────────

    pub fn page(&self, id: PageId) -> Option<&PageContainer> {
        self.pages.get(&id)
    }

    pub fn visible_page(&self) -> Option<PageId> {
        self.pages
            .iter()
            .find(|(_, c)| !c.hidden)
            .map(|(id, _)| *id)
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.nav
    }

    pub fn theme_class(&self) -> String {
        format!("theme-{}", self.library.snapshot().profile.theme.wire_value())
    }

    pub fn overlay_html(&self) -> Option<String> {
        self.library.notifier().current().map(|o| modal::overlay(&o))
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<!DOCTYPE html><html lang="en" class="{}"><head><meta charset="utf-8"><title>Bookstand</title></head><body><nav id="desktop-nav">"#,
            self.theme_class()
        );
        for link in &self.nav {
            html.push_str(&format!(
                r#"<a href="{}" class="{}"><span class="material-symbols-outlined">{}</span>{}</a>"#,
                escape_html(&link.href),
                if link.active { "nav-link active" } else { "nav-link" },
                link.page.icon(),
                link.page.label(),
            ));
        }
        html.push_str("</nav><main>");
        for (id, container) in &self.pages {
            html.push_str(&format!(
                r#"<section id="{}" class="page{}">{}</section>"#,
                id.dom_id(),
                if container.hidden { " hidden" } else { "" },
                container.html
            ));
        }
        html.push_str("</main>");
        if let Some(overlay) = self.overlay_html() {
            html.push_str(&overlay);
        }
        html.push_str("</body></html>");
        html
    }

    // ── Internals ────────────────────────────────────────────────────

    fn after_mutation<T>(&mut self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        if result.is_ok() {
            self.rerender();
        }
        result
    }

    fn render_page(&mut self, page: PageId) {
        let snapshot = self.library.snapshot();
        let ui = self.library.store().ui();
        let html = page.render(&snapshot, &ui);
        debug!(page = %page, bytes = html.len(), "rendered page");
        if let Some(container) = self.pages.get_mut(&page) {
            container.html = html;
        }
    }

    fn open_modal(&self, route: &Route) {
        let snapshot = self.library.snapshot();
        if let Some((title, markup)) = modal::for_route(route, &snapshot) {
            self.library.notifier().modal(title, markup);
        }
    }

    fn refresh_grid(&mut self) {
        if self.router.page() == PageId::MyBooks
            && self.pages.get(&PageId::MyBooks).is_some_and(|c| !c.hidden)
        {
            self.render_page(PageId::MyBooks);
        }
    }
}
