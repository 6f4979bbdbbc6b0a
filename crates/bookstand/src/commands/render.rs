//! Render the web shell for a fragment route.
//!
//! Runs the same navigation the browser shell does and prints the
//! resulting markup: the visible page, the open modal, or the full
//! document with `--document`.

use tracing::debug;

use bookstand_core::{Library, ReadingStatus, Route, StatusFilter};
use bookstand_view::{PageId, Shell, Transition};

use crate::cli::{GlobalOpts, RenderArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(library: &Library, args: RenderArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let RenderArgs {
        fragment,
        document,
        search,
        status,
    } = args;

    let store = library.store();
    if let Some(term) = search {
        store.set_search(term);
    }
    if let Some(status) = status {
        store.set_status_filter(StatusFilter::from(ReadingStatus::from(status)));
    }

    let mut shell = Shell::new(library.clone());
    if Route::parse(&fragment).is_modal() {
        // A modal needs a page beneath it.
        shell.navigate(&PageId::default().fragment());
    }
    let transition = shell.navigate(&fragment);
    debug!(?transition, route = %shell.route(), "rendered");

    let html = if document {
        shell.to_html()
    } else {
        match transition {
            Transition::ShowPage(page) => shell
                .page(page)
                .map(|c| c.html.clone())
                .unwrap_or_default(),
            Transition::OpenModal(_) => shell.overlay_html().unwrap_or_default(),
        }
    };
    output::print_output(&html, global.quiet);
    Ok(())
}
