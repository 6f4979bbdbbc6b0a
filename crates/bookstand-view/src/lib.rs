// bookstand-view: Renders library snapshots to HTML and routes fragment changes between pages and modals.

pub mod markup;
pub mod modal;
pub mod pages;
pub mod router;
pub mod shell;

pub use pages::PageId;
pub use router::{Router, Transition};
pub use shell::{NavLink, PageContainer, Shell};
