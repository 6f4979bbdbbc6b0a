// bookstand-core: Domain model and application context between bookstand-api and consumers (CLI, view).

pub mod config;
pub mod convert;
pub mod error;
pub mod library;
pub mod model;
pub mod notify;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{LibraryConfig, TlsVerification};
pub use error::CoreError;
pub use library::{BookDraft, Library, ProfileUpdate};
pub use notify::{ConfirmAction, Notifier, Overlay, OverlayLevel};
pub use store::{DataStore, UiState};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Book, BookFilter, EntityId, Profile, ReadingMeta, ReadingStatus, Route, Shelf, Snapshot,
    Statistics, StatusCounts, StatusFilter, Theme,
};
