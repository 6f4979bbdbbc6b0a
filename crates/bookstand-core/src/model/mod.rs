// ── Domain model ──
//
// Canonical types consumed by the store, the views, and the CLI. Wire
// shapes from `bookstand_api` never leak past `convert`.

pub mod book;
pub mod entity_id;
pub mod filter;
pub mod profile;
pub mod route;
pub mod shelf;
pub mod snapshot;

pub use book::{Book, ReadingMeta, ReadingStatus};
pub use entity_id::EntityId;
pub use filter::{BookFilter, StatusFilter};
pub use profile::{Profile, Theme};
pub use route::Route;
pub use shelf::Shelf;
pub use snapshot::{Snapshot, Statistics, StatusCounts};
