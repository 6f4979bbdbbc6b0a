// ── Reactive data store ──
//
// Whole-snapshot storage with push-based change notification.

mod data_store;
mod ui_state;

pub use data_store::DataStore;
pub use ui_state::UiState;
