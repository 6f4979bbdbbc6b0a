use serde::Serialize;

use crate::model::{BookFilter, Route};

/// Client-only view state: the grid filter and the current route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub filter: BookFilter,
    pub route: Route,
}
