use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A user-defined collection of books.
///
/// Membership is held on the book side ([`Book::shelves`](super::Book::shelves));
/// a shelf's contents are always derived from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: EntityId,
    pub name: String,
    pub is_public: bool,
}

impl Shelf {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_public: false,
        }
    }
}
