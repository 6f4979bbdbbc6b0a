// ── Book grid filtering ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::book::{Book, ReadingStatus};

/// Status selector of the books grid.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum StatusFilter {
    #[default]
    #[strum(to_string = "all", serialize = "todos")]
    All,
    #[strum(to_string = "wanted", serialize = "quero-ler")]
    Wanted,
    #[strum(to_string = "reading", serialize = "lendo")]
    Reading,
    #[strum(to_string = "finished", serialize = "lido")]
    Finished,
}

impl StatusFilter {
    /// The single status this filter admits, or `None` for all.
    pub fn status(self) -> Option<ReadingStatus> {
        match self {
            Self::All => None,
            Self::Wanted => Some(ReadingStatus::Wanted),
            Self::Reading => Some(ReadingStatus::Reading),
            Self::Finished => Some(ReadingStatus::Finished),
        }
    }

    /// Option value used by the status select.
    pub fn wire_value(self) -> &'static str {
        self.status().map_or("todos", ReadingStatus::wire_value)
    }

    pub fn label(self) -> &'static str {
        self.status().map_or("All", ReadingStatus::label)
    }
}

impl From<ReadingStatus> for StatusFilter {
    fn from(status: ReadingStatus) -> Self {
        match status {
            ReadingStatus::Wanted => Self::Wanted,
            ReadingStatus::Reading => Self::Reading,
            ReadingStatus::Finished => Self::Finished,
        }
    }
}

/// Search term plus status selector. Both combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl BookFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Case-insensitive title substring match combined with status equality.
    /// An empty search term matches every title.
    pub fn matches(&self, book: &Book) -> bool {
        let status_ok = self.status.status().is_none_or(|s| book.status == s);
        status_ok
            && (self.search.is_empty()
                || book.title.to_lowercase().contains(&self.search.to_lowercase()))
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status == StatusFilter::All
    }
}
