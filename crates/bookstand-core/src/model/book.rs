// ── Book domain type ──

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::EntityId;

/// Reading state of a book. Always one of three values.
///
/// `Display`/`FromStr` use the English names; parsing also accepts the
/// backend's stored vocabulary (see [`wire_value`](Self::wire_value)).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ReadingStatus {
    #[default]
    #[strum(to_string = "wanted", serialize = "quero-ler")]
    Wanted,
    #[strum(to_string = "reading", serialize = "lendo")]
    Reading,
    #[strum(to_string = "finished", serialize = "lido")]
    Finished,
}

impl ReadingStatus {
    /// Value stored by the backend.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Wanted => "quero-ler",
            Self::Reading => "lendo",
            Self::Finished => "lido",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wanted => "Want to read",
            Self::Reading => "Reading",
            Self::Finished => "Finished",
        }
    }

    /// Derive a status from a progress fraction alone.
    pub fn from_progress(progress: Option<f64>) -> Self {
        match progress {
            Some(p) if p >= 1.0 => Self::Finished,
            Some(p) if p > 0.0 => Self::Reading,
            _ => Self::Wanted,
        }
    }

    /// A recognised saved status wins; otherwise derive from progress.
    /// Unrecognised saved values (e.g. `abandonado`) count as absent.
    pub fn resolve(saved: Option<&str>, progress: Option<f64>) -> Self {
        saved
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(|| Self::from_progress(progress))
    }
}

/// User-entered reading metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingMeta {
    pub rating: Option<f64>,
    pub feelings: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub media_type: Option<String>,
    pub total_pages: Option<u32>,
    pub total_time: Option<String>,
    pub review: Option<String>,
    pub synopsis: Option<String>,
    pub favorite: bool,
}

/// A book in the user's library.
///
/// Only ever built from a fetched snapshot; mutations go through
/// [`Library`](crate::Library) and come back via a full refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub author: String,
    /// Cover served by the library itself.
    pub cover: Option<String>,
    /// Explicit remote cover chosen by the user.
    pub cover_url: Option<String>,
    pub series: Option<String>,
    pub series_index: Option<f64>,
    pub status: ReadingStatus,
    /// Read position, 0.0 to 1.0.
    pub progress: Option<f64>,
    pub shelves: BTreeSet<EntityId>,
    pub meta: ReadingMeta,
    pub last_read: Option<DateTime<Utc>>,
}

impl Book {
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: String::new(),
            cover: None,
            cover_url: None,
            series: None,
            series_index: None,
            status: ReadingStatus::Wanted,
            progress: None,
            shelves: BTreeSet::new(),
            meta: ReadingMeta::default(),
            last_read: None,
        }
    }

    pub fn is_on_shelf(&self, shelf: &EntityId) -> bool {
        self.shelves.contains(shelf)
    }

    /// Progress as a percentage, 0 when unknown.
    pub fn progress_percent(&self) -> f64 {
        self.progress.unwrap_or(0.0) * 100.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn progress_thresholds() {
        assert_eq!(ReadingStatus::from_progress(None), ReadingStatus::Wanted);
        assert_eq!(ReadingStatus::from_progress(Some(0.0)), ReadingStatus::Wanted);
        assert_eq!(ReadingStatus::from_progress(Some(-0.5)), ReadingStatus::Wanted);
        assert_eq!(ReadingStatus::from_progress(Some(0.01)), ReadingStatus::Reading);
        assert_eq!(ReadingStatus::from_progress(Some(0.999)), ReadingStatus::Reading);
        assert_eq!(ReadingStatus::from_progress(Some(1.0)), ReadingStatus::Finished);
        assert_eq!(ReadingStatus::from_progress(Some(f64::NAN)), ReadingStatus::Wanted);
    }

    #[test]
    fn saved_status_overrides_progress() {
        assert_eq!(
            ReadingStatus::resolve(Some("lido"), Some(0.2)),
            ReadingStatus::Finished
        );
        assert_eq!(
            ReadingStatus::resolve(Some("quero-ler"), Some(1.0)),
            ReadingStatus::Wanted
        );
    }

    #[test]
    fn unknown_saved_status_falls_back_to_progress() {
        assert_eq!(
            ReadingStatus::resolve(Some("abandonado"), Some(0.5)),
            ReadingStatus::Reading
        );
        assert_eq!(ReadingStatus::resolve(Some(""), None), ReadingStatus::Wanted);
    }

    #[test]
    fn parses_english_and_wire_names() {
        assert_eq!("Reading".parse::<ReadingStatus>().unwrap(), ReadingStatus::Reading);
        assert_eq!("lendo".parse::<ReadingStatus>().unwrap(), ReadingStatus::Reading);
        assert_eq!(ReadingStatus::Finished.to_string(), "finished");
        assert_eq!(ReadingStatus::Finished.wire_value(), "lido");
    }

    #[test]
    fn progress_percent_defaults_to_zero() {
        let mut book = Book::new(1, "Dune");
        assert!(book.progress_percent().abs() < f64::EPSILON);
        book.progress = Some(0.5);
        assert!((book.progress_percent() - 50.0).abs() < f64::EPSILON);
    }
}
