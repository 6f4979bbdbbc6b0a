// ── API-to-domain type conversions ──
//
// Bridges raw `bookstand_api` wire types into `bookstand_core::model`
// types and back. Missing or oddly-typed fields fall back to defaults so a
// partially filled record still yields a usable book.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};

use bookstand_api::models::{
    BookPayload, BookRecord, DataResponse, ProfilePayload, ProgressRecord, ReadingData,
    ShelfRecord, UserRecord,
};
use bookstand_api::RecordId;

use crate::library::{BookDraft, ProfileUpdate};
use crate::model::{Book, EntityId, Profile, ReadingMeta, ReadingStatus, Shelf, Snapshot, Theme};

// ── Ids ────────────────────────────────────────────────────────────

impl From<RecordId> for EntityId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(n) => EntityId::Numeric(n),
            RecordId::Text(s) => EntityId::from(s),
        }
    }
}

impl From<&EntityId> for RecordId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Numeric(n) => RecordId::Int(*n),
            EntityId::Key(s) => RecordId::Text(s.clone()),
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Server timestamps are ISO-8601, with or without an offset.
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn clamp_progress(percent: Option<f64>) -> Option<f64> {
    percent.filter(|p| p.is_finite()).map(|p| p.clamp(0.0, 1.0))
}

// ── Snapshot ───────────────────────────────────────────────────────

/// Merge a `GET data` payload into a fresh snapshot.
pub fn snapshot_from_data(data: DataResponse, fetched_at: DateTime<Utc>) -> Snapshot {
    let DataResponse {
        books,
        mut progress,
        shelves,
        user,
    } = data;

    let books = books
        .into_iter()
        .map(|record| {
            let entry = progress.remove(&record.id.to_string());
            book_from_records(record, entry)
        })
        .collect();

    Snapshot {
        books,
        shelves: shelves.into_iter().map(Shelf::from).collect(),
        profile: Profile::from(user),
        fetched_at: Some(fetched_at),
    }
}

/// Combine a catalogue record with the user's progress entry.
///
/// Status policy: a recognised saved status wins, otherwise it is derived
/// from the progress fraction.
pub fn book_from_records(record: BookRecord, progress: Option<ProgressRecord>) -> Book {
    let ProgressRecord {
        percent,
        last_modified,
        data,
        ..
    } = progress.unwrap_or_default();
    let data = data.unwrap_or_default();

    let status = ReadingStatus::resolve(data.status.as_deref(), percent);

    let mut shelves: BTreeSet<EntityId> = record
        .shelves
        .unwrap_or_default()
        .into_iter()
        .map(EntityId::from)
        .collect();
    shelves.extend(data.shelves.iter().flatten().cloned().map(EntityId::from));

    Book {
        id: record.id.into(),
        title: record.title.unwrap_or_default(),
        author: record.author.unwrap_or_default(),
        cover: record.cover,
        cover_url: data.cover_url.clone(),
        series: record.series,
        series_index: record.series_index,
        status,
        progress: clamp_progress(percent),
        shelves,
        meta: ReadingMeta::from(data),
        last_read: parse_timestamp(last_modified.as_deref()),
    }
}

impl From<ReadingData> for ReadingMeta {
    fn from(data: ReadingData) -> Self {
        Self {
            rating: data.rating,
            feelings: data.feelings,
            start_date: data.start_date,
            end_date: data.end_date,
            media_type: data.media_type,
            total_pages: data.total_pages,
            total_time: data.total_time,
            review: data.review,
            synopsis: data.synopsis,
            favorite: data.favorite.unwrap_or(false),
        }
    }
}

impl From<ShelfRecord> for Shelf {
    fn from(record: ShelfRecord) -> Self {
        Self {
            id: record.id.into(),
            name: record.name.unwrap_or_default(),
            is_public: record.is_public.unwrap_or(false),
        }
    }
}

impl From<UserRecord> for Profile {
    fn from(user: UserRecord) -> Self {
        Self {
            theme: Theme::from_wire(user.theme.as_deref()),
            avatar: user.avatar,
            name: user.name.unwrap_or_default(),
        }
    }
}

// ── Outgoing payloads ──────────────────────────────────────────────

impl From<&BookDraft> for BookPayload {
    fn from(draft: &BookDraft) -> Self {
        Self {
            id: draft.id.as_ref().map(RecordId::from),
            status: draft.status.map(|s| s.wire_value().to_owned()),
            rating: draft.rating,
            feelings: draft.feelings.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            media_type: draft.media_type.clone(),
            total_pages: draft.total_pages,
            total_time: draft.total_time.clone(),
            review: draft.review.clone(),
            synopsis: draft.synopsis.clone(),
            favorite: draft.favorite,
            cover_url: draft.cover_url.clone(),
            shelves: draft
                .shelves
                .as_ref()
                .map(|ids| ids.iter().map(RecordId::from).collect()),
        }
    }
}

impl From<&ProfileUpdate> for ProfilePayload {
    fn from(update: &ProfileUpdate) -> Self {
        Self {
            theme: update.theme.map(|t| t.wire_value().to_owned()),
            name: update.name.clone(),
        }
    }
}
