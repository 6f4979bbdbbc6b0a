// ── Point-in-time library snapshot ──
//
// Everything a view needs, fetched wholesale. Derived collections (shelf
// contents, counts, statistics) are computed on demand and never stored.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::book::{Book, ReadingStatus};
use super::entity_id::EntityId;
use super::filter::BookFilter;
use super::profile::Profile;
use super::shelf::Shelf;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub shelves: Vec<Shelf>,
    pub profile: Profile,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Book counts per reading status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub wanted: usize,
    pub reading: usize,
    pub finished: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::Wanted => self.wanted,
            ReadingStatus::Reading => self.reading,
            ReadingStatus::Finished => self.finished,
        }
    }
}

/// Aggregate reading statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub counts: StatusCounts,
    pub favorites: usize,
    pub rated: usize,
    pub average_rating: Option<f64>,
    /// Sum of page counts over finished books.
    pub pages_read: u64,
    pub shelves: usize,
}

impl Snapshot {
    pub fn book(&self, id: &EntityId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn shelf(&self, id: &EntityId) -> Option<&Shelf> {
        self.shelves.iter().find(|s| &s.id == id)
    }

    /// Books whose shelf set contains `shelf`, in snapshot order.
    pub fn books_on_shelf(&self, shelf: &EntityId) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_on_shelf(shelf)).collect()
    }

    pub fn shelf_book_count(&self, shelf: &EntityId) -> usize {
        self.books.iter().filter(|b| b.is_on_shelf(shelf)).count()
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.books.iter().fold(
            StatusCounts {
                total: self.books.len(),
                ..StatusCounts::default()
            },
            |mut acc, book| {
                match book.status {
                    ReadingStatus::Wanted => acc.wanted += 1,
                    ReadingStatus::Reading => acc.reading += 1,
                    ReadingStatus::Finished => acc.finished += 1,
                }
                acc
            },
        )
    }

    /// Shelves ordered by name, case-insensitively.
    pub fn shelves_sorted(&self) -> Vec<&Shelf> {
        let mut shelves: Vec<&Shelf> = self.shelves.iter().collect();
        shelves.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        shelves
    }

    pub fn filtered_books(&self, filter: &BookFilter) -> Vec<&Book> {
        filter.apply(&self.books)
    }

    pub fn statistics(&self) -> Statistics {
        let ratings: Vec<f64> = self.books.iter().filter_map(|b| b.meta.rating).collect();
        #[allow(clippy::cast_precision_loss)]
        let average_rating =
            (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

        Statistics {
            counts: self.status_counts(),
            favorites: self.books.iter().filter(|b| b.meta.favorite).count(),
            rated: ratings.len(),
            average_rating,
            pages_read: self
                .books
                .iter()
                .filter(|b| b.status == ReadingStatus::Finished)
                .filter_map(|b| b.meta.total_pages)
                .map(u64::from)
                .sum(),
            shelves: self.shelves.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> Snapshot {
        let mut a = Book::new(1, "A");
        a.status = ReadingStatus::Finished;
        a.shelves.insert(EntityId::Numeric(10));
        a.meta.total_pages = Some(300);
        a.meta.rating = Some(4.0);
        a.meta.favorite = true;

        let mut b = Book::new(2, "B");
        b.status = ReadingStatus::Reading;
        b.shelves.insert(EntityId::Numeric(10));
        b.shelves.insert(EntityId::Numeric(11));
        b.meta.total_pages = Some(100);
        b.meta.rating = Some(5.0);

        let c = Book::new(3, "C");

        Snapshot {
            books: vec![a, b, c],
            shelves: vec![
                Shelf::new(11, "zebra"),
                Shelf::new(10, "Alpha"),
                Shelf::new(12, "beta"),
            ],
            ..Snapshot::default()
        }
    }

    #[test]
    fn shelf_counts_follow_membership() {
        let snap = snapshot();
        for shelf in &snap.shelves {
            let expected = snap.books.iter().filter(|b| b.shelves.contains(&shelf.id)).count();
            assert_eq!(snap.shelf_book_count(&shelf.id), expected);
            assert_eq!(snap.books_on_shelf(&shelf.id).len(), expected);
        }
        assert_eq!(snap.shelf_book_count(&EntityId::Numeric(10)), 2);
        assert_eq!(snap.shelf_book_count(&EntityId::Numeric(12)), 0);
    }

    #[test]
    fn shelves_sort_case_insensitively() {
        let snap = snapshot();
        let names: Vec<&str> = snap.shelves_sorted().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "zebra"]);
    }

    #[test]
    fn counts_per_status() {
        let counts = snapshot().status_counts();
        assert_eq!(
            counts,
            StatusCounts {
                total: 3,
                wanted: 1,
                reading: 1,
                finished: 1
            }
        );
        assert_eq!(counts.get(ReadingStatus::Finished), 1);
    }

    #[test]
    fn statistics_aggregate_meta() {
        let stats = snapshot().statistics();
        assert_eq!(stats.favorites, 1);
        assert_eq!(stats.rated, 2);
        assert_eq!(stats.average_rating, Some(4.5));
        assert_eq!(stats.pages_read, 300);
        assert_eq!(stats.shelves, 3);
    }

    #[test]
    fn statistics_on_empty_library() {
        let stats = Snapshot::default().statistics();
        assert_eq!(stats.average_rating, None);
        assert_eq!(stats.counts.total, 0);
    }
}
