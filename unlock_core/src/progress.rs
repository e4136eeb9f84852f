//! Progress tracking - when may the finale be revealed?

use book_rules::{Book, ContentId, Section};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::store::{Persistence, UnlockStore};

/// Unlock counts for one section of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub section: Section,
    pub unlocked: usize,
    pub total: usize,
}

/// Snapshot of a reader's progress through the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Required entries already unlocked.
    pub unlocked: usize,
    /// Entries required for the finale.
    pub required: usize,
    pub sections: Vec<SectionProgress>,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.unlocked == self.required
    }
}

/// Evaluates the finale condition against an unlock store.
///
/// The required set is computed once from the book; every check is a pure
/// read of the store.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    required: BTreeSet<ContentId>,
}

impl ProgressTracker {
    pub fn new(book: &Book) -> Self {
        Self {
            required: book.required_for_finale(),
        }
    }

    pub fn required(&self) -> &BTreeSet<ContentId> {
        &self.required
    }

    /// True when every required entry is unlocked.
    ///
    /// A book without scoped codes requires nothing and is always ready.
    pub fn finale_ready<P: Persistence>(&self, store: &UnlockStore<P>) -> bool {
        self.required.iter().all(|id| store.is_unlocked(id.as_str()))
    }

    /// Required entries still locked, in sorted order.
    pub fn missing<'a, P: Persistence>(&'a self, store: &UnlockStore<P>) -> Vec<&'a ContentId> {
        self.required
            .iter()
            .filter(|id| !store.is_unlocked(id.as_str()))
            .collect()
    }

    /// Overall and per-section counts.
    pub fn progress<P: Persistence>(&self, book: &Book, store: &UnlockStore<P>) -> Progress {
        let unlocked = self
            .required
            .iter()
            .filter(|id| store.is_unlocked(id.as_str()))
            .count();

        let sections = Section::ALL
            .iter()
            .map(|&section| {
                let mut progress = SectionProgress {
                    section,
                    unlocked: 0,
                    total: 0,
                };
                for item in book.catalog().by_section(section) {
                    progress.total += 1;
                    if store.is_unlocked(item.id.as_str()) {
                        progress.unlocked += 1;
                    }
                }
                progress
            })
            .filter(|progress| progress.total > 0)
            .collect();

        Progress {
            unlocked,
            required: self.required.len(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPersistence;
    use book_rules::{CodeTable, ContentCatalog, ContentItem};

    fn test_book() -> Book {
        let catalog = ContentCatalog::new(vec![
            ContentItem::new("W1", Section::Planes, "Water One"),
            ContentItem::new("W2", Section::Planes, "Water Two"),
            ContentItem::new("A1", Section::Gods, "Air One"),
            ContentItem::new("END", Section::Finale, "The End"),
        ])
        .unwrap();
        let mut codes = CodeTable::new("TRUENAME").unwrap();
        codes.insert("OCEANUS", ["W1", "W2"]).unwrap();
        codes.insert("DAWNFALL", ["A1"]).unwrap();
        Book::new(
            "Test",
            catalog,
            codes,
            [ContentId::from("W1"), ContentId::from("W2")],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_finale_not_ready_initially() {
        let book = test_book();
        let store = UnlockStore::open(MemoryPersistence::new(), &book);
        let tracker = ProgressTracker::new(&book);

        assert!(!tracker.finale_ready(&store));
        assert_eq!(tracker.missing(&store), vec![&ContentId::from("A1")]);
    }

    #[test]
    fn test_finale_ready_after_last_required_unlock() {
        let book = test_book();
        let mut store = UnlockStore::open(MemoryPersistence::new(), &book);
        let tracker = ProgressTracker::new(&book);

        store.unlock(&[ContentId::from("A1")]);

        assert!(tracker.finale_ready(&store));
        assert!(tracker.missing(&store).is_empty());
    }

    #[test]
    fn test_finale_entry_itself_not_required() {
        let book = test_book();
        let tracker = ProgressTracker::new(&book);
        assert!(!tracker.required().contains("END"));
        assert_eq!(tracker.required().len(), 3);
    }

    #[test]
    fn test_progress_counts() {
        let book = test_book();
        let store = UnlockStore::open(MemoryPersistence::new(), &book);
        let tracker = ProgressTracker::new(&book);

        let progress = tracker.progress(&book, &store);
        assert_eq!(progress.unlocked, 2);
        assert_eq!(progress.required, 3);
        assert!(!progress.is_complete());

        let planes = progress
            .sections
            .iter()
            .find(|s| s.section == Section::Planes)
            .unwrap();
        assert_eq!((planes.unlocked, planes.total), (2, 2));
        // Sections with no entries are left out
        assert_eq!(progress.sections.len(), 3);
    }

    #[test]
    fn test_no_scoped_codes_is_vacuously_ready() {
        let catalog =
            ContentCatalog::new(vec![ContentItem::new("X", Section::Field, "X")]).unwrap();
        let codes = CodeTable::new("TRUENAME").unwrap();
        let book = Book::new("Empty", catalog, codes, Vec::<ContentId>::new(), None).unwrap();
        let store = UnlockStore::open(MemoryPersistence::new(), &book);

        assert!(ProgressTracker::new(&book).finale_ready(&store));
    }
}
