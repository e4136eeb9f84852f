//! Renderer-facing view of the catalog with lock badges.

use book_rules::{ContentCatalog, ContentItem, Section};
use serde::Serialize;

use crate::store::{Persistence, UnlockStore};

/// A catalog entry together with whether the reader may open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentEntry<'a> {
    pub item: &'a ContentItem,
    pub unlocked: bool,
}

impl ContentEntry<'_> {
    /// Badge shown next to locked entries.
    pub fn badge(&self) -> Option<&'static str> {
        (!self.unlocked).then_some("(locked)")
    }
}

/// Every catalog entry in definition order.
pub fn entries<'a, P: Persistence>(
    catalog: &'a ContentCatalog,
    store: &UnlockStore<P>,
) -> Vec<ContentEntry<'a>> {
    catalog
        .all_items()
        .iter()
        .map(|item| entry(item, store))
        .collect()
}

/// Entries of one section in definition order.
pub fn section_entries<'a, P: Persistence>(
    catalog: &'a ContentCatalog,
    section: Section,
    store: &UnlockStore<P>,
) -> Vec<ContentEntry<'a>> {
    catalog
        .by_section(section)
        .map(|item| entry(item, store))
        .collect()
}

fn entry<'a, P: Persistence>(item: &'a ContentItem, store: &UnlockStore<P>) -> ContentEntry<'a> {
    ContentEntry {
        item,
        unlocked: store.is_unlocked(item.id.as_str()),
    }
}
