//! Content catalog - the fixed table of every entry in the book.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::{ContentId, ContentItem, Section};
use crate::codes::CodeTable;
use crate::error::BookError;

/// Ordered, immutable table of content items.
///
/// Items keep their definition order; lookups by identifier go through an index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentCatalog {
    items: Vec<ContentItem>,

    #[serde(skip)]
    index: HashMap<ContentId, usize>,
}

impl ContentCatalog {
    /// Build a catalog, rejecting blank and duplicate identifiers.
    pub fn new(items: impl IntoIterator<Item = ContentItem>) -> Result<Self, BookError> {
        let mut catalog = Self::default();

        for item in items {
            if item.id.is_empty() {
                return Err(BookError::EmptyItemId);
            }
            if catalog.index.contains_key(&item.id) {
                return Err(BookError::DuplicateItem(item.id));
            }
            catalog.index.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(item);
        }

        Ok(catalog)
    }

    /// All items in definition order.
    pub fn all_items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Get an item by identifier.
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Items of one section, in definition order.
    pub fn by_section(&self, section: Section) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(move |item| item.section == section)
    }

    /// Every identifier in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &ContentId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identifiers that must be unlocked for the finale: the union of every
    /// scoped code's targets. The universal code contributes nothing.
    pub fn required_for_finale(&self, codes: &CodeTable) -> BTreeSet<ContentId> {
        codes
            .scoped()
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("plane_water_1.html", Section::Planes, "The Tidal Library"),
            ContentItem::new("field_01.html", Section::Field, "Field Note 01"),
            ContentItem::new("plane_air_1.html", Section::Planes, "Isles of the Unmoored"),
        ]
    }

    #[test]
    fn test_catalog_keeps_definition_order() {
        let catalog = ContentCatalog::new(sample_items()).unwrap();
        let ids: Vec<_> = catalog.ids().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["plane_water_1.html", "field_01.html", "plane_air_1.html"]
        );
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = ContentCatalog::new(sample_items()).unwrap();
        assert_eq!(
            catalog.get("field_01.html").map(|i| i.section),
            Some(Section::Field)
        );
        assert!(catalog.contains("plane_air_1.html"));
        assert!(catalog.get("missing.html").is_none());
    }

    #[test]
    fn test_catalog_by_section() {
        let catalog = ContentCatalog::new(sample_items()).unwrap();
        assert_eq!(catalog.by_section(Section::Planes).count(), 2);
        assert_eq!(catalog.by_section(Section::Finale).count(), 0);
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let mut items = sample_items();
        items.push(ContentItem::new("field_01.html", Section::Field, "Again"));
        let err = ContentCatalog::new(items).unwrap_err();
        assert!(matches!(err, BookError::DuplicateItem(id) if id.as_str() == "field_01.html"));
    }

    #[test]
    fn test_catalog_rejects_blank_id() {
        let err = ContentCatalog::new(vec![ContentItem::new(" ", Section::Field, "Blank")])
            .unwrap_err();
        assert!(matches!(err, BookError::EmptyItemId));
    }

    #[test]
    fn test_required_for_finale_is_union_of_scoped_codes() {
        let catalog = ContentCatalog::new(sample_items()).unwrap();
        let mut codes = CodeTable::new("TRUENAME").unwrap();
        codes
            .insert("OCEANUS", ["plane_water_1.html"])
            .unwrap();
        codes
            .insert("DAWNFALL", ["plane_air_1.html", "plane_water_1.html"])
            .unwrap();

        let required = catalog.required_for_finale(&codes);
        assert_eq!(required.len(), 2);
        assert!(required.contains("plane_air_1.html"));
        assert!(!required.contains("field_01.html"));
    }
}
