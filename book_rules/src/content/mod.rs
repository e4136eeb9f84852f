//! Content definitions for the book.

mod catalog;

pub use catalog::*;

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;

/// Stable identifier for one unlockable unit of content (e.g. `plane_air_1.html`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Create an identifier, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for ContentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sections of the book, in the order they appear in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Planes,
    Field,
    Gods,
    Monsters,
    History,
    Secrets,
    Finale,
}

impl Section {
    /// Every section in table-of-contents order.
    pub const ALL: [Section; 7] = [
        Section::Planes,
        Section::Field,
        Section::Gods,
        Section::Monsters,
        Section::History,
        Section::Secrets,
        Section::Finale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Planes => "planes",
            Section::Field => "field",
            Section::Gods => "gods",
            Section::Monsters => "monsters",
            Section::History => "history",
            Section::Secrets => "secrets",
            Section::Finale => "finale",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub section: Section,
    /// Title shown in the table of contents.
    pub title: String,
}

impl ContentItem {
    /// Create a new content item.
    pub fn new(id: impl Into<ContentId>, section: Section, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section,
            title: title.into(),
        }
    }
}
