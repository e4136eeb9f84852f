//! Book definition - the explicit context object every core operation works against.
//!
//! A book is described by a TOML document:
//!
//! ```toml
//! [book]
//! title = "The Planar Codex"
//! universal_code = "Vaelin Thorne"
//! always_unlocked = ["plane_water_1.html"]
//! lockout_threshold = 3
//!
//! [codes]
//! OCEANUS = ["plane_water_1.html"]
//!
//! [[items]]
//! id = "plane_water_1.html"
//! section = "planes"
//! title = "Plane of Water - The Tidal Library"
//! ```
//!
//! Omitting `lockout_threshold` disables lockout entirely.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::codes::CodeTable;
use crate::content::{ContentCatalog, ContentId, ContentItem};
use crate::error::BookError;

const BUNDLED_BOOK: &str = include_str!("../../data/planar_codex.toml");

/// Raw, unvalidated book definition as read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConfig {
    pub book: BookSettings,

    /// Scoped code -> identifiers it unlocks.
    #[serde(default)]
    pub codes: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub items: Vec<ContentItem>,
}

/// The `[book]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSettings {
    pub title: String,
    pub universal_code: String,

    /// Onboarding allowance: identifiers unlocked for every reader.
    #[serde(default)]
    pub always_unlocked: Vec<String>,

    /// Consecutive invalid codes before lockout. `None` = never lock out.
    #[serde(default)]
    pub lockout_threshold: Option<u32>,
}

impl BookConfig {
    /// Parse a definition from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, BookError> {
        Ok(toml::from_str(text)?)
    }
}

/// A validated book: catalog, code table, onboarding allowance and lockout policy.
#[derive(Debug, Clone)]
pub struct Book {
    title: String,
    catalog: ContentCatalog,
    codes: CodeTable,
    always_unlocked: BTreeSet<ContentId>,
    lockout_threshold: Option<u32>,
}

impl Book {
    /// Assemble a book from already-built parts, validating cross references.
    pub fn new(
        title: impl Into<String>,
        catalog: ContentCatalog,
        codes: CodeTable,
        always_unlocked: impl IntoIterator<Item = ContentId>,
        lockout_threshold: Option<u32>,
    ) -> Result<Self, BookError> {
        if lockout_threshold == Some(0) {
            return Err(BookError::ZeroThreshold);
        }

        for (code, ids) in codes.scoped() {
            if let Some(id) = ids.iter().find(|id| !catalog.contains(id.as_str())) {
                return Err(BookError::UnknownCodeItem {
                    code: code.to_string(),
                    id: id.clone(),
                });
            }
        }

        let always_unlocked: BTreeSet<ContentId> = always_unlocked.into_iter().collect();
        if let Some(id) = always_unlocked
            .iter()
            .find(|id| !catalog.contains(id.as_str()))
        {
            return Err(BookError::UnknownAlwaysUnlocked(id.clone()));
        }

        Ok(Self {
            title: title.into(),
            catalog,
            codes,
            always_unlocked,
            lockout_threshold,
        })
    }

    /// Validate a raw definition into a book.
    pub fn from_config(config: BookConfig) -> Result<Self, BookError> {
        let catalog = ContentCatalog::new(config.items)?;

        let mut codes = CodeTable::new(&config.book.universal_code)?;
        for (code, ids) in config.codes {
            codes.insert(&code, ids)?;
        }

        let always_unlocked = config
            .book
            .always_unlocked
            .into_iter()
            .map(ContentId::from);

        Self::new(
            config.book.title,
            catalog,
            codes,
            always_unlocked,
            config.book.lockout_threshold,
        )
    }

    /// Parse and validate a definition from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, BookError> {
        Self::from_config(BookConfig::from_toml_str(text)?)
    }

    /// Load and validate a definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The definition shipped with this crate.
    pub fn bundled() -> Result<Self, BookError> {
        Self::from_toml_str(BUNDLED_BOOK)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn always_unlocked(&self) -> &BTreeSet<ContentId> {
        &self.always_unlocked
    }

    pub fn lockout_threshold(&self) -> Option<u32> {
        self.lockout_threshold
    }

    /// Identifiers that must be unlocked before the finale is revealed.
    pub fn required_for_finale(&self) -> BTreeSet<ContentId> {
        self.catalog.required_for_finale(&self.codes)
    }
}
