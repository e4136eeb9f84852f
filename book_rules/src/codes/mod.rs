//! Unlock codes and the code table.
//!
//! Codes compare case-insensitively. Two canonical forms exist:
//! - **scoped**: uppercase, surrounding whitespace trimmed, inner spacing kept
//! - **universal**: uppercase, all whitespace removed

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::content::ContentId;
use crate::error::BookError;

/// A canonicalized unlock code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UnlockCode(String);

impl UnlockCode {
    /// Canonicalize input for comparison against scoped codes.
    pub fn scoped(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Canonicalize input for comparison against the universal code.
    pub fn universal(raw: &str) -> Self {
        Self(raw.split_whitespace().collect::<String>().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, used when logging without revealing the code.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for UnlockCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated mapping from canonical codes to the content they unlock.
#[derive(Debug, Clone, Serialize)]
pub struct CodeTable {
    universal: UnlockCode,
    scoped: BTreeMap<UnlockCode, BTreeSet<ContentId>>,
}

impl CodeTable {
    /// Create a table with the given universal code and no scoped codes.
    pub fn new(universal: &str) -> Result<Self, BookError> {
        let universal = UnlockCode::universal(universal);
        if universal.is_empty() {
            return Err(BookError::EmptyUniversalCode);
        }

        Ok(Self {
            universal,
            scoped: BTreeMap::new(),
        })
    }

    /// Register a scoped code.
    ///
    /// Fails when the code is blank, already registered (after canonicalization),
    /// or maps to nothing. Duplicate identifiers within one code collapse.
    pub fn insert<I, T>(&mut self, code: &str, ids: I) -> Result<(), BookError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ContentId>,
    {
        let code = UnlockCode::scoped(code);
        if code.is_empty() {
            return Err(BookError::EmptyCode);
        }
        if self.scoped.contains_key(&code) {
            return Err(BookError::DuplicateCode(code.0));
        }

        let ids: BTreeSet<ContentId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &ContentId| !id.is_empty())
            .collect();
        if ids.is_empty() {
            return Err(BookError::EmptyCodeSet(code.0));
        }

        self.scoped.insert(code, ids);
        Ok(())
    }

    /// The reserved code that unlocks everything.
    pub fn universal(&self) -> &UnlockCode {
        &self.universal
    }

    /// Targets of a scoped code, looked up by its canonical form.
    pub fn get(&self, code: &UnlockCode) -> Option<&BTreeSet<ContentId>> {
        self.scoped.get(code)
    }

    /// All scoped codes in canonical order.
    pub fn scoped(&self) -> impl Iterator<Item = (&UnlockCode, &BTreeSet<ContentId>)> {
        self.scoped.iter()
    }

    /// Number of scoped codes.
    pub fn len(&self) -> usize {
        self.scoped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scoped.is_empty()
    }
}
