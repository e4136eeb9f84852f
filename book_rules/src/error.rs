//! Errors raised while building a book definition.

use thiserror::Error;

use crate::content::ContentId;

/// Errors that can arise while loading or validating a book definition.
#[derive(Debug, Error)]
pub enum BookError {
    /// Reading the definition file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The definition is not valid TOML or does not match the expected shape.
    #[error("book definition parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A content item has a blank identifier.
    #[error("content item has an empty identifier")]
    EmptyItemId,

    /// Two content items share an identifier.
    #[error("duplicate content item: {0}")]
    DuplicateItem(ContentId),

    /// A scoped code is blank once canonicalized.
    #[error("unlock code is empty after canonicalization")]
    EmptyCode,

    /// Two scoped codes canonicalize to the same key.
    #[error("duplicate unlock code: {0}")]
    DuplicateCode(String),

    /// A scoped code maps to no content.
    #[error("unlock code {0} maps to no content")]
    EmptyCodeSet(String),

    /// The universal code is blank once canonicalized.
    #[error("universal code is empty after canonicalization")]
    EmptyUniversalCode,

    /// A scoped code names an identifier missing from the catalog.
    #[error("code {code} references unknown content item {id}")]
    UnknownCodeItem { code: String, id: ContentId },

    /// The always-unlocked list names an identifier missing from the catalog.
    #[error("always-unlocked list references unknown content item {0}")]
    UnknownAlwaysUnlocked(ContentId),

    /// A lockout threshold of zero would seal the book before any attempt.
    #[error("lockout threshold must be at least 1")]
    ZeroThreshold,
}
