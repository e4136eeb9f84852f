//! Code resolution - classifies raw reader input against the code table.

use book_rules::{CodeTable, ContentId, UnlockCode};
use std::collections::BTreeSet;

/// Outcome of resolving one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// The reserved code that unlocks everything.
    Universal,
    /// A scoped code and the entries it unlocks.
    Scoped(BTreeSet<ContentId>),
    /// Nothing matched.
    Invalid,
}

impl ResolveResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, ResolveResult::Invalid)
    }
}

/// Resolves submissions by exact match on canonical forms.
#[derive(Debug, Clone, Copy)]
pub struct CodeResolver<'a> {
    codes: &'a CodeTable,
}

impl<'a> CodeResolver<'a> {
    pub fn new(codes: &'a CodeTable) -> Self {
        Self { codes }
    }

    /// Classify raw input.
    ///
    /// The universal check runs first, so a scoped key spelled like the
    /// universal code can never shadow it.
    pub fn resolve(&self, raw: &str) -> ResolveResult {
        if self.is_universal(raw) {
            return ResolveResult::Universal;
        }

        let code = UnlockCode::scoped(raw);
        if code.is_empty() {
            return ResolveResult::Invalid;
        }

        match self.codes.get(&code) {
            Some(ids) => ResolveResult::Scoped(ids.clone()),
            None => ResolveResult::Invalid,
        }
    }

    /// Classify input from the true-name prompt, which only knows the universal code.
    pub fn resolve_true_name(&self, raw: &str) -> ResolveResult {
        if self.is_universal(raw) {
            ResolveResult::Universal
        } else {
            ResolveResult::Invalid
        }
    }

    fn is_universal(&self, raw: &str) -> bool {
        let candidate = UnlockCode::universal(raw);
        !candidate.is_empty() && &candidate == self.codes.universal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CodeTable {
        let mut codes = CodeTable::new("VAELINTHORNE").unwrap();
        codes.insert("OCEANUS", ["w1", "w2", "w3"]).unwrap();
        codes.insert("STORM VAULT", ["s1"]).unwrap();
        codes
    }

    #[test]
    fn test_scoped_code_is_case_insensitive() {
        let codes = table();
        let resolver = CodeResolver::new(&codes);

        match resolver.resolve("  oceanus ") {
            ResolveResult::Scoped(ids) => assert_eq!(ids.len(), 3),
            other => panic!("expected scoped, got {other:?}"),
        }
    }

    #[test]
    fn test_scoped_code_keeps_inner_spacing() {
        let codes = table();
        let resolver = CodeResolver::new(&codes);

        assert!(resolver.resolve("storm vault").is_success());
        assert_eq!(resolver.resolve("stormvault"), ResolveResult::Invalid);
        assert_eq!(resolver.resolve("storm  vault"), ResolveResult::Invalid);
    }

    #[test]
    fn test_universal_ignores_all_whitespace() {
        let codes = table();
        let resolver = CodeResolver::new(&codes);

        assert_eq!(resolver.resolve("vaelin thorne"), ResolveResult::Universal);
        assert_eq!(resolver.resolve(" VaelinThorne\t"), ResolveResult::Universal);
    }

    #[test]
    fn test_universal_wins_over_scoped_key() {
        let mut codes = CodeTable::new("OCEANUS").unwrap();
        codes.insert("OCEANUS", ["w1"]).unwrap();
        let resolver = CodeResolver::new(&codes);

        assert_eq!(resolver.resolve("oceanus"), ResolveResult::Universal);
    }

    #[test]
    fn test_invalid_inputs() {
        let codes = table();
        let resolver = CodeResolver::new(&codes);

        assert_eq!(resolver.resolve("xyzzy"), ResolveResult::Invalid);
        assert_eq!(resolver.resolve(""), ResolveResult::Invalid);
        assert_eq!(resolver.resolve("   "), ResolveResult::Invalid);
        // No prefix matching
        assert_eq!(resolver.resolve("OCEAN"), ResolveResult::Invalid);
    }

    #[test]
    fn test_true_name_only_accepts_universal() {
        let codes = table();
        let resolver = CodeResolver::new(&codes);

        assert_eq!(
            resolver.resolve_true_name("Vaelin Thorne"),
            ResolveResult::Universal
        );
        assert_eq!(resolver.resolve_true_name("OCEANUS"), ResolveResult::Invalid);
    }
}
