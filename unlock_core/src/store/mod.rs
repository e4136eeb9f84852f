//! Unlock store - which entries a reader has unlocked.
//!
//! State lives in an injected [`Persistence`] backend under `u_<id>` keys.
//! Backend failures never reach callers: they are logged and the affected
//! unlock simply does not take effect.

mod persistence;

pub use persistence::*;

use book_rules::{Book, ContentCatalog, ContentId};
use std::collections::BTreeSet;

const KEY_PREFIX: &str = "u_";

/// Storage key for a content identifier.
pub fn storage_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Content identifier encoded in a storage key, if it is an unlock key.
pub fn id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(KEY_PREFIX).filter(|id| !id.is_empty())
}

/// Monotonic set of unlocked content identifiers.
///
/// An entry is unlocked when it is in the book's always-unlocked set or has been
/// persisted as unlocked. Nothing is ever re-locked.
#[derive(Debug)]
pub struct UnlockStore<P: Persistence> {
    persistence: P,
    always_unlocked: BTreeSet<ContentId>,
}

impl<P: Persistence> UnlockStore<P> {
    /// Open the store for a book, seeding the onboarding allowance into storage.
    pub fn open(persistence: P, book: &Book) -> Self {
        let mut store = Self {
            persistence,
            always_unlocked: book.always_unlocked().clone(),
        };

        let seed: Vec<ContentId> = store.always_unlocked.iter().cloned().collect();
        store.unlock(&seed);
        store
    }

    /// True when the entry is always unlocked or persisted as unlocked.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.always_unlocked.contains(id) || self.is_persisted(id)
    }

    /// Mark entries as unlocked. Already-unlocked entries are left alone.
    pub fn unlock<'a>(&mut self, ids: impl IntoIterator<Item = &'a ContentId>) {
        let mut newly = 0usize;

        for id in ids {
            if self.is_persisted(id.as_str()) {
                continue;
            }
            match self.persistence.set(&storage_key(id.as_str()), true) {
                Ok(()) => newly += 1,
                Err(e) => log::warn!("could not persist unlock for {id}: {e}"),
            }
        }

        if newly > 0 {
            log::debug!("persisted {newly} new unlock(s)");
        }
    }

    /// Unlock every entry in the catalog.
    pub fn unlock_all(&mut self, catalog: &ContentCatalog) {
        self.unlock(catalog.ids());
    }

    /// Sorted snapshot of every unlocked identifier.
    pub fn list_unlocked(&self) -> Vec<ContentId> {
        let mut unlocked = self.always_unlocked.clone();

        match self.persistence.keys() {
            Ok(keys) => {
                for key in keys {
                    let Some(id) = id_from_key(&key) else {
                        continue;
                    };
                    if self.is_persisted(id) {
                        unlocked.insert(ContentId::from(id));
                    }
                }
            }
            Err(e) => log::warn!("could not list unlock flags: {e}"),
        }

        unlocked.into_iter().collect()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Give the backend back, e.g. to reopen the store for another book.
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn is_persisted(&self, id: &str) -> bool {
        match self.persistence.get(&storage_key(id)) {
            Ok(unlocked) => unlocked,
            Err(e) => {
                log::warn!("could not read unlock flag for {id}: {e}");
                false
            }
        }
    }
}
