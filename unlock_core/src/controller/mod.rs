//! Unlock Controller - the submission state machine.
//!
//! Each submission runs to completion before the next begins:
//! 1. **Guard**: a sealed controller answers `LockedOut`; otherwise blank input is ignored
//! 2. **Resolve**: the code is classified by the [`CodeResolver`]
//! 3. **Apply**: successful codes unlock entries and reset the attempt counter
//! 4. **Check**: the finale condition is re-evaluated after every success
//! 5. **Signal**: the resulting signals go to the [`EffectSignaler`] and back to the caller

mod attempts;

pub use attempts::*;

use book_rules::{Book, ContentItem, Section, UnlockCode};
use serde::Serialize;

use crate::events::{EffectSignaler, NullSignaler, Signal};
use crate::progress::{Progress, ProgressTracker};
use crate::resolver::{CodeResolver, ResolveResult};
use crate::store::{Persistence, UnlockStore};
use crate::view::{self, ContentEntry};

/// Whether the controller accepts submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Waiting for the next submission.
    #[default]
    Idle,
    /// Locked out until [`UnlockController::reset_lockout`] is called.
    Sealed,
}

/// Result of a reader trying to open an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAccess<'a> {
    /// The body may be fetched and shown.
    Granted(&'a ContentItem),
    /// The entry is locked; the failure effect has been signalled.
    Locked(&'a ContentItem),
    /// No such entry in the catalog.
    Unknown,
}

/// Orchestrates code submissions for one reader session.
pub struct UnlockController<P: Persistence> {
    book: Book,
    store: UnlockStore<P>,
    tracker: ProgressTracker,
    attempts: AttemptCounter,
    state: ControllerState,
    signaler: Box<dyn EffectSignaler>,
}

impl<P: Persistence> UnlockController<P> {
    /// Create a controller for a book, reading existing state from `persistence`.
    pub fn new(book: Book, persistence: P) -> Self {
        let store = UnlockStore::open(persistence, &book);
        let tracker = ProgressTracker::new(&book);
        let attempts = AttemptCounter::new(book.lockout_threshold());

        log::info!(
            "opened \"{}\": {} entries, {} codes, {} unlocked",
            book.title(),
            book.catalog().len(),
            book.codes().len(),
            store.list_unlocked().len()
        );

        Self {
            book,
            store,
            tracker,
            attempts,
            state: ControllerState::Idle,
            signaler: Box::new(NullSignaler),
        }
    }

    /// Route emitted signals to a presentation-layer signaler.
    pub fn with_signaler(mut self, signaler: impl EffectSignaler + 'static) -> Self {
        self.signaler = Box::new(signaler);
        self
    }

    /// Submit a code from the rune input.
    ///
    /// Returns the emitted signals in order. While idle, blank input emits
    /// nothing and is not counted as an attempt.
    pub fn submit(&mut self, raw: &str) -> Vec<Signal> {
        self.run(raw, |resolver, raw| resolver.resolve(raw))
    }

    /// Submit an answer to the true-name prompt.
    ///
    /// Only the universal code succeeds here; anything else counts as an
    /// invalid attempt.
    pub fn submit_true_name(&mut self, raw: &str) -> Vec<Signal> {
        self.run(raw, |resolver, raw| resolver.resolve_true_name(raw))
    }

    /// Try to open an entry.
    ///
    /// Opening a locked entry plays the failure effect but never counts as an attempt.
    pub fn open(&mut self, id: &str) -> ContentAccess<'_> {
        let Some(item) = self.book.catalog().get(id) else {
            log::debug!("open requested for unknown entry {id}");
            return ContentAccess::Unknown;
        };

        if self.store.is_unlocked(id) {
            return ContentAccess::Granted(item);
        }

        log::debug!("refused locked entry {id}");
        self.signaler.signal(&Signal::LockedContent {
            id: item.id.clone(),
        });
        ContentAccess::Locked(item)
    }

    /// Clear the attempt counter and leave the sealed state.
    pub fn reset_lockout(&mut self) {
        if self.state == ControllerState::Sealed {
            log::info!("lockout cleared");
        }
        self.attempts.reset();
        self.state = ControllerState::Idle;
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state == ControllerState::Sealed
    }

    /// Consecutive invalid submissions since the last success or reset.
    pub fn failed_attempts(&self) -> u32 {
        self.attempts.failures()
    }

    pub fn attempts(&self) -> &AttemptCounter {
        &self.attempts
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn store(&self) -> &UnlockStore<P> {
        &self.store
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.store.is_unlocked(id)
    }

    pub fn list_unlocked(&self) -> Vec<book_rules::ContentId> {
        self.store.list_unlocked()
    }

    pub fn finale_ready(&self) -> bool {
        self.tracker.finale_ready(&self.store)
    }

    pub fn progress(&self) -> Progress {
        self.tracker.progress(&self.book, &self.store)
    }

    /// Every catalog entry with its lock badge.
    pub fn entries(&self) -> Vec<ContentEntry<'_>> {
        view::entries(self.book.catalog(), &self.store)
    }

    /// One section's entries with their lock badges.
    pub fn section_entries(&self, section: Section) -> Vec<ContentEntry<'_>> {
        view::section_entries(self.book.catalog(), section, &self.store)
    }

    /// Give the persistence backend back, ending the session.
    pub fn into_persistence(self) -> P {
        self.store.into_persistence()
    }

    fn run<F>(&mut self, raw: &str, classify: F) -> Vec<Signal>
    where
        F: FnOnce(&CodeResolver<'_>, &str) -> ResolveResult,
    {
        let signals = if self.is_sealed() {
            log::debug!("submission refused while sealed");
            vec![Signal::LockedOut]
        } else if UnlockCode::universal(raw).is_empty() {
            log::debug!("ignored blank submission");
            return Vec::new();
        } else {
            let result = classify(&CodeResolver::new(self.book.codes()), raw);
            log::debug!(
                "resolved {}-char submission: success={}",
                UnlockCode::scoped(raw).char_len(),
                result.is_success()
            );
            self.apply(result)
        };

        for signal in &signals {
            self.signaler.signal(signal);
        }
        signals
    }

    fn apply(&mut self, result: ResolveResult) -> Vec<Signal> {
        let mut signals = Vec::new();

        match result {
            ResolveResult::Universal => {
                self.store.unlock_all(self.book.catalog());
                self.attempts.reset();
                log::info!("universal code accepted; every entry unlocked");
                signals.push(Signal::UniversalUnlocked);
            }
            ResolveResult::Scoped(ids) => {
                self.store.unlock(&ids);
                self.attempts.reset();
                log::info!("scoped code accepted; {} entries unlocked", ids.len());
                signals.push(Signal::Unlocked { ids });
            }
            ResolveResult::Invalid => {
                let exhausted = self.attempts.record_failure();
                signals.push(Signal::InvalidCode);
                if exhausted {
                    log::info!(
                        "sealed after {} consecutive invalid codes",
                        self.attempts.failures()
                    );
                    self.state = ControllerState::Sealed;
                    signals.push(Signal::LockedOut);
                }
                return signals;
            }
        }

        if self.finale_ready() {
            log::info!("finale condition met");
            signals.push(Signal::FinaleReached);
        }
        signals
    }
}

impl<P: Persistence + std::fmt::Debug> std::fmt::Debug for UnlockController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockController")
            .field("book", &self.book.title())
            .field("store", &self.store)
            .field("attempts", &self.attempts)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
