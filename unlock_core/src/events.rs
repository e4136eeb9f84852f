//! Signals emitted by the core for the presentation layer.

use book_rules::ContentId;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Descriptive events produced by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    /// A scoped code unlocked these entries (some may already have been unlocked).
    Unlocked { ids: BTreeSet<ContentId> },

    /// The universal code unlocked the whole catalog.
    UniversalUnlocked,

    /// The submitted code matched nothing.
    InvalidCode,

    /// Every entry required for the finale is unlocked.
    FinaleReached,

    /// Too many consecutive invalid codes; submissions are refused until reset.
    LockedOut,

    /// The reader tried to open an entry that is still locked.
    LockedContent { id: ContentId },
}

/// The cosmetic effect a presenter should play for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Success,
    Failure,
    Finale,
}

impl Signal {
    /// Map a signal onto the effect it triggers.
    ///
    /// Invalid codes, locked entries and lockout all share the failure effect.
    pub fn effect(&self) -> Effect {
        match self {
            Signal::Unlocked { .. } | Signal::UniversalUnlocked => Effect::Success,
            Signal::InvalidCode | Signal::LockedOut | Signal::LockedContent { .. } => {
                Effect::Failure
            }
            Signal::FinaleReached => Effect::Finale,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.effect() == Effect::Failure
    }
}

/// Receives every signal the controller emits.
pub trait EffectSignaler {
    fn signal(&mut self, signal: &Signal);
}

/// Discards all signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSignaler;

impl EffectSignaler for NullSignaler {
    fn signal(&mut self, _signal: &Signal) {}
}

/// Records signals into a shared buffer.
///
/// Clones share the same buffer, so one handle can be given to the controller
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct SignalLog {
    signals: Rc<RefCell<Vec<Signal>>>,
}

impl SignalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Signal> {
        self.signals.borrow().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Signal> {
        std::mem::take(&mut *self.signals.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.signals.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.borrow().is_empty()
    }
}

impl EffectSignaler for SignalLog {
    fn signal(&mut self, signal: &Signal) {
        self.signals.borrow_mut().push(signal.clone());
    }
}

impl<F> EffectSignaler for F
where
    F: FnMut(&Signal),
{
    fn signal(&mut self, signal: &Signal) {
        self(signal)
    }
}
