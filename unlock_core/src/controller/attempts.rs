//! Consecutive failed-attempt counting.

/// Counts consecutive invalid submissions against an optional threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptCounter {
    failures: u32,
    threshold: Option<u32>,
}

impl AttemptCounter {
    /// `None` disables lockout.
    pub fn new(threshold: Option<u32>) -> Self {
        Self {
            failures: 0,
            threshold,
        }
    }

    /// Count one failure. Returns true once the threshold has been reached.
    pub fn record_failure(&mut self) -> bool {
        self.failures = self.failures.saturating_add(1);
        self.is_exhausted()
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    /// Failures left before lockout, or `None` when lockout is disabled.
    pub fn remaining(&self) -> Option<u32> {
        self.threshold.map(|t| t.saturating_sub(self.failures))
    }

    pub fn is_exhausted(&self) -> bool {
        self.threshold.is_some_and(|t| self.failures >= t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_threshold_exactly() {
        let mut counter = AttemptCounter::new(Some(3));
        assert!(!counter.record_failure());
        assert!(!counter.record_failure());
        assert_eq!(counter.remaining(), Some(1));
        assert!(counter.record_failure());
        assert_eq!(counter.remaining(), Some(0));
    }

    #[test]
    fn test_reset_clears_failures() {
        let mut counter = AttemptCounter::new(Some(2));
        counter.record_failure();
        counter.reset();
        assert_eq!(counter.failures(), 0);
        assert!(!counter.record_failure());
    }

    #[test]
    fn test_disabled_threshold_never_exhausts() {
        let mut counter = AttemptCounter::new(None);
        for _ in 0..100 {
            assert!(!counter.record_failure());
        }
        assert_eq!(counter.remaining(), None);
        assert_eq!(counter.failures(), 100);
    }
}
