//! Absolute search deadlines

use std::time::{Duration, Instant};

/// A point in time after which searches give up with no result.
///
/// `unbounded()` never expires, which freezes the clock for reproducible
/// searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Deadline `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Some(Instant::now() + budget),
        }
    }

    #[must_use]
    pub fn after_millis(ms: u64) -> Self {
        Self::after(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self { at: None }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }
}
