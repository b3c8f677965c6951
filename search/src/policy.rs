//! Search policy types.

use std::time::{Duration, Instant};

use crate::error::SearchError;

/// Default wall-clock budget for one search invocation.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

/// Budget and instrumentation configuration for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Wall-clock budget, polled once per loop iteration. `None` disables
    /// the deadline.
    pub time_limit: Option<Duration>,
    /// Hard cap on node expansions. `None` means unbounded.
    pub max_expansions: Option<u64>,
    /// Record one [`crate::search::ExpansionEvent`] per expansion.
    pub record_expansions: bool,
}

impl SearchPolicy {
    /// A policy with no deadline and no expansion cap.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            time_limit: None,
            max_expansions: None,
            record_expansions: false,
        }
    }

    /// Builder: replace the time limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder: cap the number of expansions.
    #[must_use]
    pub fn with_max_expansions(mut self, cap: u64) -> Self {
        self.max_expansions = Some(cap);
        self
    }

    /// Builder: record the expansion log.
    #[must_use]
    pub fn recording(mut self) -> Self {
        self.record_expansions = true;
        self
    }

    /// Validate the policy and resolve its deadline against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the time limit overflows the
    /// platform clock when added to `now`.
    pub fn deadline_from(&self, now: Instant) -> Result<Option<Instant>, SearchError> {
        match self.time_limit {
            None => Ok(None),
            Some(limit) => now.checked_add(limit).map(Some).ok_or_else(|| {
                SearchError::InvalidPolicy {
                    detail: format!("time limit {limit:?} cannot be represented as a deadline"),
                }
            }),
        }
    }

    /// Validate the policy against the current clock.
    ///
    /// # Errors
    ///
    /// See [`SearchPolicy::deadline_from`].
    pub fn validate(&self) -> Result<(), SearchError> {
        self.deadline_from(Instant::now()).map(|_| ())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            time_limit: Some(DEFAULT_TIME_LIMIT),
            max_expansions: None,
            record_expansions: false,
        }
    }
}
