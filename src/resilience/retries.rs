//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether another upstream attempt may start
//! - Classify outcomes: only transport failures are retried
//!
//! # Design Decisions
//! - Attempts are numbered from 1 and the bound check is `attempt > max_retries`,
//!   so a bound of N makes exactly N attempts (0 never reaches upstream)
//! - Retries are immediate; no backoff between attempts
//! - Every method is retried, POST included
//! - Responses with error statuses are final, never retried

/// Bounded retry policy for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether attempt number `attempt` (1-based) is past the bound.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt > self.max_retries
    }

    /// Total number of attempts this policy permits.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries
    }
}

/// Where a forward currently stands. Obtaining a response ends the forward
/// directly, so only the retrying states are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// About to issue attempt `n`.
    Attempt(u32),
    /// Every permitted attempt failed at the transport level.
    Exhausted,
}

impl AttemptState {
    pub fn start(policy: &RetryPolicy) -> Self {
        Self::Attempt(1).check(policy)
    }

    /// Transition after a transport failure on the current attempt.
    pub fn on_transport_error(self, policy: &RetryPolicy) -> Self {
        match self {
            Self::Attempt(n) => Self::Attempt(n.saturating_add(1)).check(policy),
            other => other,
        }
    }

    fn check(self, policy: &RetryPolicy) -> Self {
        match self {
            Self::Attempt(n) if policy.is_exhausted(n) => Self::Exhausted,
            other => other,
        }
    }
}
