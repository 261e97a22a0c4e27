//! Expense locking.
//!
//! An expense becomes read-only for comments once it is older than the lock
//! threshold. The check is lazy: it runs whenever an expense is touched, and
//! the persisted `locked` flag memoizes the first positive answer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Expense, ResultEngine};

/// Default age after which an expense locks.
pub const DEFAULT_LOCK_AFTER_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
    Locked,
}

/// Outcome of running the policy over one expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTransition {
    /// Nothing changed, the expense is still young enough.
    StillUnlocked,
    /// The expense was locked before this check.
    AlreadyLocked,
    /// This check locked the expense; the caller must persist it.
    Locked,
}

impl LockTransition {
    #[must_use]
    pub fn needs_persist(self) -> bool {
        matches!(self, Self::Locked)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockPolicy {
    max_age: Duration,
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::days(DEFAULT_LOCK_AFTER_DAYS),
        }
    }
}

impl LockPolicy {
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    #[must_use]
    pub fn after_days(days: i64) -> Self {
        Self::new(Duration::days(days))
    }

    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// `true` once `now - created_at` is strictly greater than the threshold.
    #[must_use]
    pub fn age_exceeds_threshold(&self, now: DateTime<Utc>, created_at: DateTime<Utc>) -> bool {
        now.signed_duration_since(created_at) > self.max_age
    }

    /// Oldest `created_at` that is still unlocked at `now`.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.max_age
    }

    /// Lock `expense` in place if it is old enough.
    ///
    /// A locked expense is never unlocked, even if `now` is earlier than its
    /// creation time.
    pub fn observe(&self, expense: &mut Expense, now: DateTime<Utc>) -> LockTransition {
        if expense.locked {
            return LockTransition::AlreadyLocked;
        }
        if self.age_exceeds_threshold(now, expense.created_at) {
            expense.locked = true;
            return LockTransition::Locked;
        }
        LockTransition::StillUnlocked
    }

    /// Reject mutations of a locked expense.
    pub fn ensure_commentable(&self, expense: &Expense) -> ResultEngine<()> {
        match expense.lock_state() {
            LockState::Unlocked => Ok(()),
            LockState::Locked => Err(EngineError::Forbidden(
                "expense is locked and cannot be commented on".to_string(),
            )),
        }
    }
}
