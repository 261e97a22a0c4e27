//! Pure ledger computations.
//!
//! Nothing in here touches the database: every function works on records that
//! were already loaded, so it can be tested and reused without a store.

mod balances;
mod budget;
mod lifecycle;
mod optimizer;
mod summary;

pub use balances::{Balances, MemberBalance, compute_balances};
pub use budget::{BudgetCheck, MonthRange, evaluate_budget};
pub use lifecycle::{DEFAULT_LOCK_AFTER_DAYS, LockPolicy, LockState, LockTransition};
pub use optimizer::{SettlementPlan, Transfer, optimize};
pub use summary::{Contributor, MonthlySummary, summarize};
