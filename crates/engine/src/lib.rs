//! Shared-expense ledger engine.
//!
//! The crate has two layers:
//!
//! - [`ledger`]: pure computations (balances, debt simplification, expense
//!   locking, budget evaluation, monthly summaries) over loaded records.
//! - [`Engine`]: loads records from the database, runs the pure layer and
//!   persists the few mutations the ledger performs (new expenses and
//!   settlements, comments, lock transitions).

pub use commands::{CommentCmd, ExpenseCmd, ExpenseFilter, SettlementCmd};
pub use comments::Comment;
pub use error::EngineError;
pub use expenses::{Expense, SplitType};
pub use groups::Group;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, ExpenseAdded};
pub use settlements::Settlement;
pub use splits::Split;

mod commands;
mod comments;
mod error;
mod expenses;
mod groups;
pub mod ledger;
mod money;
mod ops;
mod settlements;
mod splits;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
