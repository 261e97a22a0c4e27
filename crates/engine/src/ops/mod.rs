use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sea_orm::{
    DatabaseConnection, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*, sea_query::Expr,
};

use crate::{Comment, Expense, ResultEngine, Split, comments, ledger::LockPolicy, splits};

mod balances;
mod expenses;
mod export;
mod groups;
mod settlements;
mod summary;

pub use expenses::ExpenseAdded;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Ledger service over a database connection.
///
/// The engine keeps no per-group state between calls: every operation loads
/// what it needs, computes, and writes back inside one DB transaction.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    lock_policy: LockPolicy,
    timezone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }

    /// Timezone used for calendar-month boundaries.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Attach splits and comments to freshly loaded expense rows.
    ///
    /// Preserves the order of `models`.
    async fn hydrate(
        &self,
        db: &DatabaseTransaction,
        models: Vec<crate::expenses::Model>,
    ) -> ResultEngine<Vec<Expense>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();

        let split_models = splits::Entity::find()
            .filter(splits::Column::ExpenseId.is_in(ids.clone()))
            .order_by_asc(splits::Column::ExpenseId)
            .order_by_asc(splits::Column::Position)
            .all(db)
            .await?;
        let comment_models = comments::Entity::find()
            .filter(comments::Column::ExpenseId.is_in(ids))
            .order_by_asc(comments::Column::CreatedAt)
            .all(db)
            .await?;

        let mut splits_by_expense: HashMap<String, Vec<Split>> = HashMap::new();
        for model in split_models {
            splits_by_expense
                .entry(model.expense_id.clone())
                .or_default()
                .push(Split::from(model));
        }
        let mut comments_by_expense: HashMap<String, Vec<Comment>> = HashMap::new();
        for model in comment_models {
            comments_by_expense
                .entry(model.expense_id.clone())
                .or_default()
                .push(Comment::try_from(model)?);
        }

        models
            .into_iter()
            .map(|model| {
                let splits = splits_by_expense.remove(&model.id).unwrap_or_default();
                let comments = comments_by_expense.remove(&model.id).unwrap_or_default();
                let mut expense = Expense::try_from(model)?;
                expense.splits = splits;
                expense.comments = comments;
                Ok(expense)
            })
            .collect()
    }

    /// Run the lock policy over `expenses` and persist every new lock.
    ///
    /// Only rows that are still unlocked in storage are written, so repeated
    /// checks never rewrite a lock.
    async fn apply_locks(
        &self,
        db: &DatabaseTransaction,
        expenses: &mut [Expense],
        now: DateTime<Utc>,
    ) -> ResultEngine<u64> {
        let newly_locked: Vec<String> = expenses
            .iter_mut()
            .filter_map(|expense| {
                self.lock_policy
                    .observe(expense, now)
                    .needs_persist()
                    .then(|| expense.id.to_string())
            })
            .collect();
        if newly_locked.is_empty() {
            return Ok(0);
        }

        use crate::expenses::{Column, Entity};

        let result = Entity::update_many()
            .col_expr(Column::Locked, Expr::value(true))
            .filter(Column::Id.is_in(newly_locked))
            .filter(Column::Locked.eq(false))
            .exec(db)
            .await?;
        if result.rows_affected > 0 {
            tracing::info!(
                locked = result.rows_affected,
                "locked expenses older than {} days",
                self.lock_policy.max_age().num_days()
            );
        }
        Ok(result.rows_affected)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    lock_policy: LockPolicy,
    timezone: Option<Tz>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the default 7-day lock threshold.
    pub fn lock_policy(mut self, policy: LockPolicy) -> EngineBuilder {
        self.lock_policy = policy;
        self
    }

    /// Timezone for month boundaries (default UTC).
    pub fn timezone(mut self, tz: Tz) -> EngineBuilder {
        self.timezone = Some(tz);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            lock_policy: self.lock_policy,
            timezone: self.timezone.unwrap_or(Tz::UTC),
        })
    }
}
