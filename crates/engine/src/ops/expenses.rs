use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Comment, CommentCmd, EngineError, Expense, ExpenseCmd, ExpenseFilter, MoneyCents,
    ResultEngine, comments, expenses,
    ledger::{BudgetCheck, MonthRange, evaluate_budget},
    splits,
    util::{normalize_optional_text, normalize_required, validate_amount, validate_splits},
};

use super::{Engine, with_tx};

/// A stored expense together with the budget evaluation run before insertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpenseAdded {
    pub expense: Expense,
    pub budget: BudgetCheck,
}

fn validate_filter(filter: &ExpenseFilter) -> ResultEngine<()> {
    if let (Some(min), Some(max)) = (filter.min_amount, filter.max_amount)
        && min > max
    {
        return Err(EngineError::Validation(
            "invalid range: min_amount must be <= max_amount".to_string(),
        ));
    }
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(EngineError::Validation(
            "invalid range: from must be <= to".to_string(),
        ));
    }
    Ok(())
}

impl Engine {
    /// Month-to-date spend of a group, read inside the insertion transaction.
    async fn month_to_date(
        &self,
        db: &sea_orm::DatabaseTransaction,
        group_id: Uuid,
        range: &MonthRange,
    ) -> ResultEngine<MoneyCents> {
        let amounts: Vec<i64> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::AmountMinor)
            .filter(expenses::Column::GroupId.eq(group_id.to_string()))
            .filter(expenses::Column::CreatedAt.gte(range.start))
            .filter(expenses::Column::CreatedAt.lt(range.end))
            .into_tuple()
            .all(db)
            .await?;
        MoneyCents::checked_sum(amounts.into_iter().map(MoneyCents::new)).ok_or_else(|| {
            EngineError::InvalidAmount("month-to-date total is out of range".to_string())
        })
    }

    /// Insert a new expense after evaluating the group budget.
    ///
    /// The expense is stamped with `cmd.now` and the budget month is the one
    /// containing it.
    ///
    /// The budget check is advisory: the expense is stored whatever the
    /// outcome. The month total is read before the insert without any
    /// isolation guarantee, so two concurrent insertions may both miss each
    /// other.
    pub async fn add_expense(&self, cmd: ExpenseCmd) -> ResultEngine<ExpenseAdded> {
        let ExpenseCmd {
            group_id,
            payer,
            amount,
            category,
            description,
            split_type,
            splits,
            now,
        } = cmd;

        let payer = normalize_required(&payer, "payer")?;
        let category = normalize_required(&category, "category")?;
        validate_amount(amount, "amount")?;
        let splits = validate_splits(amount, &splits)?;
        let expense = Expense::new(group_id, payer, amount, category, split_type, splits, now)?
        .description(normalize_optional_text(description.as_deref()));

        with_tx!(self, |db_tx| {
            let group = self.require_group(&db_tx, group_id).await?;
            let range = MonthRange::containing(now, self.timezone)?;
            let month_to_date = self.month_to_date(&db_tx, group_id, &range).await?;
            let budget = evaluate_budget(
                group.budget_limit_minor.map(MoneyCents::new),
                month_to_date,
                expense.amount,
            )?;

            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            for (position, split) in expense.splits.iter().enumerate() {
                splits::ActiveModel::for_expense(expense.id, position, split)
                    .insert(&db_tx)
                    .await?;
            }

            if budget.over_limit {
                tracing::warn!(
                    group = %group_id,
                    total = %budget.total,
                    "expense pushes group over its monthly budget"
                );
            }
            Ok(ExpenseAdded { expense, budget })
        })
    }

    /// Return one expense, locking it first if it is old enough.
    pub async fn expense(&self, expense_id: Uuid, now: DateTime<Utc>) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;
            let mut loaded = self.hydrate(&db_tx, vec![model]).await?;
            self.apply_locks(&db_tx, &mut loaded, now).await?;
            loaded
                .pop()
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))
        })
    }

    /// List a group's expenses (oldest first), locking the ones past the
    /// threshold.
    pub async fn list_expenses(
        &self,
        group_id: Uuid,
        filter: &ExpenseFilter,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<Expense>> {
        validate_filter(filter)?;
        let category = normalize_optional_text(filter.category.as_deref());

        with_tx!(self, |db_tx| {
            let mut query = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id.to_string()));
            if let Some(category) = category {
                query = query.filter(expenses::Column::Category.eq(category));
            }
            if let Some(min) = filter.min_amount {
                query = query.filter(expenses::Column::AmountMinor.gte(min.cents()));
            }
            if let Some(max) = filter.max_amount {
                query = query.filter(expenses::Column::AmountMinor.lte(max.cents()));
            }
            if let Some(from) = filter.from {
                query = query.filter(expenses::Column::CreatedAt.gte(from));
            }
            if let Some(to) = filter.to {
                query = query.filter(expenses::Column::CreatedAt.lte(to));
            }
            let models = query
                .order_by_asc(expenses::Column::CreatedAt)
                .order_by_asc(expenses::Column::Id)
                .all(&db_tx)
                .await?;

            let mut loaded = self.hydrate(&db_tx, models).await?;
            self.apply_locks(&db_tx, &mut loaded, now).await?;
            Ok(loaded)
        })
    }

    /// Append a comment to an expense.
    ///
    /// The lock check and the insert share one transaction, reading the
    /// expense fresh from storage. A lock observed by this call is committed
    /// even when the comment itself is rejected.
    pub async fn add_comment(&self, cmd: CommentCmd) -> ResultEngine<Expense> {
        let author = normalize_required(&cmd.author, "author")?;
        let text = normalize_optional_text(cmd.text.as_deref());
        let emoji = normalize_optional_text(cmd.emoji.as_deref());
        if text.is_none() && emoji.is_none() {
            return Err(EngineError::Validation(
                "comment text or emoji required".to_string(),
            ));
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            author,
            text,
            emoji,
            created_at: cmd.now,
        };
        let expense_id = cmd.expense_id;

        let outcome: ResultEngine<ResultEngine<Expense>> = with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(expense_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;
            let mut loaded = self.hydrate(&db_tx, vec![model]).await?;
            self.apply_locks(&db_tx, &mut loaded, cmd.now).await?;
            let mut expense = loaded
                .pop()
                .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;

            match self.lock_policy.ensure_commentable(&expense) {
                Err(err) => Ok(Err(err)),
                Ok(()) => {
                    comments::ActiveModel::for_expense(expense.id, &comment)
                        .insert(&db_tx)
                        .await?;
                    expense.comments.push(comment);
                    Ok(Ok(expense))
                }
            }
        });
        outcome?
    }

    /// Lock every unlocked expense older than the threshold, in one statement.
    ///
    /// Returns the number of expenses locked by this sweep.
    pub async fn sweep_locks(&self, now: DateTime<Utc>) -> ResultEngine<u64> {
        let cutoff = self.lock_policy.cutoff(now);
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::update_many()
                .col_expr(expenses::Column::Locked, Expr::value(true))
                .filter(expenses::Column::Locked.eq(false))
                .filter(expenses::Column::CreatedAt.lt(cutoff))
                .exec(&db_tx)
                .await?;
            tracing::info!(locked = result.rows_affected, "lock sweep finished");
            Ok(result.rows_affected)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_amount_range_is_rejected() {
        let filter = ExpenseFilter {
            min_amount: Some(MoneyCents::new(500)),
            max_amount: Some(MoneyCents::new(100)),
            ..Default::default()
        };
        assert!(validate_filter(&filter).is_err());
    }

    #[test]
    fn open_ranges_are_accepted() {
        let filter = ExpenseFilter {
            min_amount: Some(MoneyCents::new(500)),
            ..Default::default()
        };
        assert!(validate_filter(&filter).is_ok());
    }
}
