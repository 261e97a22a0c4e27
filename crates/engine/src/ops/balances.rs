use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ResultEngine, Settlement, expenses,
    ledger::{Balances, SettlementPlan, compute_balances, optimize},
    settlements,
};

use super::{Engine, with_tx};

impl Engine {
    /// Load every expense (locking the expired ones) and settlement of a group.
    ///
    /// A group with no records, or no row at all, yields two empty lists.
    pub(super) async fn group_history(
        &self,
        db: &DatabaseTransaction,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<(Vec<Expense>, Vec<Settlement>)> {
        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(db)
            .await?;
        let mut expenses = self.hydrate(db, expense_models).await?;
        self.apply_locks(db, &mut expenses, now).await?;

        let settlements = settlements::Entity::find()
            .filter(settlements::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(settlements::Column::CreatedAt)
            .order_by_asc(settlements::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(Settlement::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok((expenses, settlements))
    }

    /// Net balance of every member that ever appeared in the group.
    ///
    /// Recorded settlements are folded in, and settled members stay in the
    /// result with a zero balance.
    pub async fn group_balances(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<Balances> {
        with_tx!(self, |db_tx| {
            let (expenses, settlements) = self.group_history(&db_tx, group_id, now).await?;
            Ok(compute_balances(&expenses, &settlements))
        })
    }

    /// Shortest list of payments that settles the group.
    ///
    /// A ledger that does not sum to zero still produces a plan; the leftover
    /// is reported in [`SettlementPlan::residual`] and logged.
    pub async fn settlement_plan(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<SettlementPlan> {
        let balances = self.group_balances(group_id, now).await?;
        let plan = optimize(&balances);
        if !plan.is_balanced() {
            tracing::warn!(
                group = %group_id,
                residual = %plan.residual,
                "group ledger does not sum to zero"
            );
        }
        Ok(plan)
    }

    /// Recompute balances and fail when they do not sum to zero.
    pub async fn verify_ledger(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<Balances> {
        let balances = self.group_balances(group_id, now).await?;
        let total = balances.total();
        if !total.is_zero() {
            return Err(EngineError::Inconsistency(format!(
                "balances of group {group_id} sum to {total}"
            )));
        }
        Ok(balances)
    }
}
