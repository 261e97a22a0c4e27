use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    ResultEngine, Settlement, SettlementCmd, settlements,
    util::{normalize_optional_text, normalize_required, validate_amount},
};

use super::{Engine, with_tx};

impl Engine {
    /// Store a payment made between two members of a group.
    pub async fn record_settlement(&self, cmd: SettlementCmd) -> ResultEngine<Settlement> {
        let from = normalize_required(&cmd.from, "from")?;
        let to = normalize_required(&cmd.to, "to")?;
        validate_amount(cmd.amount, "amount")?;
        let settlement = Settlement::new(cmd.group_id, from, to, cmd.amount, cmd.created_at)?
            .note(normalize_optional_text(cmd.note.as_deref()));

        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, settlement.group_id).await?;
            settlements::ActiveModel::from(&settlement)
                .insert(&db_tx)
                .await?;
            tracing::debug!(
                group = %settlement.group_id,
                amount = %settlement.amount,
                "settlement recorded"
            );
            Ok(settlement)
        })
    }

    /// Settlements of a group in the order they were recorded.
    pub async fn settlements(&self, group_id: Uuid) -> ResultEngine<Vec<Settlement>> {
        with_tx!(self, |db_tx| {
            settlements::Entity::find()
                .filter(settlements::Column::GroupId.eq(group_id.to_string()))
                .order_by_asc(settlements::Column::CreatedAt)
                .order_by_asc(settlements::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Settlement::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }
}
