use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    ResultEngine, expenses,
    ledger::{MonthRange, MonthlySummary, summarize},
};

use super::{Engine, with_tx};

impl Engine {
    /// Total spend and top payers of a group for one calendar month.
    ///
    /// Month bounds follow the engine timezone.
    pub async fn monthly_summary(
        &self,
        group_id: Uuid,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> ResultEngine<MonthlySummary> {
        let range = MonthRange::new(year, month, self.timezone)?;
        with_tx!(self, |db_tx| {
            let models = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id.to_string()))
                .filter(expenses::Column::CreatedAt.gte(range.start))
                .filter(expenses::Column::CreatedAt.lt(range.end))
                .order_by_asc(expenses::Column::CreatedAt)
                .order_by_asc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            let mut loaded = self.hydrate(&db_tx, models).await?;
            self.apply_locks(&db_tx, &mut loaded, now).await?;
            Ok(summarize(&loaded, &range))
        })
    }
}
