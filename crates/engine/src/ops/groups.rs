use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Group, MoneyCents, ResultEngine, groups,
    util::{normalize_required, validate_amount},
};

use super::{Engine, with_tx};

fn validate_budget_limit(limit: Option<MoneyCents>) -> ResultEngine<()> {
    match limit {
        Some(limit) => validate_amount(limit, "budget limit"),
        None => Ok(()),
    }
}

impl Engine {
    pub(super) async fn find_group(
        &self,
        db: &DatabaseTransaction,
        group_id: Uuid,
    ) -> ResultEngine<Option<groups::Model>> {
        groups::Entity::find_by_id(group_id.to_string())
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_group(
        &self,
        db: &DatabaseTransaction,
        group_id: Uuid,
    ) -> ResultEngine<groups::Model> {
        self.find_group(db, group_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("group not exists".to_string()))
    }

    /// Register a group so expenses can reference it.
    pub async fn new_group(
        &self,
        name: &str,
        budget_limit: Option<MoneyCents>,
        now: DateTime<Utc>,
    ) -> ResultEngine<Group> {
        let name = normalize_required(name, "group name")?;
        validate_budget_limit(budget_limit)?;
        let group = Group::new(name, budget_limit, now);

        with_tx!(self, |db_tx| {
            groups::ActiveModel::from(&group).insert(&db_tx).await?;
            Ok(group)
        })
    }

    pub async fn group(&self, group_id: Uuid) -> ResultEngine<Group> {
        with_tx!(self, |db_tx| {
            let model = self.require_group(&db_tx, group_id).await?;
            Group::try_from(model)
        })
    }

    /// Set (or clear with `None`) the monthly budget of a group.
    pub async fn set_budget_limit(
        &self,
        group_id: Uuid,
        budget_limit: Option<MoneyCents>,
    ) -> ResultEngine<Group> {
        validate_budget_limit(budget_limit)?;
        with_tx!(self, |db_tx| {
            self.require_group(&db_tx, group_id).await?;
            let model = groups::ActiveModel {
                id: ActiveValue::Set(group_id.to_string()),
                budget_limit_minor: ActiveValue::Set(budget_limit.map(MoneyCents::cents)),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Group::try_from(model)
        })
    }
}
