//! Expense splits.
//!
//! A [`Split`] is one member's owed share of an expense. Rows keep a
//! `position` so the order given at insertion survives a reload.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub member: String,
    pub amount: MoneyCents,
}

impl Split {
    pub fn new(member: impl Into<String>, amount: MoneyCents) -> Self {
        Self {
            member: member.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_splits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_id: String,
    pub position: i32,
    pub member: String,
    pub amount_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn for_expense(expense_id: Uuid, position: usize, split: &Split) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            expense_id: ActiveValue::Set(expense_id.to_string()),
            position: ActiveValue::Set(i32::try_from(position).unwrap_or(i32::MAX)),
            member: ActiveValue::Set(split.member.clone()),
            amount_minor: ActiveValue::Set(split.amount.cents()),
        }
    }
}

impl From<Model> for Split {
    fn from(model: Model) -> Self {
        Self {
            member: model.member,
            amount: MoneyCents::new(model.amount_minor),
        }
    }
}
