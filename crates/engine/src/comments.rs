//! Append-only comments attached to an expense.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: String,
    pub text: Option<String>,
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_id: String,
    pub author: String,
    pub text: Option<String>,
    pub emoji: Option<String>,
    pub created_at: DateTimeUtc,
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
    pub(crate) fn for_expense(expense_id: Uuid, comment: &Comment) -> Self {
        Self {
            id: ActiveValue::Set(comment.id.to_string()),
            expense_id: ActiveValue::Set(expense_id.to_string()),
            author: ActiveValue::Set(comment.author.clone()),
            text: ActiveValue::Set(comment.text.clone()),
            emoji: ActiveValue::Set(comment.emoji.clone()),
            created_at: ActiveValue::Set(comment.created_at),
        }
    }
}

impl TryFrom<Model> for Comment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "comment")?,
            author: model.author,
            text: model.text,
            emoji: model.emoji,
            created_at: model.created_at,
        })
    }
}
