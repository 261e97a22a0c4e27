//! Expense primitives.
//!
//! An [`Expense`] credits its payer with the full amount and debits every
//! [`Split`] member with their share. Splits and comments live in their own
//! tables and are attached after loading.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine, comments::Comment, ledger::LockState, splits::Split,
    util::parse_uuid,
};

/// How the splits of an expense were derived upstream.
///
/// The engine stores the value but never recomputes splits from it: split
/// amounts always arrive already computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    Equal,
    Unequal,
    Shares,
    Exact,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Unequal => "unequal",
            Self::Shares => "shares",
            Self::Exact => "exact",
        }
    }
}

impl TryFrom<&str> for SplitType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "equal" => Ok(Self::Equal),
            "unequal" => Ok(Self::Unequal),
            "shares" => Ok(Self::Shares),
            "exact" => Ok(Self::Exact),
            other => Err(EngineError::Validation(format!(
                "invalid split type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer: String,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    pub created_at: DateTime<Utc>,
    pub locked: bool,
    pub comments: Vec<Comment>,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        payer: String,
        amount: MoneyCents,
        category: String,
        split_type: SplitType,
        splits: Vec<Split>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            payer,
            amount,
            category,
            description: None,
            split_type,
            splits,
            created_at,
            locked: false,
            comments: Vec::new(),
        })
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sum of every split amount.
    #[must_use]
    pub fn split_total(&self) -> MoneyCents {
        self.splits.iter().map(|split| split.amount).sum()
    }

    #[must_use]
    pub fn lock_state(&self) -> LockState {
        if self.locked {
            LockState::Locked
        } else {
            LockState::Unlocked
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub payer: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: Option<String>,
    pub split_type: String,
    pub created_at: DateTimeUtc,
    pub locked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Groups,
    #[sea_orm(has_many = "super::splits::Entity")]
    Splits,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Splits.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            group_id: ActiveValue::Set(expense.group_id.to_string()),
            payer: ActiveValue::Set(expense.payer.clone()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            category: ActiveValue::Set(expense.category.clone()),
            description: ActiveValue::Set(expense.description.clone()),
            split_type: ActiveValue::Set(expense.split_type.as_str().to_string()),
            created_at: ActiveValue::Set(expense.created_at),
            locked: ActiveValue::Set(expense.locked),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            group_id: parse_uuid(&model.group_id, "group")?,
            payer: model.payer,
            amount: MoneyCents::new(model.amount_minor),
            category: model.category,
            description: model.description,
            split_type: SplitType::try_from(model.split_type.as_str())?,
            splits: Vec::new(),
            created_at: model.created_at,
            locked: model.locked,
            comments: Vec::new(),
        })
    }
}
