//! Command structs for engine operations.
//!
//! These types group parameters for write operations (expense, settlement,
//! comment), keeping call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{MoneyCents, Split, SplitType};

/// Record a new expense in a group.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub group_id: Uuid,
    pub payer: String,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    /// Clock reading of the insertion: becomes the expense `created_at` and
    /// picks the budget month.
    pub now: DateTime<Utc>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        group_id: Uuid,
        payer: impl Into<String>,
        amount: MoneyCents,
        category: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id,
            payer: payer.into(),
            amount,
            category: category.into(),
            description: None,
            split_type: SplitType::Exact,
            splits: Vec::new(),
            now,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn split_type(mut self, split_type: SplitType) -> Self {
        self.split_type = split_type;
        self
    }

    #[must_use]
    pub fn split(mut self, member: impl Into<String>, amount: MoneyCents) -> Self {
        self.splits.push(Split::new(member, amount));
        self
    }

    #[must_use]
    pub fn splits(mut self, splits: Vec<Split>) -> Self {
        self.splits = splits;
        self
    }
}

/// Record a payment that already happened between two members.
#[derive(Clone, Debug)]
pub struct SettlementCmd {
    pub group_id: Uuid,
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SettlementCmd {
    #[must_use]
    pub fn new(
        group_id: Uuid,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: MoneyCents,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id,
            from: from.into(),
            to: to.into(),
            amount,
            note: None,
            created_at,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Append a comment (text, emoji or both) to an expense.
#[derive(Clone, Debug)]
pub struct CommentCmd {
    pub expense_id: Uuid,
    pub author: String,
    pub text: Option<String>,
    pub emoji: Option<String>,
    pub now: DateTime<Utc>,
}

impl CommentCmd {
    #[must_use]
    pub fn new(expense_id: Uuid, author: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            expense_id,
            author: author.into(),
            text: None,
            emoji: None,
            now,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

/// Filters for listing expenses.
///
/// Amount and date bounds are inclusive on both ends.
#[derive(Clone, Debug, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub min_amount: Option<MoneyCents>,
    pub max_amount: Option<MoneyCents>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
