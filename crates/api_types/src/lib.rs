//! Request and response bodies of the SplitLedger HTTP API.
//!
//! Amounts travel as decimal strings in major units (`"12.50"`), never as
//! floats. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupNew {
        pub name: String,
        pub budget_limit: Option<String>,
    }

    /// Set the monthly budget, or clear it with `null`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub budget_limit: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub budget_limit: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

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

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitView {
        pub member: String,
        pub amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub group: Uuid,
        pub payer: String,
        pub amount: String,
        pub category: String,
        pub description: Option<String>,
        pub split_type: SplitType,
        /// Shares already computed by the client, summing to `amount`.
        pub splits: Vec<SplitView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentView {
        pub id: Uuid,
        pub author: String,
        pub text: Option<String>,
        pub emoji: Option<String>,
        #[serde(rename = "createdAt")]
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group: Uuid,
        pub payer: String,
        pub amount: String,
        pub category: String,
        pub description: Option<String>,
        pub split_type: SplitType,
        pub splits: Vec<SplitView>,
        pub created_at: DateTime<Utc>,
        pub locked: bool,
        pub comments: Vec<CommentView>,
    }

    /// Stored expense plus the advisory budget evaluation.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseCreated {
        pub expense: ExpenseView,
        pub over_limit: bool,
        /// Month-to-date spend including this expense.
        pub total: String,
        pub budget_limit: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseListQuery {
        pub category: Option<String>,
        pub min_amount: Option<String>,
        pub max_amount: Option<String>,
        pub from: Option<DateTime<Utc>>,
        pub to: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentNew {
        pub author: String,
        pub text: Option<String>,
        pub emoji: Option<String>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub group: Uuid,
        pub from: String,
        pub to: String,
        pub amount: String,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettlementView {
        pub id: Uuid,
        pub group: Uuid,
        pub from: String,
        pub to: String,
        pub amount: String,
        pub note: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementListResponse {
        pub settlements: Vec<SettlementView>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: String,
        pub to: String,
        pub amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementPlanResponse {
        pub settlements: Vec<TransferView>,
        /// Present only when the ledger does not sum to zero.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub residual: Option<String>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member: String,
        pub balance: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<BalanceView>,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryQuery {
        pub year: i32,
        pub month: u32,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ContributorView {
        pub member: String,
        pub amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryResponse {
        pub total: String,
        pub top_contributors: Vec<ContributorView>,
    }
}
