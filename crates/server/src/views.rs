//! Conversions from engine values to API bodies.

use api_types::{
    balance::{BalanceView, BalancesResponse},
    expense::{CommentView, ExpenseView, SplitType as ApiSplitType, SplitView},
    group::GroupView,
    settlement::{SettlementPlanResponse, SettlementView, TransferView},
    summary::{ContributorView, SummaryResponse},
};
use engine::{
    Comment, Expense, Group, Settlement, Split, SplitType,
    ledger::{Balances, MonthlySummary, SettlementPlan},
};

pub(crate) fn split_type_from_api(split_type: ApiSplitType) -> SplitType {
    match split_type {
        ApiSplitType::Equal => SplitType::Equal,
        ApiSplitType::Unequal => SplitType::Unequal,
        ApiSplitType::Shares => SplitType::Shares,
        ApiSplitType::Exact => SplitType::Exact,
    }
}

fn split_type_to_api(split_type: SplitType) -> ApiSplitType {
    match split_type {
        SplitType::Equal => ApiSplitType::Equal,
        SplitType::Unequal => ApiSplitType::Unequal,
        SplitType::Shares => ApiSplitType::Shares,
        SplitType::Exact => ApiSplitType::Exact,
    }
}

pub(crate) fn group_view(group: Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        budget_limit: group.budget_limit.map(|limit| limit.to_string()),
        created_at: group.created_at,
    }
}

fn split_view(split: Split) -> SplitView {
    SplitView {
        member: split.member,
        amount: split.amount.to_string(),
    }
}

fn comment_view(comment: Comment) -> CommentView {
    CommentView {
        id: comment.id,
        author: comment.author,
        text: comment.text,
        emoji: comment.emoji,
        created_at: comment.created_at,
    }
}

pub(crate) fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        group: expense.group_id,
        payer: expense.payer,
        amount: expense.amount.to_string(),
        category: expense.category,
        description: expense.description,
        split_type: split_type_to_api(expense.split_type),
        splits: expense.splits.into_iter().map(split_view).collect(),
        created_at: expense.created_at,
        locked: expense.locked,
        comments: expense.comments.into_iter().map(comment_view).collect(),
    }
}

pub(crate) fn settlement_view(settlement: Settlement) -> SettlementView {
    SettlementView {
        id: settlement.id,
        group: settlement.group_id,
        from: settlement.from,
        to: settlement.to,
        amount: settlement.amount.to_string(),
        note: settlement.note,
        created_at: settlement.created_at,
    }
}

pub(crate) fn balances_response(balances: Balances) -> BalancesResponse {
    BalancesResponse {
        balances: balances
            .into_vec()
            .into_iter()
            .map(|entry| BalanceView {
                member: entry.member,
                balance: entry.balance.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn plan_response(plan: SettlementPlan) -> SettlementPlanResponse {
    let residual = (!plan.is_balanced()).then(|| plan.residual.to_string());
    SettlementPlanResponse {
        settlements: plan
            .transfers
            .into_iter()
            .map(|transfer| TransferView {
                from: transfer.from,
                to: transfer.to,
                amount: transfer.amount.to_string(),
            })
            .collect(),
        residual,
    }
}

pub(crate) fn summary_response(summary: MonthlySummary) -> SummaryResponse {
    SummaryResponse {
        total: summary.total.to_string(),
        top_contributors: summary
            .top_contributors
            .into_iter()
            .map(|contributor| ContributorView {
                member: contributor.member,
                amount: contributor.amount.to_string(),
            })
            .collect(),
    }
}
