//! Expense API endpoints

use api_types::expense::{
    CommentNew, ExpenseCreated, ExpenseListQuery, ExpenseListResponse, ExpenseNew, ExpenseView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use engine::{CommentCmd, ExpenseCmd, ExpenseFilter, Split};
use uuid::Uuid;

use crate::{
    ServerError, parse_amount, parse_optional_amount,
    server::ServerState,
    views::{expense_view, split_type_from_api},
};

/// Handle requests for recording a new expense
///
/// The expense is stamped with the server clock. It is stored even when it
/// breaks the group budget; the response carries the evaluation so the client
/// can warn.
pub async fn expense_new(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let amount = parse_amount(&payload.amount)?;
    let splits = payload
        .splits
        .iter()
        .map(|split| -> Result<Split, ServerError> {
            Ok(Split::new(split.member.as_str(), parse_amount(&split.amount)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut cmd = ExpenseCmd::new(
        payload.group,
        payload.payer,
        amount,
        payload.category,
        Utc::now(),
    )
    .split_type(split_type_from_api(payload.split_type))
    .splits(splits);
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let added = state.engine.add_expense(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            over_limit: added.budget.over_limit,
            total: added.budget.total.to_string(),
            budget_limit: added.budget.limit.map(|limit| limit.to_string()),
            expense: expense_view(added.expense),
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(expense_id, Utc::now()).await?;
    Ok(Json(expense_view(expense)))
}

/// Handle requests for listing the expenses of a group
pub async fn list(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let filter = ExpenseFilter {
        category: query.category,
        min_amount: parse_optional_amount(query.min_amount.as_deref())?,
        max_amount: parse_optional_amount(query.max_amount.as_deref())?,
        from: query.from,
        to: query.to,
    };
    let expenses = state
        .engine
        .list_expenses(group_id, &filter, Utc::now())
        .await?;

    Ok(Json(ExpenseListResponse {
        expenses: expenses.into_iter().map(expense_view).collect(),
    }))
}

/// Handle requests for commenting an expense; locked expenses answer 403
pub async fn comment_new(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<CommentNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let mut cmd = CommentCmd::new(expense_id, payload.author, Utc::now());
    if let Some(text) = payload.text {
        cmd = cmd.text(text);
    }
    if let Some(emoji) = payload.emoji {
        cmd = cmd.emoji(emoji);
    }

    let expense = state.engine.add_comment(cmd).await?;
    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}

/// Handle requests for downloading the expenses of a group as CSV
pub async fn export_csv(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let body = state
        .engine
        .export_expenses_csv(group_id, Utc::now())
        .await?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    ))
}
