//! Group API endpoints

use api_types::group::{BudgetUpdate, GroupNew, GroupView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, parse_optional_amount, server::ServerState, views::group_view};

/// Handle requests for creating a new group
pub async fn group_new(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let budget_limit = parse_optional_amount(payload.budget_limit.as_deref())?;
    let group = state
        .engine
        .new_group(&payload.name, budget_limit, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(group_view(group))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.engine.group(group_id).await?;
    Ok(Json(group_view(group)))
}

/// Set or clear the monthly budget of a group
pub async fn budget_update(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<GroupView>, ServerError> {
    let budget_limit = parse_optional_amount(payload.budget_limit.as_deref())?;
    let group = state
        .engine
        .set_budget_limit(group_id, budget_limit)
        .await?;
    Ok(Json(group_view(group)))
}
