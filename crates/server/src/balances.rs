//! Balance, settlement plan and summary endpoints

use api_types::{
    balance::BalancesResponse,
    settlement::SettlementPlanResponse,
    summary::{SummaryQuery, SummaryResponse},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    views::{balances_response, plan_response, summary_response},
};

pub async fn get_balances(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = state.engine.group_balances(group_id, Utc::now()).await?;
    Ok(Json(balances_response(balances)))
}

/// Handle requests for the payments that settle a group
///
/// An unbalanced ledger still gets a plan, with the leftover in `residual`.
pub async fn get_plan(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<SettlementPlanResponse>, ServerError> {
    let plan = state.engine.settlement_plan(group_id, Utc::now()).await?;
    Ok(Json(plan_response(plan)))
}

/// Answer 409 when the balances of a group do not net out
pub async fn verify(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = state.engine.verify_ledger(group_id, Utc::now()).await?;
    Ok(Json(balances_response(balances)))
}

pub async fn get_summary(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let summary = state
        .engine
        .monthly_summary(group_id, query.year, query.month, Utc::now())
        .await?;
    Ok(Json(summary_response(summary)))
}
