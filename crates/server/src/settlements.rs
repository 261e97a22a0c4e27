//! Settlement API endpoints

use api_types::settlement::{SettlementListResponse, SettlementNew, SettlementView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::SettlementCmd;
use uuid::Uuid;

use crate::{ServerError, parse_amount, server::ServerState, views::settlement_view};

/// Handle requests for recording a payment between two members
pub async fn settlement_new(
    State(state): State<ServerState>,
    Json(payload): Json<SettlementNew>,
) -> Result<(StatusCode, Json<SettlementView>), ServerError> {
    let amount = parse_amount(&payload.amount)?;
    let mut cmd = SettlementCmd::new(
        payload.group,
        payload.from,
        payload.to,
        amount,
        Utc::now(),
    );
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }

    let settlement = state.engine.record_settlement(cmd).await?;
    Ok((StatusCode::CREATED, Json(settlement_view(settlement))))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<SettlementListResponse>, ServerError> {
    let settlements = state.engine.settlements(group_id).await?;
    Ok(Json(SettlementListResponse {
        settlements: settlements.into_iter().map(settlement_view).collect(),
    }))
}
