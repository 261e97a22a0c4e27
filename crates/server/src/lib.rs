use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, MoneyCents};

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod balances;
mod expenses;
mod groups;
mod server;
mod settlements;
mod views;

pub mod types {
    pub mod group {
        pub use api_types::group::{BudgetUpdate, GroupNew, GroupView};
    }

    pub mod expense {
        pub use api_types::expense::{
            CommentNew, CommentView, ExpenseCreated, ExpenseListQuery, ExpenseListResponse,
            ExpenseNew, ExpenseView, SplitType, SplitView,
        };
    }

    pub mod settlement {
        pub use api_types::settlement::{
            SettlementListResponse, SettlementNew, SettlementPlanResponse, SettlementView,
            TransferView,
        };
    }

    pub mod balance {
        pub use api_types::balance::{BalanceView, BalancesResponse};
    }

    pub mod summary {
        pub use api_types::summary::{ContributorView, SummaryQuery, SummaryResponse};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Inconsistency(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_) | EngineError::InvalidAmount(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Csv(csv_err) => {
            tracing::error!("csv error: {csv_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Parse a decimal amount coming from a request body or query string.
fn parse_amount(value: &str) -> Result<MoneyCents, ServerError> {
    value.parse::<MoneyCents>().map_err(ServerError::from)
}

fn parse_optional_amount(value: Option<&str>) -> Result<Option<MoneyCents>, ServerError> {
    value.map(parse_amount).transpose()
}
