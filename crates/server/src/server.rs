use axum::{
    Router,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::{balances, expenses, groups, settlements};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", post(groups::group_new))
        .route("/groups/{group_id}", get(groups::get))
        .route("/groups/{group_id}/budget", patch(groups::budget_update))
        .route("/groups/{group_id}/expenses", get(expenses::list))
        .route("/groups/{group_id}/export.csv", get(expenses::export_csv))
        .route("/groups/{group_id}/balances", get(balances::get_balances))
        .route("/groups/{group_id}/verify", get(balances::verify))
        .route("/groups/{group_id}/summary", get(balances::get_summary))
        .route("/groups/{group_id}/settlements", get(settlements::list))
        .route(
            "/groups/{group_id}/settlements/plan",
            get(balances::get_plan),
        )
        .route("/expenses", post(expenses::expense_new))
        .route("/expenses/{expense_id}", get(expenses::get))
        .route(
            "/expenses/{expense_id}/comments",
            post(expenses::comment_new),
        )
        .route("/settlements", post(settlements::settlement_new))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
