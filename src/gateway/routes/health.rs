//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::gateway::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong!" })
}
