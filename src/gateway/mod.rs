//! HTTP/JSON front for the user registry.
//!
//! Handlers only translate requests into [`UserClient`] calls; all state
//! lives behind the client.

pub mod error;
pub mod routes;

pub use error::AppError;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::UserClient;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub user_client: UserClient,
}

impl AppState {
    pub fn new(user_client: UserClient) -> Self {
        Self { user_client }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::users::routes())
        .merge(routes::subscription::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
