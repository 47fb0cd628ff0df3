//! `users` subscription over Server-Sent Events.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::{Stream, StreamExt};
use tracing::{info, warn};

use crate::gateway::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/subscriptions/users", get(subscribe_users))
}

/// One `users` event per change, carrying the full list.
///
/// When the client disconnects axum drops the stream, which drops the
/// subscription and unregisters it on the next publish.
async fn subscribe_users(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let subscription = state.user_client.subscribe_users().await?;
    info!(subscriber_id = %subscription.id(), "Subscription stream opened");

    let events = subscription.filter_map(|snapshot| async move {
        match Event::default().event("users").json_data(&*snapshot) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!(error = %e, "Failed to encode snapshot");
                None
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
