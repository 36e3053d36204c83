//! HTTP routes for session endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    cast_vote, create_session, end_session, join_session, reset_votes, reveal_votes,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/:code/join", post(join_session))
        .route("/:code/vote", post(cast_vote))
        .route("/:code/reveal", post(reveal_votes))
        .route("/:code/reset", post(reset_votes))
        .route("/:code/end", post(end_session))
        .with_state(handlers)
}
