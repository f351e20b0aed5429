//! Room Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitStore};
use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::domain::repository::RoomRepository;
use crate::infra::postgres::PgRoomRepository;
use crate::presentation::handlers::{self, RoomAppState};

/// Create the room router with the PostgreSQL repository and a
/// process-local rate limiter
pub fn room_router(repo: PgRoomRepository, config: RoomConfig) -> Router {
    room_router_generic(repo, InMemoryRateLimitStore::new(), config)
}

/// Create a generic room router for any repository and limiter
pub fn room_router_generic<R, L>(repo: R, rate_limiter: L, config: RoomConfig) -> Router
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let state = RoomAppState {
        repo: Arc::new(repo),
        rate_limiter: Arc::new(rate_limiter),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", post(handlers::create_room::<R, L>))
        .route("/{room_id}", get(handlers::get_state::<R, L>))
        .route("/{room_id}/puzzle", get(handlers::get_puzzle::<R, L>))
        .route("/{room_id}/join", post(handlers::join_room::<R, L>))
        .route("/{room_id}/config", post(handlers::update_config::<R, L>))
        .route("/{room_id}/start", post(handlers::start_game::<R, L>))
        .route("/{room_id}/submit", post(handlers::submit_result::<R, L>))
        .route("/{room_id}/end", post(handlers::end_game::<R, L>))
        .route("/{room_id}/reset", post(handlers::reset_room::<R, L>))
        .with_state(state)
}
