//! Ranking Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::RankingConfig;
use crate::domain::repository::RankingRepository;
use crate::infra::postgres::PgRankingRepository;
use crate::presentation::handlers::{self, RankingAppState};

/// Create the ranking router with the PostgreSQL repository
pub fn ranking_router(repo: PgRankingRepository, config: RankingConfig) -> Router {
    ranking_router_generic(repo, config)
}

/// Create a generic ranking router for any repository
pub fn ranking_router_generic<R>(repo: R, config: RankingConfig) -> Router
where
    R: RankingRepository + Send + Sync + 'static,
{
    let state = RankingAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/submit", post(handlers::submit_score::<R>))
        .route("/export", get(handlers::export_rankings::<R>))
        .route("/rankings", get(handlers::get_rankings::<R>))
        .with_state(state)
}
