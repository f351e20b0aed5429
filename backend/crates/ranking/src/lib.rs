//! Ranking Backend Module
//!
//! Solo leaderboard, unrelated to rooms:
//! - `domain/` - Submissions, per-player totals, CSV encoding, repository trait
//! - `application/` - Submit, export and top-player use cases
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers
//!
//! Scores are bucketed by the reporting day in KST (UTC+9). One submission
//! is accepted per device and puzzle.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::RankingConfig;
pub use domain::repository::RankingRepository;
pub use error::{RankingError, RankingResult};
pub use infra::memory::InMemoryRankingRepository;
pub use infra::postgres::PgRankingRepository;
pub use presentation::router::{ranking_router, ranking_router_generic};

#[cfg(test)]
mod tests;
