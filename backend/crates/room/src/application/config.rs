//! Application Configuration
//!
//! Configuration for the room application layer.

use platform::rate_limit::RateLimitConfig;
use puzzle::{GeneratorOptions, PickPolicy};
use std::time::Duration;

use crate::domain::entities::JoinLimits;

pub use crate::domain::services::ScorePolicy;

/// Room application configuration
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Lifetime of a freshly created room
    pub create_ttl: Duration,
    /// A join keeps the room alive at least this long
    pub join_ttl_floor: Duration,
    /// Lifetime left after the host ends a game
    pub ended_ttl: Duration,
    /// Room code attempts before giving up on create
    pub id_attempts: u32,
    pub nickname_max_chars: usize,
    pub affiliation_max_chars: usize,
    /// Generator attempts before the static pool is used
    pub generation_attempts: usize,
    /// Carve puzzles with a unique solution
    pub unique_puzzles: bool,
    pub score_policy: ScorePolicy,
    /// Latency allowance when measuring elapsed time server-side
    pub score_grace: Duration,
    pub create_rate_limit: RateLimitConfig,
    pub join_rate_limit: RateLimitConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            create_ttl: Duration::from_secs(3 * 60 * 60),
            join_ttl_floor: Duration::from_secs(60 * 60),
            ended_ttl: Duration::from_secs(30 * 60),
            id_attempts: 5,
            nickname_max_chars: 20,
            affiliation_max_chars: 30,
            generation_attempts: 25,
            unique_puzzles: false,
            score_policy: ScorePolicy::ServerVerified,
            score_grace: Duration::from_secs(10),
            create_rate_limit: RateLimitConfig::new(10, 60),
            join_rate_limit: RateLimitConfig::new(30, 60),
        }
    }
}

impl RoomConfig {
    /// Create config for development (client-reported scores trusted,
    /// generous rate limits)
    pub fn development() -> Self {
        Self {
            score_policy: ScorePolicy::TrustClient,
            create_rate_limit: RateLimitConfig::new(1_000, 60),
            join_rate_limit: RateLimitConfig::new(1_000, 60),
            ..Default::default()
        }
    }

    pub fn create_ttl_ms(&self) -> i64 {
        self.create_ttl.as_millis() as i64
    }

    pub fn join_ttl_floor_ms(&self) -> i64 {
        self.join_ttl_floor.as_millis() as i64
    }

    pub fn ended_ttl_ms(&self) -> i64 {
        self.ended_ttl.as_millis() as i64
    }

    pub fn score_grace_ms(&self) -> i64 {
        self.score_grace.as_millis() as i64
    }

    pub fn join_limits(&self) -> JoinLimits {
        JoinLimits {
            nickname_max_chars: self.nickname_max_chars,
            affiliation_max_chars: self.affiliation_max_chars,
            ttl_floor_ms: self.join_ttl_floor_ms(),
        }
    }

    pub fn pick_policy(&self) -> PickPolicy {
        PickPolicy {
            attempts: self.generation_attempts,
            generator: GeneratorOptions {
                unique: self.unique_puzzles,
            },
        }
    }
}
