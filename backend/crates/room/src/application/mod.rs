//! Application Layer - Use Cases
//!
//! One use case per room operation. Each loads the room through the
//! repository, applies one domain transition atomically and returns a
//! sanitized projection.

pub mod config;
pub mod create_room;
pub mod end_game;
pub mod get_puzzle;
pub mod get_state;
pub mod join_room;
pub mod public_state;
pub mod reset_room;
pub mod start_game;
pub mod submit_result;
pub mod update_config;

/// Wall clock used by every use case
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

use platform::client::client_key;
use platform::rate_limit::{RateLimitConfig, RateLimitStore};
use std::net::IpAddr;

use crate::error::{RoomError, RoomResult};

/// Count one request against the caller's window
pub(crate) async fn enforce_rate_limit<L: RateLimitStore>(
    store: &L,
    scope: &str,
    client_ip: Option<IpAddr>,
    config: &RateLimitConfig,
) -> RoomResult<()> {
    let key = client_key(scope, client_ip);
    let result = store
        .check_and_increment(&key, config)
        .await
        .map_err(|e| RoomError::Internal(e.to_string()))?;

    if !result.allowed {
        tracing::warn!(key = %key, reset_at_ms = result.reset_at_ms, "Rate limit hit");
        return Err(RoomError::RateLimited);
    }
    Ok(())
}
