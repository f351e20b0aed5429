//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions and a fixed-window in-memory store.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Storage backend error
pub type RateLimitError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at_ms: i64,
    count: u32,
}

/// Process-local fixed-window counter store
///
/// Windows that have elapsed are pruned lazily once the map grows past
/// `prune_threshold` keys.
#[derive(Debug)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
    prune_threshold: usize,
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            prune_threshold: 10_000,
        }
    }

    /// Same as [`RateLimitStore::check_and_increment`] with an explicit clock
    pub async fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let window_ms = config.window_ms();
        let mut windows = self.windows.lock().await;

        if windows.len() > self.prune_threshold {
            windows.retain(|_, w| now_ms - w.started_at_ms < window_ms);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at_ms: now_ms,
            count: 0,
        });
        if now_ms - window.started_at_ms >= window_ms {
            *window = Window {
                started_at_ms: now_ms,
                count: 0,
            };
        }

        let reset_at_ms = window.started_at_ms + window_ms;
        if window.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - window.count,
            reset_at_ms,
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)?;
        Ok(self.check_at(key, config, now_ms).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_up_to_limit_then_blocks() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        for expected_remaining in [2, 1, 0] {
            let r = store.check_at("join:1.2.3.4", &config, 1_000).await;
            assert!(r.allowed);
            assert_eq!(r.remaining, expected_remaining);
        }
        let r = store.check_at("join:1.2.3.4", &config, 1_500).await;
        assert!(!r.allowed);
        assert_eq!(r.reset_at_ms, 61_000);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_at("k", &config, 0).await.allowed);
        assert!(!store.check_at("k", &config, 59_999).await.allowed);
        assert!(store.check_at("k", &config, 60_000).await.allowed);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_at("a", &config, 0).await.allowed);
        assert!(store.check_at("b", &config, 0).await.allowed);
        assert!(!store.check_at("a", &config, 0).await.allowed);
    }

    #[tokio::test]
    async fn test_trait_uses_wall_clock() {
        let store = InMemoryRateLimitStore::new();
        let r = RateLimitStore::check_and_increment(&store, "k", &RateLimitConfig::default())
            .await
            .unwrap();
        assert!(r.allowed);
        assert_eq!(r.remaining, 9);
    }
}
