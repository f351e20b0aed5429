//! Application Configuration

use chrono::TimeDelta;

/// Ranking application configuration
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Shift from UTC to the reporting day (KST)
    pub day_offset: TimeDelta,
    /// Upper bound on exported rows
    pub export_limit: usize,
    /// Players listed by GET /api/rankings
    pub top_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            day_offset: TimeDelta::hours(9),
            export_limit: 1_000,
            top_limit: 1,
        }
    }
}
