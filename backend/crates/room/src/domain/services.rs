//! Domain Services
//!
//! Pure functions over room data: submitted-value sanitizing, the
//! server-side score ceiling, and leaderboard ordering.

use puzzle::max_total;
use std::cmp::Ordering;

use crate::domain::entities::{GameResult, Room};
use crate::error::{RoomError, RoomResult};

/// Client numbers are floored and clamped to `0..=u64::MAX`; NaN becomes 0
pub fn clamp_non_negative(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX
        value.floor() as u64
    }
}

/// How far a claimed score is trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePolicy {
    /// Reject scores above what the server-measured time permits
    #[default]
    ServerVerified,
    /// Clamp only
    TrustClient,
}

/// Score and time as they will be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedSubmission {
    pub score: u32,
    pub time_ms: u64,
}

/// Check a claimed result against the room's run
///
/// `grace_ms` absorbs polling and network latency between the start
/// commit and the client's own timer starting.
pub fn verify_submission(
    room: &Room,
    claimed_score: u64,
    claimed_time_ms: u64,
    policy: ScorePolicy,
    grace_ms: i64,
    now_ms: i64,
) -> RoomResult<VerifiedSubmission> {
    let server_elapsed_ms = room
        .started_at
        .map(|started| (now_ms - started).max(0))
        .unwrap_or(0) as u64;

    match policy {
        ScorePolicy::TrustClient => Ok(VerifiedSubmission {
            score: u32::try_from(claimed_score).unwrap_or(u32::MAX),
            time_ms: claimed_time_ms,
        }),
        ScorePolicy::ServerVerified => {
            let fastest_secs = (server_elapsed_ms.saturating_sub(grace_ms.max(0) as u64)) / 1000;
            let ceiling = max_total(room.config.difficulty, fastest_secs, room.config.assists());
            if claimed_score > u64::from(ceiling) {
                return Err(RoomError::ScoreRejected {
                    claimed: claimed_score,
                    ceiling,
                });
            }
            Ok(VerifiedSubmission {
                score: claimed_score as u32,
                time_ms: claimed_time_ms.min(server_elapsed_ms),
            })
        }
    }
}

/// Score descending, time ascending, submission time ascending
pub fn leaderboard_order(a: &GameResult, b: &GameResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.time_ms.cmp(&b.time_ms))
        .then(a.submitted_at.cmp(&b.submitted_at))
}

/// Results sorted for display; the room keeps insertion order
pub fn ranked(results: &[GameResult]) -> Vec<&GameResult> {
    let mut sorted: Vec<&GameResult> = results.iter().collect();
    sorted.sort_by(|a, b| leaderboard_order(a, b));
    sorted
}
