//! Public room projection
//!
//! The only view of a room that leaves the server. It carries no host
//! secret, no full PIN, no member ids and no puzzle data.

use serde::Serialize;

use crate::domain::entities::Room;
use crate::domain::services::ranked;
use crate::domain::value_objects::{GameConfig, RoomStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMember {
    pub nickname: String,
    pub affiliation: String,
    pub submitted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicResult {
    pub nickname: String,
    pub affiliation: String,
    pub score: u32,
    pub time_ms: u64,
    pub submitted_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub result: PublicResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRoomState {
    pub id: String,
    pub status: RoomStatus,
    pub version: u64,
    pub created_at: i64,
    pub expires_at: i64,
    pub config: GameConfig,
    pub members: Vec<PublicMember>,
    pub puzzle_id: Option<String>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    /// Submission order
    pub results: Vec<PublicResult>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub pin_hint: String,
}

impl From<&Room> for PublicRoomState {
    fn from(room: &Room) -> Self {
        let to_public = |r: &crate::domain::entities::GameResult| PublicResult {
            nickname: r.nickname.as_str().to_string(),
            affiliation: r.affiliation.as_str().to_string(),
            score: r.score,
            time_ms: r.time_ms,
            submitted_at: r.submitted_at,
        };

        Self {
            id: room.id.to_string(),
            status: room.status,
            version: room.version,
            created_at: room.created_at,
            expires_at: room.expires_at,
            config: room.config,
            members: room
                .members
                .iter()
                .map(|m| PublicMember {
                    nickname: m.nickname.as_str().to_string(),
                    affiliation: m.affiliation.as_str().to_string(),
                    submitted: room.has_submitted(&m.id),
                })
                .collect(),
            puzzle_id: room.puzzle_id().map(str::to_string),
            started_at: room.started_at,
            ended_at: room.ended_at,
            results: room.results.iter().map(to_public).collect(),
            leaderboard: ranked(&room.results)
                .into_iter()
                .enumerate()
                .map(|(i, r)| LeaderboardEntry {
                    rank: i + 1,
                    result: to_public(r),
                })
                .collect(),
            pin_hint: room.join_pin.hint(),
        }
    }
}
