//! API DTOs (Data Transfer Objects)

use puzzle::Puzzle;
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::public_state::PublicRoomState;
use crate::domain::value_objects::ConfigPatch;

/// Accept `"123456"` as well as `123456`
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

/// Response for POST /api/rooms
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub ok: bool,
    pub room_id: String,
    pub host_token: String,
    pub pin: String,
    pub expires_at: i64,
}

/// Response carrying the public projection
#[derive(Debug, Clone, Serialize)]
pub struct StateResponse {
    pub ok: bool,
    pub state: PublicRoomState,
}

impl StateResponse {
    pub fn new(state: PublicRoomState) -> Self {
        Self { ok: true, state }
    }
}

/// Response for GET /api/rooms/{roomId}/puzzle
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleResponse {
    pub ok: bool,
    pub puzzle: Puzzle,
}

/// Request for POST /api/rooms/{roomId}/join
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pin: String,
}

/// Response for POST /api/rooms/{roomId}/join
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub ok: bool,
    pub member_id: String,
}

/// Request for host-only transitions without further input
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRequest {
    #[serde(default)]
    pub host_token: String,
}

/// Request for POST /api/rooms/{roomId}/config
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequest {
    #[serde(default)]
    pub host_token: String,
    #[serde(flatten)]
    pub patch: ConfigPatch,
}

/// Request for POST /api/rooms/{roomId}/submit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub time_ms: f64,
}
