//! Submit Result Use Case

use kernel::id::MemberId;
use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::services::{clamp_non_negative, verify_submission};
use crate::domain::value_objects::RoomId;
use crate::error::{RoomError, RoomResult};

/// Input DTO for submit result
#[derive(Debug, Clone)]
pub struct SubmitResultInput {
    pub room_id: RoomId,
    /// Raw capability as presented; an unparsable id is an unknown member
    pub member_id: String,
    /// Client-reported, checked against the score policy
    pub score: f64,
    /// Client-reported, clamped to the server-measured elapsed time
    pub time_ms: f64,
}

/// Submit Result Use Case
pub struct SubmitResultUseCase<R: RoomRepository> {
    repo: Arc<R>,
    config: Arc<RoomConfig>,
}

impl<R: RoomRepository> SubmitResultUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RoomConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SubmitResultInput) -> RoomResult<PublicRoomState> {
        let member_id = input.member_id.parse::<MemberId>().ok();
        let claimed_score = clamp_non_negative(input.score);
        let claimed_time_ms = clamp_non_negative(input.time_ms);
        let policy = self.config.score_policy;
        let grace_ms = self.config.score_grace_ms();
        let now = now_ms();

        let (recorded, room) = self
            .repo
            .with_room(&input.room_id, now, |room| {
                room.ensure_running()?;
                let member_id = member_id.ok_or(RoomError::MemberNotFound)?;
                room.ensure_submittable(&member_id)?;
                let verified =
                    verify_submission(room, claimed_score, claimed_time_ms, policy, grace_ms, now)?;
                room.submit(&member_id, verified.score, verified.time_ms, now)?;
                Ok(verified)
            })
            .await?;
        let state = PublicRoomState::from(&room);

        tracing::info!(
            room_id = %input.room_id,
            score = recorded.score,
            time_ms = recorded.time_ms,
            "Result submitted"
        );
        Ok(state)
    }
}
