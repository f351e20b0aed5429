//! Update Config Use Case

use std::sync::Arc;

use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::{ConfigPatch, RoomId};
use crate::error::RoomResult;

/// Update Config Use Case
pub struct UpdateConfigUseCase<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> UpdateConfigUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        host_token: &str,
        patch: ConfigPatch,
    ) -> RoomResult<PublicRoomState> {
        let ((), room) = self
            .repo
            .with_room(room_id, now_ms(), |room| {
                room.authorize_host(host_token)?;
                room.update_config(&patch)
            })
            .await?;
        let state = PublicRoomState::from(&room);

        tracing::info!(
            room_id = %room_id,
            difficulty = %state.config.difficulty,
            highlight_same_numbers = state.config.highlight_same_numbers,
            show_completed_numbers = state.config.show_completed_numbers,
            "Room config updated"
        );
        Ok(state)
    }
}
