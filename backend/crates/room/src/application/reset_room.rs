//! Reset Room Use Case

use std::sync::Arc;

use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;

/// Reset Room Use Case
pub struct ResetRoomUseCase<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> ResetRoomUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, room_id: &RoomId, host_token: &str) -> RoomResult<PublicRoomState> {
        let ((), room) = self
            .repo
            .with_room(room_id, now_ms(), |room| {
                room.authorize_host(host_token)?;
                room.reset()
            })
            .await?;
        let state = PublicRoomState::from(&room);

        tracing::info!(room_id = %room_id, members = state.members.len(), "Room reset");
        Ok(state)
    }
}
