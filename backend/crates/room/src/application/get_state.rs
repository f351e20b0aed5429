//! Get State Use Case

use std::sync::Arc;

use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::{RoomError, RoomResult};

/// Get State Use Case
pub struct GetStateUseCase<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> GetStateUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, room_id: &RoomId) -> RoomResult<PublicRoomState> {
        let room = self
            .repo
            .get(room_id, now_ms())
            .await?
            .ok_or(RoomError::RoomNotFound)?;
        Ok(PublicRoomState::from(&room))
    }
}
