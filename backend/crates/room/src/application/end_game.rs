//! End Game Use Case

use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;

/// End Game Use Case
pub struct EndGameUseCase<R: RoomRepository> {
    repo: Arc<R>,
    config: Arc<RoomConfig>,
}

impl<R: RoomRepository> EndGameUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RoomConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, room_id: &RoomId, host_token: &str) -> RoomResult<PublicRoomState> {
        let ttl_ms = self.config.ended_ttl_ms();
        let now = now_ms();

        let ((), room) = self
            .repo
            .with_room(room_id, now, |room| {
                room.authorize_host(host_token)?;
                room.end(now, ttl_ms)
            })
            .await?;
        let state = PublicRoomState::from(&room);

        tracing::info!(room_id = %room_id, results = state.results.len(), "Game ended");
        Ok(state)
    }
}
