//! Start Game Use Case

use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::now_ms;
use crate::application::public_state::PublicRoomState;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;

/// Start Game Use Case
pub struct StartGameUseCase<R: RoomRepository> {
    repo: Arc<R>,
    config: Arc<RoomConfig>,
}

impl<R: RoomRepository> StartGameUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RoomConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, room_id: &RoomId, host_token: &str) -> RoomResult<PublicRoomState> {
        let policy = self.config.pick_policy();
        let now = now_ms();

        let ((), room) = self
            .repo
            .with_room(room_id, now, |room| {
                room.authorize_host(host_token)?;
                room.ensure_startable()?;
                let puzzle = puzzle::pick(
                    room.config.difficulty,
                    &room.recent_puzzle_ids,
                    &policy,
                    &mut rand::rng(),
                );
                room.start(puzzle, now)
            })
            .await?;
        let state = PublicRoomState::from(&room);

        tracing::info!(
            room_id = %room_id,
            puzzle_id = state.puzzle_id.as_deref().unwrap_or_default(),
            members = state.members.len(),
            "Game started"
        );
        Ok(state)
    }
}
