//! Get Puzzle Use Case

use puzzle::Puzzle;
use std::sync::Arc;

use crate::application::now_ms;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::{RoomId, RoomStatus};
use crate::error::{RoomError, RoomResult};

/// Get Puzzle Use Case
///
/// The puzzle is only served while the game runs, so nobody sees it
/// before the host starts.
pub struct GetPuzzleUseCase<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> GetPuzzleUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, room_id: &RoomId) -> RoomResult<Puzzle> {
        let room = self
            .repo
            .get(room_id, now_ms())
            .await?
            .ok_or(RoomError::RoomNotFound)?;

        match (room.status, room.puzzle) {
            (RoomStatus::Running, Some(puzzle)) => Ok(puzzle),
            _ => Err(RoomError::NoPuzzle),
        }
    }
}
