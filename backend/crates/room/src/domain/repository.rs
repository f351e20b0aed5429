//! Repository Traits
//!
//! Interfaces for room persistence. Implementations live in the infra layer.

use crate::domain::entities::Room;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;

/// Keyed storage of one [`Room`] per id
///
/// Expiry is lazy: every read path compares `expires_at` with `now_ms`,
/// deletes an expired room and reports it as absent.
#[trait_variant::make(RoomRepository: Send)]
pub trait LocalRoomRepository {
    /// Store a new room. `Ok(false)` when a live room already has the id.
    async fn insert(&self, room: &Room) -> RoomResult<bool>;

    /// Load a live room
    async fn get(&self, id: &RoomId, now_ms: i64) -> RoomResult<Option<Room>>;

    /// Overwrite an existing room
    async fn put(&self, room: &Room) -> RoomResult<()>;

    /// Atomic read-modify-write
    ///
    /// `f` runs on a working copy while no other `with_room` call for the
    /// same id can interleave. When `f` returns `Ok` and the copy differs
    /// from the stored room, `version` is bumped and the copy committed;
    /// an unchanged copy writes nothing. Returns `f`'s output with the room
    /// as stored afterwards. A missing or expired room fails with
    /// `RoomNotFound` without calling `f`.
    async fn with_room<T, F>(&self, id: &RoomId, now_ms: i64, f: F) -> RoomResult<(T, Room)>
    where
        T: Send,
        F: FnOnce(&mut Room) -> RoomResult<T> + Send;

    /// Remove every room expired at `now_ms`; returns how many
    async fn delete_expired(&self, now_ms: i64) -> RoomResult<u64>;
}
