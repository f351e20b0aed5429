//! In-memory Repository Implementation

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::Room;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::{RoomError, RoomResult};

/// One room behind its own lock; `None` once the room is gone
type Slot = Arc<Mutex<Option<Room>>>;

/// Process-local room store
///
/// The outer map lock is held only long enough to find, insert or remove a
/// slot. Read-modify-write cycles serialize on the per-room mutex, so rooms
/// never wait on each other.
#[derive(Clone, Default)]
pub struct InMemoryRoomRepository {
    slots: Arc<RwLock<HashMap<RoomId, Slot>>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: &RoomId) -> Option<Slot> {
        self.slots.read().await.get(id).cloned()
    }

    /// Drop the map entry if it still points at `slot`
    async fn forget(&self, id: &RoomId, slot: &Slot) {
        let mut slots = self.slots.write().await;
        if slots.get(id).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(id);
        }
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: &Room) -> RoomResult<bool> {
        let mut slots = self.slots.write().await;
        if let Some(existing) = slots.get(&room.id) {
            let mut guard = existing.lock().await;
            if guard.as_ref().is_some_and(|r| !r.is_expired(room.created_at)) {
                return Ok(false);
            }
            *guard = None;
        }
        slots.insert(room.id.clone(), Arc::new(Mutex::new(Some(room.clone()))));
        tracing::debug!(room_id = %room.id, "Room stored");
        Ok(true)
    }

    async fn get(&self, id: &RoomId, now_ms: i64) -> RoomResult<Option<Room>> {
        let Some(slot) = self.slot(id).await else {
            return Ok(None);
        };
        let mut guard = slot.lock().await;
        match guard.as_ref() {
            Some(room) if room.is_expired(now_ms) => {
                *guard = None;
                drop(guard);
                self.forget(id, &slot).await;
                tracing::info!(room_id = %id, "Expired room removed");
                Ok(None)
            }
            Some(room) => Ok(Some(room.clone())),
            None => Ok(None),
        }
    }

    async fn put(&self, room: &Room) -> RoomResult<()> {
        let slot = self.slot(&room.id).await.ok_or(RoomError::RoomNotFound)?;
        let mut guard = slot.lock().await;
        if guard.is_none() {
            return Err(RoomError::RoomNotFound);
        }
        *guard = Some(room.clone());
        Ok(())
    }

    async fn with_room<T, F>(&self, id: &RoomId, now_ms: i64, f: F) -> RoomResult<(T, Room)>
    where
        T: Send,
        F: FnOnce(&mut Room) -> RoomResult<T> + Send,
    {
        let slot = self.slot(id).await.ok_or(RoomError::RoomNotFound)?;
        let mut guard = slot.lock().await;

        let Some(current) = guard.as_ref() else {
            return Err(RoomError::RoomNotFound);
        };
        if current.is_expired(now_ms) {
            *guard = None;
            drop(guard);
            self.forget(id, &slot).await;
            tracing::info!(room_id = %id, "Expired room removed");
            return Err(RoomError::RoomNotFound);
        }

        let mut working = current.clone();
        let output = f(&mut working)?;
        if working == *current {
            return Ok((output, working));
        }
        working.version += 1;
        *guard = Some(working.clone());
        Ok((output, working))
    }

    async fn delete_expired(&self, now_ms: i64) -> RoomResult<u64> {
        let mut slots = self.slots.write().await;
        let mut expired = Vec::new();
        for (id, slot) in slots.iter() {
            let mut guard = slot.lock().await;
            if guard.as_ref().is_none_or(|room| room.is_expired(now_ms)) {
                *guard = None;
                expired.push(id.clone());
            }
        }
        for id in &expired {
            slots.remove(id);
        }
        Ok(expired.len() as u64)
    }
}
