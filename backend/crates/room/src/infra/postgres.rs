//! PostgreSQL Repository Implementation
//!
//! Rooms are stored as JSONB documents in `room_states`; `expires_at_ms`
//! is mirrored into its own column for the expiry sweep.

use chrono::Utc;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::Room;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::{RoomError, RoomResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_if_expired(&self, id: &RoomId, now_ms: i64) -> RoomResult<()> {
        sqlx::query("DELETE FROM room_states WHERE id = $1 AND expires_at_ms <= $2")
            .bind(id.as_str())
            .bind(now_ms)
            .execute(&self.pool)
            .await?;
        tracing::info!(room_id = %id, "Expired room removed");
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    state: Json<Room>,
}

impl RoomRepository for PgRoomRepository {
    async fn insert(&self, room: &Room) -> RoomResult<bool> {
        // An expired room may be overwritten by a new one with the same code
        let result = sqlx::query(
            r#"
            INSERT INTO room_states (id, state, expires_at_ms, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET state = EXCLUDED.state,
                    expires_at_ms = EXCLUDED.expires_at_ms,
                    updated_at = EXCLUDED.updated_at
                WHERE room_states.expires_at_ms <= $5
            "#,
        )
        .bind(room.id.as_str())
        .bind(Json(room))
        .bind(room.expires_at)
        .bind(Utc::now())
        .bind(room.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, id: &RoomId, now_ms: i64) -> RoomResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>("SELECT state FROM room_states WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(RoomRow { state: Json(room) }) if room.is_expired(now_ms) => {
                self.delete_if_expired(id, now_ms).await?;
                Ok(None)
            }
            Some(RoomRow { state: Json(room) }) => Ok(Some(room)),
            None => Ok(None),
        }
    }

    async fn put(&self, room: &Room) -> RoomResult<()> {
        let result = sqlx::query(
            "UPDATE room_states SET state = $2, expires_at_ms = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(room.id.as_str())
        .bind(Json(room))
        .bind(room.expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RoomError::RoomNotFound);
        }
        Ok(())
    }

    async fn with_room<T, F>(&self, id: &RoomId, now_ms: i64, f: F) -> RoomResult<(T, Room)>
    where
        T: Send,
        F: FnOnce(&mut Room) -> RoomResult<T> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT state FROM room_states WHERE id = $1 FOR UPDATE",
        )
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(RoomRow { state: Json(room) }) = row else {
            tx.rollback().await?;
            return Err(RoomError::RoomNotFound);
        };

        if room.is_expired(now_ms) {
            sqlx::query("DELETE FROM room_states WHERE id = $1")
                .bind(id.as_str())
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            tracing::info!(room_id = %id, "Expired room removed");
            return Err(RoomError::RoomNotFound);
        }

        let mut working = room.clone();
        let output = match f(&mut working) {
            Ok(output) => output,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };
        if working == room {
            tx.rollback().await?;
            return Ok((output, working));
        }
        working.version += 1;

        sqlx::query(
            "UPDATE room_states SET state = $2, expires_at_ms = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(Json(&working))
        .bind(working.expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((output, working))
    }

    async fn delete_expired(&self, now_ms: i64) -> RoomResult<u64> {
        let deleted = sqlx::query("DELETE FROM room_states WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(rooms = deleted, "Cleaned up expired rooms");
        Ok(deleted)
    }
}
