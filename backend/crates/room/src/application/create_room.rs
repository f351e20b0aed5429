//! Create Room Use Case

use platform::rate_limit::RateLimitStore;
use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::{enforce_rate_limit, now_ms};
use crate::domain::entities::Room;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::{HostSecret, JoinPin, RoomId};
use crate::error::{RoomError, RoomResult};

/// Output DTO for create room; the only time the secret and PIN leave
/// the server
#[derive(Debug, Clone)]
pub struct CreateRoomOutput {
    pub room_id: RoomId,
    pub host_secret: HostSecret,
    pub pin: String,
    pub expires_at: i64,
}

/// Create Room Use Case
pub struct CreateRoomUseCase<R, L>
where
    R: RoomRepository,
    L: RateLimitStore,
{
    repo: Arc<R>,
    rate_limiter: Arc<L>,
    config: Arc<RoomConfig>,
}

impl<R, L> CreateRoomUseCase<R, L>
where
    R: RoomRepository,
    L: RateLimitStore,
{
    pub fn new(repo: Arc<R>, rate_limiter: Arc<L>, config: Arc<RoomConfig>) -> Self {
        Self {
            repo,
            rate_limiter,
            config,
        }
    }

    pub async fn execute(&self, client_ip: Option<IpAddr>) -> RoomResult<CreateRoomOutput> {
        enforce_rate_limit(
            self.rate_limiter.as_ref(),
            "create",
            client_ip,
            &self.config.create_rate_limit,
        )
        .await?;

        for attempt in 1..=self.config.id_attempts {
            let host_secret = HostSecret::generate();
            let pin = JoinPin::generate();
            let room = Room::new(
                RoomId::generate(),
                host_secret.digest(),
                pin.clone(),
                now_ms(),
                self.config.create_ttl_ms(),
            );

            if self.repo.insert(&room).await? {
                tracing::info!(room_id = %room.id, attempt, "Room created");
                return Ok(CreateRoomOutput {
                    room_id: room.id,
                    host_secret,
                    pin: pin.as_str().to_string(),
                    expires_at: room.expires_at,
                });
            }
            tracing::debug!(room_id = %room.id, attempt, "Room id collision");
        }

        Err(RoomError::Internal(format!(
            "no free room id after {} attempts",
            self.config.id_attempts
        )))
    }
}
