//! Join Room Use Case

use kernel::id::MemberId;
use platform::rate_limit::RateLimitStore;
use std::net::IpAddr;
use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::{enforce_rate_limit, now_ms};
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;

/// Input DTO for join room
#[derive(Debug, Clone)]
pub struct JoinRoomInput {
    pub room_id: RoomId,
    pub nickname: String,
    pub affiliation: String,
    pub pin: String,
}

/// Join Room Use Case
pub struct JoinRoomUseCase<R, L>
where
    R: RoomRepository,
    L: RateLimitStore,
{
    repo: Arc<R>,
    rate_limiter: Arc<L>,
    config: Arc<RoomConfig>,
}

impl<R, L> JoinRoomUseCase<R, L>
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

    pub async fn execute(
        &self,
        input: JoinRoomInput,
        client_ip: Option<IpAddr>,
    ) -> RoomResult<MemberId> {
        enforce_rate_limit(
            self.rate_limiter.as_ref(),
            "join",
            client_ip,
            &self.config.join_rate_limit,
        )
        .await?;

        let limits = self.config.join_limits();
        let now = now_ms();
        let (member_id, _) = self
            .repo
            .with_room(&input.room_id, now, |room| {
                room.join(&input.nickname, &input.affiliation, &input.pin, &limits, now)
            })
            .await?;

        tracing::info!(room_id = %input.room_id, member_id = %member_id, "Member joined");
        Ok(member_id)
    }
}
