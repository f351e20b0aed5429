//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use platform::client::extract_client_ip;
use platform::rate_limit::RateLimitStore;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::application::config::RoomConfig;
use crate::application::create_room::CreateRoomUseCase;
use crate::application::end_game::EndGameUseCase;
use crate::application::get_puzzle::GetPuzzleUseCase;
use crate::application::get_state::GetStateUseCase;
use crate::application::join_room::{JoinRoomInput, JoinRoomUseCase};
use crate::application::reset_room::ResetRoomUseCase;
use crate::application::start_game::StartGameUseCase;
use crate::application::submit_result::{SubmitResultInput, SubmitResultUseCase};
use crate::application::update_config::UpdateConfigUseCase;
use crate::domain::repository::RoomRepository;
use crate::domain::value_objects::RoomId;
use crate::error::RoomResult;
use crate::presentation::dto::{
    ConfigRequest, CreateRoomResponse, HostRequest, JoinRequest, JoinResponse, PuzzleResponse,
    StateResponse, SubmitRequest,
};

/// Shared state for room handlers
pub struct RoomAppState<R, L> {
    pub repo: Arc<R>,
    pub rate_limiter: Arc<L>,
    pub config: Arc<RoomConfig>,
}

impl<R, L> Clone for RoomAppState<R, L> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            rate_limiter: self.rate_limiter.clone(),
            config: self.config.clone(),
        }
    }
}

/// Caller address: X-Forwarded-For first, then the peer address when the
/// server was started with connect info
pub struct ClientIp(pub Option<IpAddr>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientIp(extract_client_ip(&parts.headers, direct)))
    }
}

/// POST /api/rooms
pub async fn create_room<R, L>(
    State(state): State<RoomAppState<R, L>>,
    ClientIp(client_ip): ClientIp,
) -> RoomResult<Json<CreateRoomResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let use_case = CreateRoomUseCase::new(
        state.repo.clone(),
        state.rate_limiter.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(client_ip).await?;

    Ok(Json(CreateRoomResponse {
        ok: true,
        room_id: output.room_id.to_string(),
        host_token: output.host_secret.into_string(),
        pin: output.pin,
        expires_at: output.expires_at,
    }))
}

/// GET /api/rooms/{roomId}
pub async fn get_state<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let public = GetStateUseCase::new(state.repo.clone())
        .execute(&room_id)
        .await?;
    Ok(Json(StateResponse::new(public)))
}

/// GET /api/rooms/{roomId}/puzzle
pub async fn get_puzzle<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
) -> RoomResult<impl IntoResponse>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let puzzle = GetPuzzleUseCase::new(state.repo.clone())
        .execute(&room_id)
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(PuzzleResponse { ok: true, puzzle }),
    ))
}

/// POST /api/rooms/{roomId}/join
pub async fn join_room<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    ClientIp(client_ip): ClientIp,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> RoomResult<Json<JoinResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let use_case = JoinRoomUseCase::new(
        state.repo.clone(),
        state.rate_limiter.clone(),
        state.config.clone(),
    );
    let input = JoinRoomInput {
        room_id,
        nickname: req.nickname,
        affiliation: req.affiliation,
        pin: req.pin,
    };
    let member_id = use_case.execute(input, client_ip).await?;

    Ok(Json(JoinResponse {
        ok: true,
        member_id: member_id.to_string(),
    }))
}

/// POST /api/rooms/{roomId}/config
pub async fn update_config<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    body: Result<Json<ConfigRequest>, JsonRejection>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let public = UpdateConfigUseCase::new(state.repo.clone())
        .execute(&room_id, &req.host_token, req.patch)
        .await?;
    Ok(Json(StateResponse::new(public)))
}

/// POST /api/rooms/{roomId}/start
pub async fn start_game<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    body: Result<Json<HostRequest>, JsonRejection>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let public = StartGameUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&room_id, &req.host_token)
        .await?;
    Ok(Json(StateResponse::new(public)))
}

/// POST /api/rooms/{roomId}/submit
pub async fn submit_result<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let input = SubmitResultInput {
        room_id,
        member_id: req.member_id,
        score: req.score,
        time_ms: req.time_ms,
    };
    let public = SubmitResultUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;
    Ok(Json(StateResponse::new(public)))
}

/// POST /api/rooms/{roomId}/end
pub async fn end_game<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    body: Result<Json<HostRequest>, JsonRejection>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let public = EndGameUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&room_id, &req.host_token)
        .await?;
    Ok(Json(StateResponse::new(public)))
}

/// POST /api/rooms/{roomId}/reset
pub async fn reset_room<R, L>(
    State(state): State<RoomAppState<R, L>>,
    Path(room_id): Path<String>,
    body: Result<Json<HostRequest>, JsonRejection>,
) -> RoomResult<Json<StateResponse>>
where
    R: RoomRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&room_id)?;
    let Json(req) = body?;

    let public = ResetRoomUseCase::new(state.repo.clone())
        .execute(&room_id, &req.host_token)
        .await?;
    Ok(Json(StateResponse::new(public)))
}
