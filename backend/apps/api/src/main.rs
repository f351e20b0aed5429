//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use axum::{
    Router, http,
    http::{Method, header},
};
use platform::rate_limit::InMemoryRateLimitStore;
use ranking::{
    InMemoryRankingRepository, PgRankingRepository, RankingConfig, ranking_router,
    ranking_router_generic,
};
use room::{
    InMemoryRoomRepository, PgRoomRepository, RoomConfig, RoomRepository, room_router,
    room_router_generic,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Startup sweep; errors here should not prevent server startup
async fn sweep_expired_rooms<R: RoomRepository>(repo: &R) {
    let now_ms = chrono::Utc::now().timestamp_millis();
    match repo.delete_expired(now_ms).await {
        Ok(rooms) => {
            tracing::info!(rooms_deleted = rooms, "Expired room cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Expired room cleanup failed, continuing anyway"
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,room=info,ranking=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env()?;

    // Room configuration
    let mut room_config = if cfg!(debug_assertions) {
        RoomConfig::development()
    } else {
        RoomConfig::default()
    };
    if let Some(policy) = server_config.score_policy {
        room_config.score_policy = policy;
    }
    tracing::info!(score_policy = ?room_config.score_policy, "Room configuration loaded");

    let ranking_config = RankingConfig::default();

    // Storage selection
    let (rooms, rankings) = match &server_config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(server_config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let room_repo = PgRoomRepository::new(pool.clone());
            sweep_expired_rooms(&room_repo).await;

            (
                room_router(room_repo, room_config),
                ranking_router(PgRankingRepository::new(pool), ranking_config),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, rooms and rankings are kept in memory");
            (
                room_router_generic(
                    InMemoryRoomRepository::new(),
                    InMemoryRateLimitStore::new(),
                    room_config,
                ),
                ranking_router_generic(InMemoryRankingRepository::new(), ranking_config),
            )
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = server_config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .nest("/api/rooms", rooms)
        .nest("/api", rankings)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
