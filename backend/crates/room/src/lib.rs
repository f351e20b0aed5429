//! Room Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Room aggregate, value objects, pure services, repository trait
//! - `application/` - One use case per room operation
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Authority Model
//! - The host secret is returned once on create; rooms keep only its digest
//! - Member ids are capabilities for submitting and never appear in public state
//! - Every transition is one atomic read-modify-write against the repository
//! - Scores are checked against the server-measured elapsed time by default

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{RoomConfig, ScorePolicy};
pub use application::public_state::PublicRoomState;
pub use domain::repository::RoomRepository;
pub use error::{RoomError, RoomFailure, RoomResult};
pub use infra::memory::InMemoryRoomRepository;
pub use infra::postgres::PgRoomRepository;
pub use presentation::router::{room_router, room_router_generic};
