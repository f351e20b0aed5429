//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Room, Member, GameResult) and their transitions
//! - Domain value objects (RoomId, HostSecret, JoinPin, Nickname, ...)
//! - Domain services (score ceiling, leaderboard ordering)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
