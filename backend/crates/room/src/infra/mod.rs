//! Infrastructure Layer - Repository implementations
//!
//! - `memory` - process-local store (single instance, tests, no database)
//! - `postgres` - PostgreSQL JSONB store

pub mod memory;
pub mod postgres;
