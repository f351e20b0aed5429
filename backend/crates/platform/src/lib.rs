//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random codes, SHA-256, constant-time compare)
//! - Client identification from request headers
//! - Rate limiting infrastructure

pub mod client;
pub mod crypto;
pub mod rate_limit;
