//! Application Layer - Use Cases

pub mod config;
pub mod export_rankings;
pub mod get_rankings;
pub mod submit_score;
