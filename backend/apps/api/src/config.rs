//! Server configuration read from the environment

use anyhow::{Context, bail};
use room::ScorePolicy;
use std::env;

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Absent selects the in-memory stores
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<String>,
    /// Overrides the build profile's room score policy
    pub score_policy: Option<ScorePolicy>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let score_policy = match lookup("ROOM_SCORE_POLICY").as_deref().map(str::trim) {
            None | Some("") => None,
            Some("verified") => Some(ScorePolicy::ServerVerified),
            Some("trust_client") => Some(ScorePolicy::TrustClient),
            Some(other) => bail!("ROOM_SCORE_POLICY must be verified or trust_client, got {other}"),
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections,
            frontend_origins,
            score_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 31113);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.score_policy, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/sudoku"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
            ("ROOM_SCORE_POLICY", "trust_client"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_some());
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.score_policy, Some(ScorePolicy::TrustClient));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("ROOM_SCORE_POLICY", "lenient")]).is_err());
    }
}
