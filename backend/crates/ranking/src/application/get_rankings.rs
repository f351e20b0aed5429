//! Get Rankings Use Case

use serde::Serialize;
use std::sync::Arc;

use crate::application::config::RankingConfig;
use crate::domain::repository::RankingRepository;
use crate::error::RankingResult;

/// Public leaderboard line: name and country only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub player_id: String,
    pub country: String,
}

/// Get Rankings Use Case
pub struct GetRankingsUseCase<R: RankingRepository> {
    repo: Arc<R>,
    config: Arc<RankingConfig>,
}

impl<R: RankingRepository> GetRankingsUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<RankingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self) -> RankingResult<Vec<RankedPlayer>> {
        let top = self.repo.top_players(self.config.top_limit).await?;
        Ok(top
            .into_iter()
            .enumerate()
            .map(|(i, total)| RankedPlayer {
                rank: i + 1,
                player_id: total.player_id,
                country: total.country,
            })
            .collect())
    }
}
