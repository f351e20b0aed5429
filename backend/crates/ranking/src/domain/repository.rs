//! Repository Traits

use chrono::NaiveDate;
use puzzle::Difficulty;

use crate::domain::entities::{ExportRow, PlayerTotal, SoloSubmission};
use crate::error::RankingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// The device already submitted this puzzle
    Duplicate,
}

/// Export filter; rows come back by score descending, time ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportQuery {
    pub korea_date: Option<NaiveDate>,
    pub difficulty: Option<Difficulty>,
    pub limit: usize,
}

#[trait_variant::make(RankingRepository: Send)]
pub trait LocalRankingRepository {
    /// Store the submission and add its score to the device total in one
    /// unit; a duplicate changes nothing
    async fn record(&self, submission: &SoloSubmission) -> RankingResult<RecordOutcome>;

    async fn export(&self, query: &ExportQuery) -> RankingResult<Vec<ExportRow>>;

    /// Highest totals first; ties go to the earlier last update
    async fn top_players(&self, limit: usize) -> RankingResult<Vec<PlayerTotal>>;
}
