//! In-memory Repository Implementation

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{ExportRow, PlayerTotal, SoloSubmission};
use crate::domain::repository::{ExportQuery, RankingRepository, RecordOutcome};
use crate::domain::services::{export_order, total_order};
use crate::error::RankingResult;

#[derive(Default)]
struct Store {
    submissions: Vec<SoloSubmission>,
    /// `(device_id, puzzle_id)`
    seen: HashSet<(String, String)>,
    totals: HashMap<String, PlayerTotal>,
}

/// Process-local solo leaderboard
#[derive(Clone, Default)]
pub struct InMemoryRankingRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryRankingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingRepository for InMemoryRankingRepository {
    async fn record(&self, submission: &SoloSubmission) -> RankingResult<RecordOutcome> {
        let mut store = self.store.lock().await;

        let key = (submission.device_id.clone(), submission.puzzle_id.clone());
        if !store.seen.insert(key) {
            return Ok(RecordOutcome::Duplicate);
        }

        store.submissions.push(submission.clone());
        store
            .totals
            .entry(submission.device_id.clone())
            .and_modify(|total| total.absorb(submission))
            .or_insert_with(|| PlayerTotal::first(submission));
        Ok(RecordOutcome::Recorded)
    }

    async fn export(&self, query: &ExportQuery) -> RankingResult<Vec<ExportRow>> {
        let store = self.store.lock().await;

        let mut matching: Vec<&SoloSubmission> = store
            .submissions
            .iter()
            .filter(|s| query.korea_date.is_none_or(|day| s.korea_date == day))
            .filter(|s| query.difficulty.is_none_or(|d| s.difficulty == Some(d)))
            .collect();
        matching.sort_by(|a, b| export_order(a, b));

        Ok(matching
            .into_iter()
            .take(query.limit)
            .map(SoloSubmission::export_row)
            .collect())
    }

    async fn top_players(&self, limit: usize) -> RankingResult<Vec<PlayerTotal>> {
        let store = self.store.lock().await;

        let mut totals: Vec<PlayerTotal> = store.totals.values().cloned().collect();
        totals.sort_by(total_order);
        totals.truncate(limit);
        Ok(totals)
    }
}
