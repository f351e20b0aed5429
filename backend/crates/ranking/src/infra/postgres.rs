//! PostgreSQL Repository Implementation
//!
//! `solo_submissions` holds one row per `(device_id, puzzle_id)`;
//! `solo_scores` holds the running total per device.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::is_unique_violation;
use puzzle::Difficulty;
use sqlx::PgPool;

use crate::domain::entities::{ExportRow, PlayerTotal, SoloSubmission};
use crate::domain::repository::{ExportQuery, RankingRepository, RecordOutcome};
use crate::error::RankingResult;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgRankingRepository {
    pool: PgPool,
}

impl PgRankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    device_id: String,
    puzzle_id: String,
    player_id: String,
    country: String,
    score: i64,
    difficulty: Option<String>,
    time_ms: Option<i64>,
    lang: Option<String>,
    korea_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for SoloSubmission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            device_id: row.device_id,
            puzzle_id: row.puzzle_id,
            player_id: row.player_id,
            country: row.country,
            score: row.score,
            difficulty: row.difficulty.and_then(|d| d.parse::<Difficulty>().ok()),
            time_ms: row.time_ms,
            lang: row.lang,
            korea_date: row.korea_date,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TotalRow {
    device_id: String,
    player_id: String,
    country: String,
    total_score: i64,
    submissions: i64,
    updated_at: DateTime<Utc>,
}

impl From<TotalRow> for PlayerTotal {
    fn from(row: TotalRow) -> Self {
        Self {
            device_id: row.device_id,
            player_id: row.player_id,
            country: row.country,
            total_score: row.total_score,
            submissions: row.submissions,
            updated_at: row.updated_at,
        }
    }
}

impl RankingRepository for PgRankingRepository {
    async fn record(&self, submission: &SoloSubmission) -> RankingResult<RecordOutcome> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO solo_submissions
                (device_id, puzzle_id, player_id, country, score, difficulty,
                 time_ms, lang, korea_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&submission.device_id)
        .bind(&submission.puzzle_id)
        .bind(&submission.player_id)
        .bind(&submission.country)
        .bind(submission.score)
        .bind(submission.difficulty.map(|d| d.as_str()))
        .bind(submission.time_ms)
        .bind(submission.lang.as_deref())
        .bind(submission.korea_date)
        .bind(submission.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                tx.rollback().await?;
                return Ok(RecordOutcome::Duplicate);
            }
            Err(e) => return Err(e.into()),
        }

        sqlx::query(
            r#"
            INSERT INTO solo_scores
                (device_id, player_id, country, total_score, submissions, updated_at)
            VALUES ($1, $2, $3, $4, 1, $5)
            ON CONFLICT (device_id) DO UPDATE
                SET player_id = EXCLUDED.player_id,
                    country = EXCLUDED.country,
                    total_score = solo_scores.total_score + EXCLUDED.total_score,
                    submissions = solo_scores.submissions + 1,
                    updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&submission.device_id)
        .bind(&submission.player_id)
        .bind(&submission.country)
        .bind(submission.score)
        .bind(submission.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(RecordOutcome::Recorded)
    }

    async fn export(&self, query: &ExportQuery) -> RankingResult<Vec<ExportRow>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT device_id, puzzle_id, player_id, country, score, difficulty,
                   time_ms, lang, korea_date, created_at
            FROM solo_submissions
            WHERE ($1::date IS NULL OR korea_date = $1)
              AND ($2::text IS NULL OR difficulty = $2)
            ORDER BY score DESC, time_ms ASC NULLS LAST, created_at ASC
            LIMIT $3
            "#,
        )
        .bind(query.korea_date)
        .bind(query.difficulty.map(|d| d.as_str()))
        .bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SoloSubmission::from(row).export_row())
            .collect())
    }

    async fn top_players(&self, limit: usize) -> RankingResult<Vec<PlayerTotal>> {
        let rows = sqlx::query_as::<_, TotalRow>(
            r#"
            SELECT device_id, player_id, country, total_score, submissions, updated_at
            FROM solo_scores
            ORDER BY total_score DESC, updated_at ASC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerTotal::from).collect())
    }
}
