//! Unit tests for ranking crate

#[cfg(test)]
mod use_case_tests {
    use chrono::{DateTime, TimeZone, Utc};
    use puzzle::Difficulty;
    use std::sync::Arc;

    use crate::application::config::RankingConfig;
    use crate::application::export_rankings::{ExportInput, ExportRankingsUseCase};
    use crate::application::get_rankings::GetRankingsUseCase;
    use crate::application::submit_score::{SubmitOutcome, SubmitScoreInput, SubmitScoreUseCase};
    use crate::domain::value_objects::{ExportFormat, ExportScope};
    use crate::error::RankingError;
    use crate::infra::memory::InMemoryRankingRepository;

    struct Harness {
        repo: Arc<InMemoryRankingRepository>,
        config: Arc<RankingConfig>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                repo: Arc::new(InMemoryRankingRepository::new()),
                config: Arc::new(RankingConfig::default()),
            }
        }

        fn submit(&self) -> SubmitScoreUseCase<InMemoryRankingRepository> {
            SubmitScoreUseCase::new(self.repo.clone(), self.config.clone())
        }

        fn export(&self) -> ExportRankingsUseCase<InMemoryRankingRepository> {
            ExportRankingsUseCase::new(self.repo.clone(), self.config.clone())
        }
    }

    fn input(device: &str, puzzle: &str, score: f64) -> SubmitScoreInput {
        SubmitScoreInput {
            device_id: device.to_string(),
            player_id: format!("player-{device}"),
            country: "KR".to_string(),
            score,
            puzzle_id: puzzle.to_string(),
            difficulty: Some("easy".to_string()),
            time_ms: Some(60_000.0),
            ..Default::default()
        }
    }

    /// 2025-03-02 in KST
    fn day_two(hour_utc: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 15 + hour_utc, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_submit_validation() {
        let h = Harness::new();
        for broken in [
            SubmitScoreInput {
                device_id: "  ".into(),
                ..input("d", "p", 1.0)
            },
            SubmitScoreInput {
                player_id: String::new(),
                ..input("d", "p", 1.0)
            },
            SubmitScoreInput {
                country: String::new(),
                ..input("d", "p", 1.0)
            },
            SubmitScoreInput {
                puzzle_id: String::new(),
                ..input("d", "p", 1.0)
            },
            input("d", "p", f64::INFINITY),
        ] {
            let err = h.submit().execute(broken).await.unwrap_err();
            assert!(matches!(err, RankingError::InvalidBody(_)));
            assert_eq!(err.status_code(), 400);
        }
    }

    #[tokio::test]
    async fn test_group_mode_and_duplicates_skipped() {
        let h = Harness::new();
        let group = SubmitScoreInput {
            mode: Some("group".into()),
            ..input("d1", "p1", 5.0)
        };
        assert_eq!(
            h.submit().execute(group).await.unwrap(),
            SubmitOutcome::SkippedGroupMode
        );

        assert_eq!(
            h.submit().execute(input("d1", "p1", 5.0)).await.unwrap(),
            SubmitOutcome::Recorded
        );
        let again = h.submit().execute(input("d1", "p1", 9.0)).await.unwrap();
        assert_eq!(again, SubmitOutcome::SkippedDuplicate);
        assert_eq!(again.skipped(), Some("duplicate_puzzle"));

        let out = h
            .export()
            .execute(ExportInput {
                scope: ExportScope::Total,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].score, 5);
    }

    #[tokio::test]
    async fn test_score_and_time_normalized() {
        let h = Harness::new();
        let raw = SubmitScoreInput {
            time_ms: Some(-40.0),
            difficulty: Some("impossible".into()),
            lang: Some("  ".into()),
            ..input("d1", "p1", 7.9)
        };
        h.submit().execute_at(raw, day_two(0)).await.unwrap();

        let out = h
            .export()
            .execute_at(ExportInput::default(), day_two(1))
            .await
            .unwrap();
        let row = &out.rows[0];
        assert_eq!(row.score, 7);
        assert_eq!(row.time_ms, Some(0));
        assert_eq!(row.difficulty, None);
        assert_eq!(row.lang, None);
        assert_eq!(row.korea_date, "2025-03-02");
        assert_eq!(row.created_at, "2025-03-01T15:00:00.000Z");
    }

    #[tokio::test]
    async fn test_export_order_filters_and_cap() {
        let h = Harness {
            repo: Arc::new(InMemoryRankingRepository::new()),
            config: Arc::new(RankingConfig {
                export_limit: 3,
                ..Default::default()
            }),
        };
        let yesterday = Utc.with_ymd_and_hms(2025, 3, 1, 3, 0, 0).unwrap();

        h.submit()
            .execute_at(input("old", "p0", 100.0), yesterday)
            .await
            .unwrap();
        for (device, score, time) in [("a", 5.0, 90_000.0), ("b", 9.0, 80_000.0), ("c", 5.0, 70_000.0)] {
            let raw = SubmitScoreInput {
                time_ms: Some(time),
                ..input(device, "p1", score)
            };
            h.submit().execute_at(raw, day_two(0)).await.unwrap();
        }
        let hard = SubmitScoreInput {
            difficulty: Some("hard".into()),
            ..input("d", "p2", 1.0)
        };
        h.submit().execute_at(hard, day_two(0)).await.unwrap();

        let today = h
            .export()
            .execute_at(ExportInput::default(), day_two(2))
            .await
            .unwrap();
        let players: Vec<_> = today.rows.iter().map(|r| r.player_id.as_str()).collect();
        assert_eq!(players, vec!["player-b", "player-c", "player-a"]);

        let total = h
            .export()
            .execute_at(
                ExportInput {
                    scope: ExportScope::Total,
                    ..Default::default()
                },
                day_two(2),
            )
            .await
            .unwrap();
        assert_eq!(total.rows.len(), 3);
        assert_eq!(total.rows[0].player_id, "player-old");

        let hard_only = h
            .export()
            .execute_at(
                ExportInput {
                    scope: ExportScope::Total,
                    difficulty: Some(Difficulty::Hard),
                    ..Default::default()
                },
                day_two(2),
            )
            .await
            .unwrap();
        assert_eq!(hard_only.rows.len(), 1);
        assert_eq!(hard_only.rows[0].player_id, "player-d");
    }

    #[tokio::test]
    async fn test_csv_and_json_carry_same_rows() {
        let h = Harness::new();
        let raw = SubmitScoreInput {
            player_id: "Kim, \"Ace\"".into(),
            lang: Some("ko".into()),
            ..input("d1", "p1", 8.0)
        };
        h.submit().execute(raw).await.unwrap();

        let csv = h
            .export()
            .execute(ExportInput::default())
            .await
            .unwrap();
        let json = h
            .export()
            .execute(ExportInput {
                format: ExportFormat::Json,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(csv.rows, json.rows);
        assert_eq!(csv.file_name(), "sudoku_rankings_today.csv");
        assert_eq!(json.file_name(), "sudoku_rankings_today.json");

        let text = csv.render().unwrap();
        assert!(text.contains("\"Kim, \"\"Ace\"\"\",8,60000,easy,"));
        assert!(text.ends_with(",KR,ko"));

        let value: serde_json::Value = serde_json::from_str(&json.render().unwrap()).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["rows"][0]["player_id"], "Kim, \"Ace\"");
        assert_eq!(value["rows"][0]["time_ms"], 60_000);
    }

    #[tokio::test]
    async fn test_rankings_top_total_with_tie_break() {
        let h = Harness::new();
        // a: 4 + 6 = 10, last update at hour 3; b: 10 at hour 1
        h.submit().execute_at(input("a", "p1", 4.0), day_two(0)).await.unwrap();
        h.submit().execute_at(input("b", "p1", 10.0), day_two(1)).await.unwrap();
        h.submit().execute_at(input("a", "p2", 6.0), day_two(3)).await.unwrap();

        let rows = GetRankingsUseCase::new(h.repo.clone(), h.config.clone())
            .execute()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].player_id, "player-b");
        assert_eq!(rows[0].country, "KR");
    }

    #[tokio::test]
    async fn test_rankings_empty() {
        let h = Harness::new();
        let rows = GetRankingsUseCase::new(h.repo.clone(), h.config.clone())
            .execute()
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::RankingConfig;
    use crate::infra::memory::InMemoryRankingRepository;
    use crate::presentation::router::ranking_router_generic;

    fn app() -> axum::Router {
        axum::Router::new().nest(
            "/api",
            ranking_router_generic(InMemoryRankingRepository::new(), RankingConfig::default()),
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_rankings_and_export() {
        let app = app();
        let submit = json!({
            "deviceId": "dev-1",
            "playerId": "ace",
            "country": "KR",
            "score": 8,
            "puzzleId": "easy-1",
            "difficulty": "easy",
            "timeMs": 61000
        });

        let response = app.clone().oneshot(post_json("/api/submit", submit.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"ok": true}));

        let response = app.clone().oneshot(post_json("/api/submit", submit)).await.unwrap();
        assert_eq!(
            json_body(response).await,
            json!({"ok": true, "skipped": "duplicate_puzzle"})
        );

        let response = app.clone().oneshot(get("/api/rankings")).await.unwrap();
        assert_eq!(
            json_body(response).await,
            json!({"ok": true, "rows": [{"rank": 1, "player_id": "ace", "country": "KR"}]})
        );

        let response = app
            .clone()
            .oneshot(get("/api/export?scope=total&format=csv&difficulty=easy"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sudoku_rankings_total.csv\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("player_id,score,time_ms,difficulty,korea_date,created_at,country,lang\nace,8,61000,easy,"));
    }

    #[tokio::test]
    async fn test_group_mode_acknowledged() {
        let response = app()
            .oneshot(post_json(
                "/api/submit",
                json!({"deviceId": "d", "playerId": "p", "country": "KR", "score": 3, "puzzleId": "x", "mode": "group"}),
            ))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!({"ok": true, "skipped": "group_mode"})
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_body() {
        let response = app()
            .oneshot(post_json("/api/submit", json!({"deviceId": "d"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "invalid_body");
    }

    #[tokio::test]
    async fn test_export_json_attachment_and_bad_scope() {
        let app = app();
        let response = app.clone().oneshot(get("/api/export?format=json")).await.unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sudoku_rankings_today.json\""
        );
        assert_eq!(json_body(response).await, json!({"ok": true, "rows": []}));

        let response = app.oneshot(get("/api/export?scope=weekly")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_query");
    }
}
