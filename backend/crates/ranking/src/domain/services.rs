//! Domain Services
//!
//! Orderings shared by both repositories and the CSV encoding.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::domain::entities::{ExportRow, PlayerTotal, SoloSubmission};

pub const CSV_HEADER: &str = "player_id,score,time_ms,difficulty,korea_date,created_at,country,lang";

/// Score descending, time ascending with missing times last
pub fn export_order(a: &SoloSubmission, b: &SoloSubmission) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| match (a.time_ms, b.time_ms) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Total descending, earlier last update first
pub fn total_order(a: &PlayerTotal, b: &PlayerTotal) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| a.updated_at.cmp(&b.updated_at))
}

/// RFC 4180 field quoting
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        let score = row.score.to_string();
        let time_ms = row.time_ms.map(|t| t.to_string()).unwrap_or_default();
        let fields: [&str; 8] = [
            &row.player_id,
            &score,
            &time_ms,
            row.difficulty.as_deref().unwrap_or(""),
            &row.korea_date,
            &row.created_at,
            &row.country,
            row.lang.as_deref().unwrap_or(""),
        ];
        out.push('\n');
        let line: Vec<Cow<'_, str>> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
    }
    out
}
