//! Value Objects

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::str::FromStr;

use crate::error::RankingError;

/// Reporting day for `now` shifted by `offset` (KST is +9h)
pub fn reporting_day(now: DateTime<Utc>, offset: TimeDelta) -> NaiveDate {
    (now + offset).date_naive()
}

/// Solo runs count; group runs are played in rooms and skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Solo,
    Group,
}

impl SubmitMode {
    /// Absent means solo; any other value than `solo` is treated as group
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("solo") => SubmitMode::Solo,
            Some(_) => SubmitMode::Group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    #[default]
    Today,
    Total,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::Today => "today",
            ExportScope::Total => "total",
        }
    }
}

impl FromStr for ExportScope {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(ExportScope::Today),
            "total" => Ok(ExportScope::Total),
            other => Err(RankingError::InvalidQuery(format!("unknown scope: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(RankingError::InvalidQuery(format!("unknown format: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reporting_day_crosses_midnight() {
        let offset = TimeDelta::hours(9);
        let before = Utc.with_ymd_and_hms(2025, 3, 1, 14, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap();

        assert_eq!(reporting_day(before, offset).to_string(), "2025-03-01");
        assert_eq!(reporting_day(after, offset).to_string(), "2025-03-02");
    }

    #[test]
    fn test_submit_mode() {
        assert_eq!(SubmitMode::parse(None), SubmitMode::Solo);
        assert_eq!(SubmitMode::parse(Some("solo")), SubmitMode::Solo);
        assert_eq!(SubmitMode::parse(Some("group")), SubmitMode::Group);
        assert_eq!(SubmitMode::parse(Some("team")), SubmitMode::Group);
    }

    #[test]
    fn test_scope_and_format() {
        assert_eq!("total".parse::<ExportScope>().unwrap(), ExportScope::Total);
        assert!("weekly".parse::<ExportScope>().is_err());
        assert_eq!("json".parse::<ExportFormat>().unwrap().extension(), "json");
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
