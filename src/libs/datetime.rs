//! Parsing of user-supplied dates and times, and report windows.

use crate::libs::error::TrackerError;
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};

/// `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, TrackerError> {
    let invalid = || TrackerError::InvalidTime(value.to_string());
    match value.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today.checked_sub_days(Days::new(1)).ok_or_else(invalid),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| invalid()),
    }
}

/// Parses an `--at` value relative to `now`.
///
/// Accepted forms: `HH:MM[:SS]`, `H:MMam`, `YYYY-MM-DD HH:MM[:SS]`, RFC 3339
/// and `N minute(s)|hour(s) ago`. Clock times without a date are taken on the
/// day of `now` in `tz`.
pub fn parse_at<Tz: TimeZone>(value: &str, now: &DateTime<Utc>, tz: &Tz) -> Result<DateTime<Utc>, TrackerError> {
    let trimmed = value.trim();
    let invalid = || TrackerError::InvalidTime(value.to_string());

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Some(ago) = parse_ago(trimmed) {
        return now.checked_sub_signed(ago).ok_or_else(invalid);
    }

    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return localize(naive, tz).ok_or_else(invalid);
        }
    }

    let lowered = trimmed.to_lowercase().replace(' ', "");
    for layout in ["%H:%M:%S", "%H:%M", "%I:%M%p"] {
        if let Ok(time) = NaiveTime::parse_from_str(&lowered, layout) {
            let day = now.with_timezone(tz).date_naive();
            return localize(day.and_time(time), tz).ok_or_else(invalid);
        }
    }

    Err(invalid())
}

fn parse_ago(value: &str) -> Option<chrono::Duration> {
    let mut parts = value.split_whitespace();
    let count: i64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?.to_lowercase();
    if parts.next()? != "ago" || parts.next().is_some() {
        return None;
    }
    match unit.trim_end_matches('s') {
        "minute" | "min" => chrono::Duration::try_minutes(count),
        "hour" | "hr" => chrono::Duration::try_hours(count),
        _ => None,
    }
}

fn localize<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive).earliest().map(|dt| dt.with_timezone(&Utc))
}

/// First and last day of the week containing `date`.
pub fn week_range(date: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = date - chrono::Duration::days(offset as i64);
    (start, start + chrono::Duration::days(6))
}

/// Same range one week earlier.
pub fn previous_week_range(date: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    week_range(date - chrono::Duration::days(7), week_start)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `--at` value or the current instant.
pub fn resolve_at(value: Option<&str>) -> Result<DateTime<Utc>, TrackerError> {
    let now = Utc::now();
    match value {
        Some(value) => parse_at(value, &now, &Local),
        None => Ok(now),
    }
}

/// Calendar window a report covers, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Today,
    Yesterday,
    Date(NaiveDate),
    Range(NaiveDate, NaiveDate),
    CurrentWeek,
    PreviousWeek,
}

impl ReportWindow {
    pub fn bounds(&self, today: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportWindow::Today => (today, today),
            ReportWindow::Yesterday => {
                let day = today.pred_opt().unwrap_or(today);
                (day, day)
            }
            ReportWindow::Date(date) => (date, date),
            ReportWindow::Range(from, to) if from <= to => (from, to),
            ReportWindow::Range(from, to) => (to, from),
            ReportWindow::CurrentWeek => week_range(today, week_start),
            ReportWindow::PreviousWeek => previous_week_range(today, week_start),
        }
    }
}
