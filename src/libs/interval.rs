//! Turns stored point-events into intervals with durations.
//!
//! An entry records when an activity stopped, so its duration is the gap to
//! the previous entry. The first entry of the input and every day-start
//! marker are measured from local midnight instead. When the gap crosses
//! midnight the entry is split in two: the part up to midnight is attributed
//! to the previous day, the rest to the entry's own day.

use crate::libs::entry::{HasProperties, PointEvent, Property, BREAK, DAY_START};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub id: i64,
    pub project: String,
    pub note: String,
    pub end: DateTime<Utc>,
    /// Calendar day the time is booked on.
    pub day: NaiveDate,
    pub duration: i64,
    pub properties: Vec<Property>,
}

impl Interval {
    fn from_event(event: &PointEvent, end: DateTime<Utc>, day: NaiveDate, duration: i64) -> Self {
        Self {
            id: event.id,
            project: event.project.clone(),
            note: event.note.clone(),
            end,
            day,
            duration,
            properties: event.properties.clone(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.end - chrono::Duration::seconds(self.duration)
    }

    pub fn is_break(&self) -> bool {
        self.project == BREAK
    }

    pub fn is_day_start(&self) -> bool {
        self.project == DAY_START
    }
}

impl HasProperties for Interval {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Local midnight that opens the day of `instant`.
pub fn start_of_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    midnight(instant.with_timezone(tz).date_naive(), tz).unwrap_or(*instant)
}

/// Local midnight that closes the day of `instant`.
pub fn end_of_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let date = instant.with_timezone(tz).date_naive();
    date.checked_add_days(Days::new(1))
        .and_then(|next| midnight(next, tz))
        .unwrap_or(*instant)
}

/// First instant of `date` in `tz`, falling back to the earliest valid time
/// when midnight itself is skipped by a DST transition.
pub fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + chrono::Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Derives intervals from events sorted by timestamp, evaluating days in `tz`.
///
/// Day-start markers anchor the following interval and never appear in the output.
pub fn reconstruct_intervals<Tz: TimeZone>(events: &[PointEvent], tz: &Tz) -> Vec<Interval> {
    let mut intervals = Vec::with_capacity(events.len());

    for (i, event) in events.iter().enumerate() {
        let current = event.timestamp;
        let current_day = current.with_timezone(tz).date_naive();

        if i == 0 || event.is_day_start() {
            let duration = (current - start_of_day(&current, tz)).num_seconds();
            intervals.push(Interval::from_event(event, current, current_day, duration));
            continue;
        }

        let prior = events[i - 1].timestamp;
        let prior_day = prior.with_timezone(tz).date_naive();

        if prior_day == current_day {
            let duration = (current - prior).num_seconds();
            intervals.push(Interval::from_event(event, current, current_day, duration));
        } else {
            // Midnight crossed: book the tail of the prior day separately.
            let midnight_after_prior = end_of_day(&prior, tz);
            let before = (midnight_after_prior - prior).num_seconds();
            intervals.push(Interval::from_event(event, midnight_after_prior, prior_day, before));

            let after = (current - start_of_day(&current, tz)).num_seconds();
            intervals.push(Interval::from_event(event, current, current_day, after));
        }
    }

    intervals.retain(|interval| !interval.is_day_start());
    intervals
}
