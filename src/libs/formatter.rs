//! Duration formatting for reports.
//!
//! Durations are whole seconds and are rendered in one of two shapes:
//!
//! - **compact**: hours, minutes and seconds, e.g. `1 hour 1 minute 1 second`
//!   or, abbreviated, `1h 1m 1s`;
//! - **long**: a cascade from years down to seconds using fixed-width units
//!   (a month is 30 weeks, a year is 12 such months).
//!
//! Both shapes start at the most significant non-zero unit and then continue
//! through every smaller unit, zeros included. A zero duration is shown as
//! `< N minutes`, where `N` is the rounding granularity, since rounded time
//! below one bucket collapses to zero.
//!
//! ```rust
//! use chronolog::libs::formatter::DurationFormatter;
//!
//! let formatter = DurationFormatter::new(15, true);
//! assert_eq!(formatter.format(3661, true), "1h 1m 1s");
//! assert_eq!(formatter.format(0, true), "< 15 minutes");
//! ```

use crate::libs::config::ReportConfig;

pub const MINUTE: i64 = 60;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;
pub const WEEK: i64 = 7 * DAY;
pub const MONTH: i64 = 30 * WEEK;
pub const YEAR: i64 = 12 * MONTH;

const LONG_UNITS: [(i64, &str); 7] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (1, "second"),
];

const COMPACT_UNITS: [(i64, &str, &str); 3] = [(HOUR, "hour", "h"), (MINUTE, "minute", "m"), (1, "second", "s")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationFormatter {
    pub round_to_minutes: i64,
    pub abbreviated: bool,
}

impl DurationFormatter {
    pub fn new(round_to_minutes: i64, abbreviated: bool) -> Self {
        Self {
            round_to_minutes,
            abbreviated,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.round_to_minutes, config.display_hms_abbreviated)
    }

    pub fn format(&self, seconds: i64, compact: bool) -> String {
        if seconds <= 0 {
            return format!("< {}", plural(self.round_to_minutes, "minute")).trim().to_string();
        }

        let mut out = String::new();
        let mut remaining = seconds;
        let mut started = false;

        if compact {
            for (size, noun, abbr) in COMPACT_UNITS {
                let count = remaining / size;
                remaining %= size;
                if count == 0 && !started {
                    continue;
                }
                started = true;
                if self.abbreviated {
                    out.push_str(&format!("{}{} ", count, abbr));
                } else {
                    out.push_str(&plural(count, noun));
                }
            }
        } else {
            for (size, noun) in LONG_UNITS {
                let count = remaining / size;
                remaining %= size;
                if count == 0 && !started {
                    continue;
                }
                started = true;
                out.push_str(&plural(count, noun));
            }
        }

        out.trim().to_string()
    }
}

/// `"1 minute "` / `"0 minute "` / `"2 minutes "`, trailing space included.
pub fn plural(count: i64, noun: &str) -> String {
    if count == 0 || count == 1 {
        format!("{} {} ", count, noun)
    } else {
        format!("{} {}s ", count, noun)
    }
}
