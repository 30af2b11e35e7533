//! Opening hours as reported by the place directory, and the one-line
//! availability text shown next to each listing.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const HOURS_NOT_AVAILABLE: &str = "Hours not available";
pub const OPEN_ALL_DAY: &str = "Open 24/7";
const SEE_HOURS: &str = "See hours";

/// Close time assumed when a period has none.
const END_OF_DAY: u32 = 2359;

/// Weekly opening hours as reported by the place directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Whether the directory considered the place open when it was queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<Period>>,
    /// One human-written line per weekday, Monday first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_text: Option<Vec<String>>,
}

/// A single opening range. A missing close means the place does not close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub open: TimePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<TimePoint>,
}

/// Day of week (0 = Sunday) and an `HHMM` time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePoint {
    pub day: u8,
    pub time: String,
}

impl TimePoint {
    pub fn new(day: u8, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }
}

impl Period {
    pub fn new(day: u8, open: &str, close: Option<&str>) -> Self {
        Self {
            open: TimePoint::new(day, open),
            close: close.map(|c| TimePoint::new(day, c)),
        }
    }
}

impl OpeningHours {
    /// Hours built from structured periods only.
    pub fn from_periods(periods: Vec<Period>) -> Self {
        Self {
            periods: Some(periods),
            ..Self::default()
        }
    }

    /// Hours built from Monday-first weekday lines only.
    pub fn from_weekday_text<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            weekday_text: Some(lines.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = Some(open_now);
        self
    }

    /// True when the hours describe a place that never closes, judged either
    /// from a single open-ended period or from every weekday line.
    pub fn is_always_open(&self) -> bool {
        self.single_period_always_open() || self.weekday_text_always_open()
    }

    fn single_period_always_open(&self) -> bool {
        let Some([period]) = self.periods.as_deref() else {
            return false;
        };

        match &period.close {
            None => true,
            Some(close) => period.open.time == "0000" && (close.time == "2359" || close.time == "0000"),
        }
    }

    fn weekday_text_always_open(&self) -> bool {
        match self.weekday_text.as_deref() {
            Some(lines) if !lines.is_empty() => lines.iter().all(|line| mentions_all_day(line)),
            _ => false,
        }
    }

    /// First period opening on `day` whose open time parses.
    fn period_for_day(&self, day: u8) -> Option<(u32, u32)> {
        self.periods
            .as_deref()?
            .iter()
            .filter(|p| p.open.day == day)
            .find_map(|period| {
                let open = parse_hhmm(&period.open.time)?;
                let close = period
                    .close
                    .as_ref()
                    .and_then(|c| parse_hhmm(&c.time))
                    .unwrap_or(END_OF_DAY);
                Some((open, close))
            })
    }

    /// Weekday line for a Sunday-based day index.
    fn weekday_line(&self, day: u8) -> Option<&str> {
        let lines = self.weekday_text.as_deref()?;
        let index = if day == 0 { 6 } else { usize::from(day) - 1 };

        lines
            .get(index)
            .filter(|line| !line.is_empty())
            .or_else(|| lines.first())
            .map(String::as_str)
    }
}

/// Describe whether a place is open at `now`.
///
/// Rules are tried in order: no hours, always open (periods, then weekday
/// lines), today's structured period, today's weekday line. Anything that
/// cannot be interpreted ends in "Hours not available".
pub fn format_availability(hours: Option<&OpeningHours>, now: &NaiveDateTime) -> String {
    let Some(hours) = hours else {
        return HOURS_NOT_AVAILABLE.to_string();
    };

    if hours.is_always_open() {
        return OPEN_ALL_DAY.to_string();
    }

    let today = now.weekday().num_days_from_sunday() as u8;
    let current = now.hour() * 100 + now.minute();

    if let Some((open, close)) = hours.period_for_day(today) {
        let is_open = open <= current && current <= close;
        return if is_open {
            format!(
                "Open now • {} - {}",
                format_clock_time(open),
                format_clock_time(close)
            )
        } else {
            format!("Closed • Opens at {}", format_clock_time(open))
        };
    }

    if let Some(line) = hours.weekday_line(today) {
        if mentions_all_day(line) {
            return OPEN_ALL_DAY.to_string();
        }

        if let Some(open_now) = hours.open_now {
            let detail = line
                .split_once(": ")
                .map(|(_, rest)| rest)
                .filter(|rest| !rest.is_empty())
                .unwrap_or(SEE_HOURS);
            return if open_now {
                format!("Open now • {detail}")
            } else {
                format!("Closed • {detail}")
            };
        }
    }

    HOURS_NOT_AVAILABLE.to_string()
}

fn mentions_all_day(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("24 hours") || lower.contains("24/7")
}

/// Parse an `HHMM` time such as `"0930"` into the integer `930`.
///
/// Up to four ASCII digits are accepted; anything else is rejected.
pub fn parse_hhmm(time: &str) -> Option<u32> {
    let time = time.trim();
    if time.is_empty() || time.len() > 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    time.parse().ok()
}

/// Render an `HHMM` integer on a 12-hour clock, e.g. `1730` → `"5:30 PM"`.
pub fn format_clock_time(hhmm: u32) -> String {
    let hours = hhmm / 100;
    let minutes = hhmm % 100;
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    let display = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display}:{minutes:02} {suffix}")
}
