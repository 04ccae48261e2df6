//! Calendar arithmetic and pt-BR date rendering.

use crate::error::{BlitzError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Stored form of an expiration date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const BR_DATE_FORMAT: &str = "%d/%m/%Y";
pub const BR_DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

fn midday() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Whole days from the start of `reference_now`'s day to `target`.
///
/// The target is pinned to midday so a date-only value never slides into the
/// neighbouring day; the reference is pinned to midnight. Returns 0 when the
/// target is today and a negative count once it has passed.
pub fn days_until(target: NaiveDate, reference_now: NaiveDateTime) -> i64 {
    let target = target.and_time(midday());
    let reference = reference_now.date().and_time(NaiveTime::MIN);
    (target - reference).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Parses `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BlitzError::MissingExpirationDate);
    }

    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, BR_DATE_FORMAT))
        .map_err(|_| BlitzError::InvalidExpirationDate(trimmed.to_string()))
}

pub fn format_date_br(date: NaiveDate) -> String {
    date.format(BR_DATE_FORMAT).to_string()
}

pub fn format_datetime_br_in<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format(BR_DATETIME_FORMAT)
        .to_string()
}

/// Registration timestamp as the user's local pt-BR date and time.
pub fn format_datetime_br(timestamp: DateTime<Utc>) -> String {
    format_datetime_br_in(timestamp, &Local)
}

// =============================================================================
// Clock
// =============================================================================

pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    fn now_local(&self) -> NaiveDateTime {
        self.now_utc().with_timezone(&Local).naive_local()
    }

    fn today(&self) -> NaiveDate {
        self.now_local().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, with local time equal to UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: NaiveDateTime,
}

impl FixedClock {
    pub fn new(local: NaiveDateTime) -> Self {
        Self { local }
    }

    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let local = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap_or_default();
        Self { local }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.local.and_utc()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.local
    }
}
