//! Minute-of-day clock arithmetic and 12h/24h conversion.
//!
//! Every time of day in this crate is a `u32` count of minutes since
//! midnight. Strings only appear at the edges: `"HH:MM"` from the backend and
//! `"hh:mm AM"` for display.

use chrono::{NaiveTime, Timelike};

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Granularity of synthesized candidate slots.
pub const SLOT_STEP_MINUTES: u32 = 5;

/// Parses a 24-hour `"HH:MM"` (or `"HH:MM:SS"`, seconds ignored) into
/// minutes since midnight.
pub fn parse_24h(value: &str) -> BookingResult<u32> {
    let trimmed = value.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidTime(value.to_string()))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Parses a 12-hour `"hh:mm AM"` / `"hh:mm PM"` into minutes since midnight.
pub fn parse_12h(value: &str) -> BookingResult<u32> {
    let invalid = || BookingError::InvalidTime(value.to_string());

    let mut parts = value.split_whitespace();
    let (clock, period) = match (parts.next(), parts.next(), parts.next()) {
        (Some(clock), Some(period), None) => (clock, period),
        _ => return Err(invalid()),
    };
    let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
    let hour = parse_number(hour).ok_or_else(invalid)?;
    let minute = parse_number(minute).ok_or_else(invalid)?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(invalid());
    }

    let hour = if period.eq_ignore_ascii_case("AM") {
        if hour == 12 { 0 } else { hour }
    } else if period.eq_ignore_ascii_case("PM") {
        if hour == 12 { 12 } else { hour + 12 }
    } else {
        return Err(invalid());
    };

    Ok(hour * 60 + minute)
}

fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Formats minutes since midnight as `"HH:MM"`. The end-of-day value 1440
/// wraps to `"00:00"`.
pub fn format_24h(minute_of_day: u32) -> String {
    let minute_of_day = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Formats minutes since midnight as `"hh:mm AM"` / `"hh:mm PM"`.
pub fn format_12h(minute_of_day: u32) -> String {
    let minute_of_day = minute_of_day % MINUTES_PER_DAY;
    let (hour, minute) = (minute_of_day / 60, minute_of_day % 60);
    let (display_hour, period) = match hour {
        0 => (12, "AM"),
        12 => (12, "PM"),
        h if h > 12 => (h - 12, "PM"),
        h => (h, "AM"),
    };
    format!("{display_hour:02}:{minute:02} {period}")
}

/// Converts `"HH:MM"` to `"hh:mm AM|PM"`.
///
/// ```
/// use barbershop_core::time::to_12h;
///
/// assert_eq!(to_12h("00:05").unwrap(), "12:05 AM");
/// assert_eq!(to_12h("13:30").unwrap(), "01:30 PM");
/// ```
pub fn to_12h(time_24h: &str) -> BookingResult<String> {
    parse_24h(time_24h).map(format_12h)
}

/// Converts `"hh:mm AM|PM"` to `"HH:MM"`.
pub fn to_24h(time_12h: &str) -> BookingResult<String> {
    parse_12h(time_12h).map(format_24h)
}

/// Renders a service length the way customers read it: `"1h 30min"`,
/// `"2h"`, `"45min"`.
pub fn humanize_duration(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, rest) => format!("{rest}min"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}min"),
    }
}
