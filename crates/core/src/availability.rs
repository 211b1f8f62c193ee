//! # Availability Calculator
//!
//! Computes the start times a customer can book with a barber on one date:
//!
//! 1. Normalize the shift end (`00:00` as an end time means midnight, 1440)
//! 2. Turn every occupying appointment into a half-open range `[start, fin)`
//! 3. Take the backend's candidate list when it has one, otherwise a
//!    5-minute grid across `[shift_start, shift_end)`
//! 4. Drop candidates inside an occupied range, and those where the
//!    requested service would run past the shift end
//! 5. Deduplicate and sort by minute of day
//!
//! Everything here is pure and infallible from the caller's point of view:
//! malformed entries are skipped with a warning and a missing shift yields
//! no slots.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::{
    errors::{BookingError, BookingResult},
    models::appointment::Appointment,
    time::{self, MINUTES_PER_DAY, SLOT_STEP_MINUTES},
};

/// A bookable start time.
///
/// Identity is the minute of day, so `"12:00 AM"` and `"00:00"` are the same
/// slot. Displays and serializes in 12-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotLabel(u32);

impl SlotLabel {
    pub fn from_minute(minute_of_day: u32) -> Option<Self> {
        (minute_of_day < MINUTES_PER_DAY).then_some(Self(minute_of_day))
    }

    pub fn minute_of_day(self) -> u32 {
        self.0
    }

    pub fn to_24h(self) -> String {
        time::format_24h(self.0)
    }

    pub fn to_12h(self) -> String {
        time::format_12h(self.0)
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_12h())
    }
}

/// Accepts either `"hh:mm AM"` or `"HH:MM"`.
impl FromStr for SlotLabel {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::parse_12h(s)
            .or_else(|_| time::parse_24h(s))
            .map(Self)
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_12h())
    }
}

impl<'de> Deserialize<'de> for SlotLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A barber's working window for one date, in minutes of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkShift {
    barber_id: i64,
    start_minute: u32,
    end_minute: u32,
}

impl WorkShift {
    /// Builds a shift, mapping an end of 0 to 1440.
    ///
    /// # Errors
    ///
    /// `BookingError::Validation` when the start is not a minute of the day,
    /// the end exceeds 1440, or the normalized end precedes the start.
    pub fn new(barber_id: i64, start_minute: u32, end_minute: u32) -> BookingResult<Self> {
        let end_minute = if end_minute == 0 {
            MINUTES_PER_DAY
        } else {
            end_minute
        };

        if start_minute >= MINUTES_PER_DAY || end_minute > MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "Shift {start_minute}-{end_minute} is outside the day"
            )));
        }
        if end_minute < start_minute {
            return Err(BookingError::Validation(format!(
                "Shift for barber {barber_id} ends at {} before it starts at {}",
                time::format_24h(end_minute),
                time::format_24h(start_minute)
            )));
        }

        Ok(Self {
            barber_id,
            start_minute,
            end_minute,
        })
    }

    /// Builds a shift from the backend's `"HH:MM"` entry and exit times.
    pub fn from_times(barber_id: i64, start: &str, end: &str) -> BookingResult<Self> {
        Self::new(barber_id, time::parse_24h(start)?, time::parse_24h(end)?)
    }

    pub fn barber_id(&self) -> i64 {
        self.barber_id
    }

    pub fn start_minute(&self) -> u32 {
        self.start_minute
    }

    /// Normalized end, in `(start, 1440]` for a non-empty shift.
    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }

    pub fn is_empty(&self) -> bool {
        self.end_minute <= self.start_minute
    }
}

/// Minutes `[start, fin)` blocked by an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedRange {
    pub start: u32,
    pub fin: u32,
}

impl OccupiedRange {
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start && minute < self.fin
    }

    pub fn overlaps(&self, start: u32, fin: u32) -> bool {
        start < self.fin && self.start < fin
    }
}

/// Collects the ranges blocked for `barber_id`.
///
/// Cancelled and completed appointments are ignored, as is `exclude_id`
/// (the appointment being rescheduled). Entries with an unparseable start or
/// a zero duration are skipped.
pub fn occupied_ranges(
    barber_id: i64,
    appointments: &[Appointment],
    exclude_id: Option<i64>,
) -> Vec<OccupiedRange> {
    appointments
        .iter()
        .filter(|a| a.barber_id == barber_id)
        .filter(|a| a.status.occupies())
        .filter(|a| Some(a.id) != exclude_id)
        .filter_map(|a| {
            let start = match time::parse_24h(&a.start_time) {
                Ok(start) => start,
                Err(_) => {
                    warn!(appointment_id = a.id, start = %a.start_time, "Skipping appointment with malformed start time");
                    return None;
                }
            };
            if a.duration_minutes == 0 {
                warn!(appointment_id = a.id, "Skipping appointment without duration");
                return None;
            }
            // an oversized duration occupies the rest of the day
            Some(OccupiedRange {
                start,
                fin: start.saturating_add(a.duration_minutes),
            })
        })
        .collect()
}

fn candidate_minutes(shift: &WorkShift, candidate_slots: Option<&[String]>) -> Vec<u32> {
    match candidate_slots {
        Some(slots) if !slots.is_empty() => slots
            .iter()
            .filter_map(|raw| match time::parse_24h(raw) {
                Ok(minute) if minute < MINUTES_PER_DAY => Some(minute),
                _ => {
                    warn!(slot = %raw, "Skipping malformed candidate slot");
                    None
                }
            })
            .collect(),
        _ => {
            debug!(
                barber_id = shift.barber_id,
                "No backend candidates, synthesizing {SLOT_STEP_MINUTES}-minute grid"
            );
            (shift.start_minute..shift.end_minute)
                .step_by(SLOT_STEP_MINUTES as usize)
                .collect()
        }
    }
}

/// Returns the ordered, deduplicated start times open for booking.
///
/// * `shift` - the barber's working window; `None` yields no slots
/// * `occupying` - appointments on the target date
/// * `candidate_slots` - backend-declared `"HH:MM"` start times; when present
///   and non-empty they are the only candidates considered
/// * `service_duration` - when given, a slot must leave room for the whole
///   service before the shift ends
/// * `exclude_id` - appointment to ignore, used when rescheduling it
///
/// A slot equal to the end of an occupied range is open: bookings may sit
/// back to back.
///
/// ```
/// use barbershop_core::availability::{compute_available_slots, WorkShift};
///
/// let shift = WorkShift::from_times(1, "09:00", "09:20").unwrap();
/// let slots: Vec<String> = compute_available_slots(Some(&shift), &[], None, None, None)
///     .into_iter()
///     .map(|s| s.to_24h())
///     .collect();
/// assert_eq!(slots, ["09:00", "09:05", "09:10", "09:15"]);
/// ```
pub fn compute_available_slots(
    shift: Option<&WorkShift>,
    occupying: &[Appointment],
    candidate_slots: Option<&[String]>,
    service_duration: Option<u32>,
    exclude_id: Option<i64>,
) -> Vec<SlotLabel> {
    let Some(shift) = shift else {
        debug!("No shift supplied, no slots available");
        return Vec::new();
    };
    if shift.is_empty() {
        return Vec::new();
    }

    let ranges = occupied_ranges(shift.barber_id, occupying, exclude_id);
    let shift_end = shift.end_minute();

    let slots: BTreeSet<SlotLabel> = candidate_minutes(shift, candidate_slots)
        .into_iter()
        .filter(|&minute| !ranges.iter().any(|range| range.contains(minute)))
        .filter(|&minute| {
            service_duration.is_none_or(|duration| {
                minute
                    .checked_add(duration)
                    .is_some_and(|fin| fin <= shift_end)
            })
        })
        .filter_map(SlotLabel::from_minute)
        .collect();

    slots.into_iter().collect()
}

/// Checks that a service of `duration` minutes starting at `start` fits in
/// the shift and overlaps no other appointment of the barber.
///
/// # Errors
///
/// * `BookingError::Validation` - zero duration
/// * `BookingError::DoesNotFit` - the service would end after the shift
/// * `BookingError::Conflict` - the span intersects an occupied range
pub fn validate_booking(
    shift: &WorkShift,
    occupying: &[Appointment],
    start: u32,
    duration: u32,
    exclude_id: Option<i64>,
) -> BookingResult<()> {
    let ranges = occupied_ranges(shift.barber_id, occupying, exclude_id);
    check_span(shift, &ranges, start, duration)
}

fn check_span(
    shift: &WorkShift,
    ranges: &[OccupiedRange],
    start: u32,
    duration: u32,
) -> BookingResult<()> {
    if duration == 0 {
        return Err(BookingError::Validation(
            "Service duration must be positive".to_string(),
        ));
    }

    let fin = start
        .checked_add(duration)
        .filter(|&fin| fin <= shift.end_minute())
        .ok_or_else(|| BookingError::DoesNotFit {
            start: time::format_24h(start),
            duration,
            shift_end: time::format_24h(shift.end_minute()),
        })?;

    if ranges.iter().any(|range| range.overlaps(start, fin)) {
        return Err(BookingError::Conflict(time::format_24h(start)));
    }

    Ok(())
}

/// Start times an existing appointment can be moved to: every candidate
/// whose full span passes [`validate_booking`] with the appointment itself
/// excluded.
pub fn reschedule_slots(
    shift: &WorkShift,
    occupying: &[Appointment],
    candidate_slots: &[String],
    duration: u32,
    appointment_id: i64,
) -> Vec<SlotLabel> {
    if shift.is_empty() {
        return Vec::new();
    }

    let ranges = occupied_ranges(shift.barber_id, occupying, Some(appointment_id));
    let slots: BTreeSet<SlotLabel> = candidate_minutes(shift, Some(candidate_slots))
        .into_iter()
        .filter(|&minute| check_span(shift, &ranges, minute, duration).is_ok())
        .filter_map(SlotLabel::from_minute)
        .collect();

    slots.into_iter().collect()
}
