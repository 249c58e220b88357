use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use super::encoding::{time_string_to_minutes, EncodingError};

pub const DAYS_PER_WEEK: usize = 7;

/// Shortest accepted availability window, in minutes.
pub const MINIMUM_INTERVAL_MINUTES: i32 = 60;

/// One row of the weekly availability form, as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FormInterval {
    #[validate(range(min = 0, max = 6))]
    pub week_day: i32,
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
}

/// An enabled weekday with its window encoded as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    #[validate(range(min = 0, max = 6))]
    pub week_day: i32,
    #[validate(range(min = 0, max = 1439))]
    pub start_time_in_minutes: i32,
    #[validate(range(min = 0, max = 1439))]
    pub end_time_in_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("expected 7 week days, got {0}")]
    WrongLength(usize),

    #[error("week days must be distinct values between 0 and 6")]
    InvalidWeekDays,

    #[error("at least one week day must be selected")]
    NoDaysSelected,

    #[error("invalid time on week day {week_day}: {source}")]
    InvalidTimeFormat {
        week_day: i32,
        #[source]
        source: EncodingError,
    },

    #[error("interval on week day {week_day} must end at least one hour after it starts")]
    IntervalTooShort { week_day: i32 },
}

impl ValidationFailure {
    /// Fluent message key used to show this failure to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationFailure::WrongLength(_) => "intervals-wrong-length",
            ValidationFailure::InvalidWeekDays => "intervals-invalid-week-days",
            ValidationFailure::NoDaysSelected => "intervals-no-days-selected",
            ValidationFailure::InvalidTimeFormat { .. } => "intervals-invalid-time-format",
            ValidationFailure::IntervalTooShort { .. } => "intervals-too-short",
        }
    }

    pub fn message_keys() -> &'static [&'static str] {
        &[
            "intervals-wrong-length",
            "intervals-invalid-week-days",
            "intervals-no-days-selected",
            "intervals-invalid-time-format",
            "intervals-too-short",
        ]
    }
}

/// Validate the seven form rows and encode the enabled ones.
///
/// Stages run left to right and stop at the first failure: full week,
/// enabled subset, time encoding, minimum length. The output holds only
/// enabled weekdays, ordered by weekday.
pub fn validate_form_intervals(
    intervals: &[FormInterval],
) -> Result<Vec<TimeInterval>, ValidationFailure> {
    ensure_full_week(intervals)
        .and_then(enabled_only)
        .and_then(encode_times)
        .and_then(ensure_minimum_length)
        .map(sorted_by_week_day)
}

/// Validate an already encoded set of intervals, as received by the write API.
pub fn validate_time_intervals(
    intervals: &[TimeInterval],
) -> Result<Vec<TimeInterval>, ValidationFailure> {
    ensure_any_selected(intervals.to_vec())
        .and_then(ensure_within_week_and_day)
        .and_then(ensure_minimum_length)
        .map(sorted_by_week_day)
}

fn ensure_full_week(intervals: &[FormInterval]) -> Result<&[FormInterval], ValidationFailure> {
    if intervals.len() != DAYS_PER_WEEK {
        return Err(ValidationFailure::WrongLength(intervals.len()));
    }

    if intervals.iter().any(|interval| interval.validate().is_err()) {
        return Err(ValidationFailure::InvalidWeekDays);
    }

    ensure_distinct_week_days(intervals.iter().map(|interval| interval.week_day))?;
    Ok(intervals)
}

fn enabled_only(intervals: &[FormInterval]) -> Result<Vec<&FormInterval>, ValidationFailure> {
    let enabled: Vec<_> = intervals.iter().filter(|interval| interval.enabled).collect();
    if enabled.is_empty() {
        return Err(ValidationFailure::NoDaysSelected);
    }
    Ok(enabled)
}

fn encode_times(intervals: Vec<&FormInterval>) -> Result<Vec<TimeInterval>, ValidationFailure> {
    intervals
        .into_iter()
        .map(|interval| -> Result<TimeInterval, ValidationFailure> {
            let encode = |value: &str| {
                time_string_to_minutes(value).map_err(|source| {
                    ValidationFailure::InvalidTimeFormat {
                        week_day: interval.week_day,
                        source,
                    }
                })
            };

            Ok(TimeInterval {
                week_day: interval.week_day,
                start_time_in_minutes: encode(&interval.start_time)?,
                end_time_in_minutes: encode(&interval.end_time)?,
            })
        })
        .collect()
}

fn ensure_any_selected(
    intervals: Vec<TimeInterval>,
) -> Result<Vec<TimeInterval>, ValidationFailure> {
    if intervals.is_empty() {
        return Err(ValidationFailure::NoDaysSelected);
    }
    Ok(intervals)
}

fn ensure_within_week_and_day(
    intervals: Vec<TimeInterval>,
) -> Result<Vec<TimeInterval>, ValidationFailure> {
    for interval in &intervals {
        let Err(errors) = interval.validate() else {
            continue;
        };

        let fields = errors.field_errors();
        if fields.contains_key("week_day") {
            return Err(ValidationFailure::InvalidWeekDays);
        }

        let minutes = if fields.contains_key("start_time_in_minutes") {
            interval.start_time_in_minutes
        } else {
            interval.end_time_in_minutes
        };
        return Err(ValidationFailure::InvalidTimeFormat {
            week_day: interval.week_day,
            source: EncodingError::OutOfRange(minutes),
        });
    }

    ensure_distinct_week_days(intervals.iter().map(|interval| interval.week_day))?;
    Ok(intervals)
}

fn ensure_distinct_week_days(
    week_days: impl Iterator<Item = i32>,
) -> Result<(), ValidationFailure> {
    let mut seen = [false; DAYS_PER_WEEK];
    for week_day in week_days {
        let slot = usize::try_from(week_day)
            .ok()
            .and_then(|index| seen.get_mut(index))
            .ok_or(ValidationFailure::InvalidWeekDays)?;
        if *slot {
            return Err(ValidationFailure::InvalidWeekDays);
        }
        *slot = true;
    }
    Ok(())
}

fn ensure_minimum_length(
    intervals: Vec<TimeInterval>,
) -> Result<Vec<TimeInterval>, ValidationFailure> {
    match intervals.iter().find(|interval| {
        interval.end_time_in_minutes - interval.start_time_in_minutes < MINIMUM_INTERVAL_MINUTES
    }) {
        Some(interval) => Err(ValidationFailure::IntervalTooShort {
            week_day: interval.week_day,
        }),
        None => Ok(intervals),
    }
}

fn sorted_by_week_day(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort_by_key(|interval| interval.week_day);
    intervals
}
