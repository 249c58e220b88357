use thiserror::Error;
use time::{macros::format_description, Time};

/// Minutes in a single day; valid encoded values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("`{0}` is not a valid HH:MM time of day")]
    InvalidFormat(String),

    #[error("{0} minutes is outside a single day")]
    OutOfRange(i32),
}

/// Convert an `HH:MM` time of day into minutes since midnight.
pub fn time_string_to_minutes(value: &str) -> Result<i32, EncodingError> {
    let time = Time::parse(value, format_description!("[hour]:[minute]"))
        .map_err(|_| EncodingError::InvalidFormat(value.to_string()))?;

    Ok(i32::from(time.hour()) * 60 + i32::from(time.minute()))
}

/// Convert minutes since midnight back into a zero-padded `HH:MM` string.
pub fn minutes_to_time_string(minutes: i32) -> Result<String, EncodingError> {
    if !(0..MINUTES_PER_DAY).contains(&minutes) {
        return Err(EncodingError::OutOfRange(minutes));
    }

    let time = Time::from_hms((minutes / 60) as u8, (minutes % 60) as u8, 0)
        .map_err(|_| EncodingError::OutOfRange(minutes))?;

    time.format(format_description!("[hour]:[minute]"))
        .map_err(|_| EncodingError::OutOfRange(minutes))
}
