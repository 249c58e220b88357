use super::encoding::{minutes_to_time_string, EncodingError};
use super::validation::{FormInterval, DAYS_PER_WEEK};
use crate::db::UserTimeInterval;

pub const DEFAULT_START_TIME: &str = "08:00";
pub const DEFAULT_END_TIME: &str = "18:00";

/// Expand stored intervals into the seven rows shown on the edit form.
///
/// Weekdays without a stored record come back disabled with the default
/// 08:00-18:00 window. This is display state only and is never persisted.
pub fn expand_for_form(stored: &[UserTimeInterval]) -> Result<Vec<FormInterval>, EncodingError> {
    (0..DAYS_PER_WEEK as i32)
        .map(|week_day| -> Result<FormInterval, EncodingError> {
            match stored.iter().find(|interval| interval.week_day == week_day) {
                Some(interval) => Ok(FormInterval {
                    week_day,
                    enabled: true,
                    start_time: minutes_to_time_string(interval.time_start_in_minutes)?,
                    end_time: minutes_to_time_string(interval.time_end_in_minutes)?,
                }),
                None => Ok(FormInterval {
                    week_day,
                    enabled: false,
                    start_time: DEFAULT_START_TIME.to_string(),
                    end_time: DEFAULT_END_TIME.to_string(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_missing_days_with_defaults() {
        let stored = [UserTimeInterval {
            week_day: 2,
            time_start_in_minutes: 540,
            time_end_in_minutes: 1050,
        }];

        let form = expand_for_form(&stored).unwrap();

        assert_eq!(form.len(), 7);
        for (index, row) in form.iter().enumerate() {
            assert_eq!(row.week_day, index as i32);
            if row.week_day == 2 {
                assert!(row.enabled);
                assert_eq!(row.start_time, "09:00");
                assert_eq!(row.end_time, "17:30");
            } else {
                assert!(!row.enabled);
                assert_eq!(row.start_time, "08:00");
                assert_eq!(row.end_time, "18:00");
            }
        }
    }

    #[test]
    fn empty_store_yields_a_fully_disabled_week() {
        let form = expand_for_form(&[]).unwrap();

        assert_eq!(form.len(), 7);
        assert!(form.iter().all(|row| !row.enabled));
    }

    #[test]
    fn corrupt_stored_minutes_are_reported() {
        let stored = [UserTimeInterval {
            week_day: 0,
            time_start_in_minutes: 480,
            time_end_in_minutes: 1500,
        }];

        assert_eq!(expand_for_form(&stored), Err(EncodingError::OutOfRange(1500)));
    }
}
