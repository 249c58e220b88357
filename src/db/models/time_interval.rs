use serde::{Deserialize, Serialize};

/// A stored weekday window, in the shape returned by the read API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserTimeInterval {
    pub week_day: i32,
    pub time_start_in_minutes: i32,
    pub time_end_in_minutes: i32,
}
