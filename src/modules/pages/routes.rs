use axum::{routing::get, Router};

use super::handlers::{edit_time_intervals, schedule, submit_time_intervals};
use crate::app_state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/update/time-intervals",
            get(edit_time_intervals).post(submit_time_intervals),
        )
        .route("/schedule/{username}", get(schedule))
}
