use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_time_intervals, method_not_allowed, update_time_intervals};
use crate::app_state::AppState;

/// Time interval API, nested under `/api/users`. The read endpoint is
/// GET only; HEAD would otherwise fall through to the GET handler.
pub fn time_interval_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/get-time-intervals",
            get(get_time_intervals)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/update-time-intervals",
            post(update_time_intervals).fallback(method_not_allowed),
        )
}
