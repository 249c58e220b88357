use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::AuthSession;
use crate::availability::{self, TimeInterval, UpdatedAvailability};
use crate::db::UserTimeInterval;
use crate::error::{AppError, AppResult};
use crate::i18n::I18n;

#[derive(Debug, Serialize, Deserialize)]
pub struct TimeIntervalsResponse {
    pub intervals: Vec<UserTimeInterval>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTimeIntervalsRequest {
    pub intervals: Vec<TimeInterval>,
}

/// Weekly availability of the signed-in user, ascending by weekday
pub async fn get_time_intervals(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
) -> AppResult<Json<TimeIntervalsResponse>> {
    let intervals = availability::get_availability(state.store.as_ref(), user.id).await?;

    Ok(Json(TimeIntervalsResponse { intervals }))
}

/// Replace the signed-in user's weekly availability
pub async fn update_time_intervals(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    i18n: I18n,
    Json(payload): Json<UpdateTimeIntervalsRequest>,
) -> AppResult<Json<UpdatedAvailability>> {
    let updated = availability::set_availability(state.store.as_ref(), &user, &payload.intervals)
        .await
        .map_err(|err| err.localized(&i18n))?;

    Ok(Json(updated))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
