use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;

use super::templates::{HtmlTemplate, LoginButton, ScheduleRow, ScheduleTemplate, TimeIntervalsTemplate};
use crate::app_state::AppState;
use crate::auth::MaybeAuthSession;
use crate::availability::{
    self,
    form::{DEFAULT_END_TIME, DEFAULT_START_TIME},
    validation::DAYS_PER_WEEK,
    FormInterval,
};
use crate::error::{AppError, AppResult};
use crate::i18n::I18n;
use crate::i18n_args;

/// Availability form of the signed-in user
pub async fn edit_time_intervals(
    State(state): State<AppState>,
    MaybeAuthSession(session): MaybeAuthSession,
    i18n: I18n,
) -> AppResult<Response> {
    let Some(user) = session else {
        return Ok(Redirect::temporary(&state.env.auth.register_url).into_response());
    };

    let form = availability::load_form(state.store.as_ref(), user.id).await?;
    let page = TimeIntervalsTemplate::new(&state.env.app.name, &i18n, form, None);

    Ok(HtmlTemplate(page).into_response())
}

/// Validate and save the availability form, then go to the user's schedule
pub async fn submit_time_intervals(
    State(state): State<AppState>,
    MaybeAuthSession(session): MaybeAuthSession,
    i18n: I18n,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let Some(user) = session else {
        return Ok(Redirect::to(&state.env.auth.register_url).into_response());
    };

    let rows = intervals_from_form(&fields);
    let saved = match availability::validate_form_intervals(&rows) {
        Ok(intervals) => {
            availability::set_availability(state.store.as_ref(), &user, &intervals).await
        }
        Err(failure) => Err(AppError::Validation(failure)),
    };

    match saved {
        Ok(updated) => Ok(Redirect::to(&format!("/schedule/{}", updated.username)).into_response()),
        Err(AppError::Validation(failure)) => {
            let message = i18n.get(failure.message_key());
            let page = TimeIntervalsTemplate::new(&state.env.app.name, &i18n, rows, Some(message));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, HtmlTemplate(page)).into_response())
        }
        Err(err) => Err(err),
    }
}

/// Public schedule of a user
pub async fn schedule(
    State(state): State<AppState>,
    Path(username): Path<String>,
    MaybeAuthSession(session): MaybeAuthSession,
    i18n: I18n,
) -> AppResult<Response> {
    let user = state
        .store
        .user_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    let rows = availability::get_availability(state.store.as_ref(), user.id)
        .await?
        .into_iter()
        .map(|interval| -> AppResult<ScheduleRow> {
            let args = i18n_args! {
                "start" => display_time(interval.time_start_in_minutes)?,
                "end" => display_time(interval.time_end_in_minutes)?,
            };
            Ok(ScheduleRow {
                day_name: i18n.week_day_name(interval.week_day),
                window: i18n.get_with_args("schedule-window", &args),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let page = ScheduleTemplate {
        lang: i18n.language().code(),
        app_name: state.env.app.name.clone(),
        title: user.name.clone(),
        noindex: false,
        heading: i18n.get_with_args("schedule-heading", &i18n_args! { "name" => user.name }),
        rows,
        empty_message: i18n.get("schedule-empty"),
        login_button: LoginButton::for_session(session.as_ref(), &state.env.auth, &i18n),
    };

    Ok(HtmlTemplate(page).into_response())
}

/// Rebuild the seven form rows from the submitted fields. Inputs of
/// disabled days are not submitted and fall back to the defaults.
fn intervals_from_form(fields: &HashMap<String, String>) -> Vec<FormInterval> {
    (0..DAYS_PER_WEEK as i32)
        .map(|week_day| {
            let field = |name: &str| fields.get(&format!("{}-{}", name, week_day));

            FormInterval {
                week_day,
                enabled: field("enabled").is_some_and(|value| value == "true" || value == "on"),
                start_time: field("start-time")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
                end_time: field("end-time")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_END_TIME.to_string()),
            }
        })
        .collect()
}

fn display_time(minutes: i32) -> AppResult<String> {
    availability::minutes_to_time_string(minutes)
        .map_err(|err| AppError::InternalServerError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_the_week_from_form_fields() {
        let fields: HashMap<String, String> = [
            ("enabled-1", "true"),
            ("start-time-1", "09:00"),
            ("end-time-1", "17:00"),
            ("enabled-3", "on"),
            ("start-time-3", "10:00"),
            ("end-time-3", "11:00"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        let rows = intervals_from_form(&fields);

        assert_eq!(rows.len(), 7);
        assert!(rows[1].enabled && rows[3].enabled);
        assert_eq!(rows[1].start_time, "09:00");
        assert_eq!(rows.iter().filter(|row| row.enabled).count(), 2);
        assert_eq!(rows[0].start_time, DEFAULT_START_TIME);
        assert_eq!(rows[0].end_time, DEFAULT_END_TIME);
    }
}
