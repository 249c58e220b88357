use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::availability::{FormInterval, ValidationFailure};
use crate::config::AuthConfig;
use crate::db::SessionUser;
use crate::i18n::I18n;

pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Failed to render template: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

pub struct IntervalRow {
    pub week_day: i32,
    pub day_name: String,
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Template)]
#[template(path = "update/time_intervals.html")]
pub struct TimeIntervalsTemplate {
    pub lang: &'static str,
    pub app_name: String,
    pub title: String,
    pub noindex: bool,
    pub heading: String,
    pub description: String,
    pub submit_label: String,
    pub no_days_message: String,
    pub too_short_message: String,
    pub rows: Vec<IntervalRow>,
    pub error: Option<String>,
}

impl TimeIntervalsTemplate {
    pub fn new(app_name: &str, i18n: &I18n, form: Vec<FormInterval>, error: Option<String>) -> Self {
        let rows = form
            .into_iter()
            .map(|interval| IntervalRow {
                day_name: i18n.week_day_name(interval.week_day),
                week_day: interval.week_day,
                enabled: interval.enabled,
                start_time: interval.start_time,
                end_time: interval.end_time,
            })
            .collect();

        Self {
            lang: i18n.language().code(),
            app_name: app_name.to_string(),
            title: i18n.get("time-intervals-title"),
            noindex: true,
            heading: i18n.get("time-intervals-heading"),
            description: i18n.get("time-intervals-description"),
            submit_label: i18n.get("time-intervals-submit"),
            no_days_message: i18n.get(ValidationFailure::NoDaysSelected.message_key()),
            too_short_message: i18n
                .get(ValidationFailure::IntervalTooShort { week_day: 0 }.message_key()),
            rows,
            error,
        }
    }
}

/// Sign-in for visitors, a shortcut to the availability form for the owner
/// of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginButton {
    pub href: String,
    pub label: String,
}

impl LoginButton {
    pub fn for_session(session: Option<&SessionUser>, auth: &AuthConfig, i18n: &I18n) -> Self {
        match session {
            None => Self {
                href: auth.sign_in_url.clone(),
                label: i18n.get("login"),
            },
            Some(_) => Self {
                href: "/update/time-intervals".to_string(),
                label: i18n.get("update-details"),
            },
        }
    }
}

pub struct ScheduleRow {
    pub day_name: String,
    pub window: String,
}

#[derive(Template)]
#[template(path = "schedule/profile.html")]
pub struct ScheduleTemplate {
    pub lang: &'static str,
    pub app_name: String,
    pub title: String,
    pub noindex: bool,
    pub heading: String,
    pub rows: Vec<ScheduleRow>,
    pub empty_message: String,
    pub login_button: LoginButton,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::form::expand_for_form;
    use crate::i18n::{builtin_localizer, SupportedLanguage};
    use std::sync::Arc;

    fn i18n(language: SupportedLanguage) -> I18n {
        I18n::new(Arc::new(builtin_localizer().unwrap()), language)
    }

    #[test]
    fn login_button_depends_on_session() {
        let auth = crate::config::test_config().auth;
        let i18n = i18n(SupportedLanguage::Portuguese);
        let user = SessionUser {
            id: uuid::Uuid::new_v4(),
            username: "ada".to_string(),
            name: "Ada".to_string(),
        };

        assert_eq!(
            LoginButton::for_session(None, &auth, &i18n),
            LoginButton {
                href: "/api/auth/signin/google".to_string(),
                label: "Login".to_string(),
            }
        );
        assert_eq!(
            LoginButton::for_session(Some(&user), &auth, &i18n),
            LoginButton {
                href: "/update/time-intervals".to_string(),
                label: "Alterar dados".to_string(),
            }
        );
    }

    #[test]
    fn form_disables_inputs_of_disabled_days() {
        let i18n = i18n(SupportedLanguage::English);
        let page = TimeIntervalsTemplate::new("Call Scheduler", &i18n, expand_for_form(&[]).unwrap(), None);

        let html = page.render().unwrap();

        assert!(html.contains("lang=\"en\""));
        assert!(html.contains("noindex"));
        assert!(html.contains("Sunday"));
        assert!(html.contains("name=\"start-time-0\" value=\"08:00\""));
        assert_eq!(html.matches(" disabled>").count(), 14);
        assert!(!html.contains("<p class=\"form-error\""));
    }

    #[test]
    fn form_carries_messages_for_checks_in_the_browser() {
        let i18n = i18n(SupportedLanguage::Portuguese);
        let page = TimeIntervalsTemplate::new("Call Scheduler", &i18n, expand_for_form(&[]).unwrap(), None);

        let html = page.render().unwrap();

        assert!(html.contains(
            "data-no-days-message=\"Você precisa selecionar pelo menos um dia da semana!\""
        ));
        assert!(html.contains(
            "data-too-short-message=\"O horário de término deve ser pelo menos 1h distante do início.\""
        ));
        assert!(html.contains("form.addEventListener('submit'"));
    }

    #[test]
    fn form_shows_inline_error() {
        let i18n = i18n(SupportedLanguage::Portuguese);
        let message = i18n.get("intervals-no-days-selected");
        let page = TimeIntervalsTemplate::new(
            "Call Scheduler",
            &i18n,
            expand_for_form(&[]).unwrap(),
            Some(message),
        );

        let html = page.render().unwrap();

        assert!(html.contains("Você precisa selecionar pelo menos um dia da semana!"));
    }
}
