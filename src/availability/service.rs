use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::form::expand_for_form;
use super::validation::{validate_time_intervals, FormInterval, TimeInterval};
use crate::db::{SchedulingStore, SessionUser, UserTimeInterval};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedAvailability {
    pub username: String,
}

/// Stored intervals of a user, ascending by weekday. No defaults are added.
pub async fn get_availability(
    store: &dyn SchedulingStore,
    user_id: Uuid,
) -> AppResult<Vec<UserTimeInterval>> {
    Ok(store.time_intervals_for_user(user_id).await?)
}

/// The seven rows of the edit form for a user.
pub async fn load_form(store: &dyn SchedulingStore, user_id: Uuid) -> AppResult<Vec<FormInterval>> {
    let stored = get_availability(store, user_id).await?;

    expand_for_form(&stored).map_err(|err| {
        AppError::InternalServerError(format!("stored interval for {} is corrupt: {}", user_id, err))
    })
}

/// Replace the user's weekly availability with `entries`.
///
/// The entries are validated again here whatever the caller already
/// checked; on failure nothing is written.
pub async fn set_availability(
    store: &dyn SchedulingStore,
    user: &SessionUser,
    entries: &[TimeInterval],
) -> AppResult<UpdatedAvailability> {
    let intervals = validate_time_intervals(entries)?;

    store.replace_time_intervals(user.id, &intervals).await?;
    info!(user_id = %user.id, days = intervals.len(), "Updated weekly availability");

    Ok(UpdatedAvailability {
        username: user.username.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::ValidationFailure;
    use crate::db::memory::MemoryStore;

    fn session_user(store: &MemoryStore) -> SessionUser {
        let user = store.add_user("ada", "Ada Lovelace");
        SessionUser {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }

    fn interval(week_day: i32, start: i32, end: i32) -> TimeInterval {
        TimeInterval {
            week_day,
            start_time_in_minutes: start,
            end_time_in_minutes: end,
        }
    }

    #[tokio::test]
    async fn replaces_the_whole_week() {
        let store = MemoryStore::default();
        let user = session_user(&store);
        store.set_intervals(
            user.id,
            vec![UserTimeInterval {
                week_day: 0,
                time_start_in_minutes: 0,
                time_end_in_minutes: 600,
            }],
        );

        let updated = set_availability(&store, &user, &[interval(3, 540, 720), interval(1, 480, 1020)])
            .await
            .unwrap();

        assert_eq!(updated.username, "ada");
        let days: Vec<_> = get_availability(&store, user.id)
            .await
            .unwrap()
            .iter()
            .map(|interval| interval.week_day)
            .collect();
        assert_eq!(days, vec![1, 3]);
    }

    #[tokio::test]
    async fn invalid_entries_leave_storage_untouched() {
        let store = MemoryStore::default();
        let user = session_user(&store);
        let before = vec![UserTimeInterval {
            week_day: 2,
            time_start_in_minutes: 480,
            time_end_in_minutes: 1080,
        }];
        store.set_intervals(user.id, before.clone());

        let result = set_availability(&store, &user, &[interval(1, 480, 500), interval(4, 480, 1080)]).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationFailure::IntervalTooShort { week_day: 1 }))
        ));
        assert_eq!(store.intervals(user.id), before);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let store = MemoryStore::default();
        let user = session_user(&store);

        let result = set_availability(&store, &user, &[]).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationFailure::NoDaysSelected))
        ));
    }

    #[tokio::test]
    async fn form_expands_stored_days() {
        let store = MemoryStore::default();
        let user = session_user(&store);
        store.set_intervals(
            user.id,
            vec![UserTimeInterval {
                week_day: 2,
                time_start_in_minutes: 600,
                time_end_in_minutes: 960,
            }],
        );

        let form = load_form(&store, user.id).await.unwrap();

        assert_eq!(form.len(), 7);
        assert_eq!(
            form[2],
            FormInterval {
                week_day: 2,
                enabled: true,
                start_time: "10:00".to_string(),
                end_time: "16:00".to_string(),
            }
        );
        assert!(form.iter().filter(|row| row.week_day != 2).all(|row| {
            !row.enabled && row.start_time == "08:00" && row.end_time == "18:00"
        }));
    }
}
