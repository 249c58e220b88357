use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::availability::TimeInterval;
use crate::db::models::UserTimeInterval;

pub struct TimeIntervalRepository;

impl TimeIntervalRepository {
    pub async fn get_by_user_id(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserTimeInterval>, Error> {
        sqlx::query_as::<_, UserTimeInterval>(
            r#"
            SELECT week_day, time_start_in_minutes, time_end_in_minutes
            FROM user_time_intervals
            WHERE user_id = $1
            ORDER BY week_day ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn delete_by_user_id(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM user_time_intervals WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO user_time_intervals (id, user_id, week_day, time_start_in_minutes, time_end_in_minutes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(interval.week_day)
        .bind(interval.start_time_in_minutes)
        .bind(interval.end_time_in_minutes)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
