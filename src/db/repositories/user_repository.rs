use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::User;

pub struct UserRepository;

impl UserRepository {
    pub async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, email, avatar_url, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Lock the user's row for the rest of the transaction.
    ///
    /// Returns `None` when the user does not exist.
    pub async fn lock_user(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> Result<Option<Uuid>, Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }
}
