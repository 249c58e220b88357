use sqlx::{Error, PgPool};

use crate::db::models::SessionUser;

pub struct SessionRepository;

impl SessionRepository {
    /// Find the user owning an unexpired session token.
    pub async fn find_active_session_user(
        pool: &PgPool,
        session_token: &str,
    ) -> Result<Option<SessionUser>, Error> {
        sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT u.id, u.username, u.name
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.session_token = $1 AND s.expires > NOW()
            "#,
        )
        .bind(session_token)
        .fetch_optional(pool)
        .await
    }
}
