use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::error::DatabaseError;
use super::models::{SessionUser, User, UserTimeInterval};
use super::repositories::{SessionRepository, TimeIntervalRepository, UserRepository};
use crate::availability::TimeInterval;

/// Users and their weekly availability.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// Stored intervals of a user, ordered by weekday.
    async fn time_intervals_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserTimeInterval>, DatabaseError>;

    /// Replace the user's whole week in one atomic step.
    async fn replace_time_intervals(
        &self,
        user_id: Uuid,
        intervals: &[TimeInterval],
    ) -> Result<(), DatabaseError>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Lookup of sessions issued by the sign-in flow.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_session_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionUser>, DatabaseError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulingStore for PgStore {
    async fn time_intervals_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserTimeInterval>, DatabaseError> {
        TimeIntervalRepository::get_by_user_id(&self.pool, user_id)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn replace_time_intervals(
        &self,
        user_id: Uuid,
        intervals: &[TimeInterval],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Concurrent replaces for the same user queue up behind this lock.
        if UserRepository::lock_user(&mut tx, user_id).await?.is_none() {
            return Err(DatabaseError::NotFound);
        }

        let removed = TimeIntervalRepository::delete_by_user_id(&mut tx, user_id).await?;
        for interval in intervals {
            TimeIntervalRepository::create(&mut tx, user_id, interval)
                .await
                .map_err(DatabaseError::from_sqlx)?;
        }

        tx.commit().await?;
        debug!(%user_id, removed, inserted = intervals.len(), "Replaced time intervals");
        Ok(())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(UserRepository::get_user_by_username(&self.pool, username).await?)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn find_session_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionUser>, DatabaseError> {
        Ok(SessionRepository::find_active_session_user(&self.pool, session_token).await?)
    }
}
