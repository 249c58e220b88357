use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DatabaseError;
use super::models::{SessionUser, User, UserTimeInterval};
use super::store::{SchedulingStore, SessionStore};
use crate::availability::TimeInterval;

/// In-process store used by router tests.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    sessions: RwLock<HashMap<String, (Uuid, OffsetDateTime)>>,
    intervals: RwLock<HashMap<Uuid, Vec<UserTimeInterval>>>,
    interval_reads: AtomicUsize,
}

impl MemoryStore {
    pub fn add_user(&self, username: &str, name: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: name.to_string(),
            email: None,
            avatar_url: None,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.write().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn add_session(&self, token: &str, user_id: Uuid, expires: OffsetDateTime) {
        self.sessions
            .write()
            .unwrap()
            .insert(token.to_string(), (user_id, expires));
    }

    pub fn set_intervals(&self, user_id: Uuid, intervals: Vec<UserTimeInterval>) {
        self.intervals.write().unwrap().insert(user_id, intervals);
    }

    pub fn intervals(&self, user_id: Uuid) -> Vec<UserTimeInterval> {
        self.intervals
            .read()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn interval_reads(&self) -> usize {
        self.interval_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulingStore for MemoryStore {
    async fn time_intervals_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserTimeInterval>, DatabaseError> {
        self.interval_reads.fetch_add(1, Ordering::SeqCst);
        let mut intervals = self.intervals(user_id);
        intervals.sort_by_key(|interval| interval.week_day);
        Ok(intervals)
    }

    async fn replace_time_intervals(
        &self,
        user_id: Uuid,
        intervals: &[TimeInterval],
    ) -> Result<(), DatabaseError> {
        if !self.users.read().unwrap().contains_key(&user_id) {
            return Err(DatabaseError::NotFound);
        }

        let stored = intervals
            .iter()
            .map(|interval| UserTimeInterval {
                week_day: interval.week_day,
                time_start_in_minutes: interval.start_time_in_minutes,
                time_end_in_minutes: interval.end_time_in_minutes,
            })
            .collect();
        self.set_intervals(user_id, stored);
        Ok(())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn find_session_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionUser>, DatabaseError> {
        let sessions = self.sessions.read().unwrap();
        let Some((user_id, expires)) = sessions.get(session_token) else {
            return Ok(None);
        };
        if *expires <= OffsetDateTime::now_utc() {
            return Ok(None);
        }

        Ok(self.users.read().unwrap().get(user_id).map(|user| SessionUser {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }))
    }
}
