use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;

/// The signed-in user behind a live session.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}
