use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User entity - represents a registered forum user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    /// Unique, immutable. Used as the ownership key on posts.
    pub user_name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}
