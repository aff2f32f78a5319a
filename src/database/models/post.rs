use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A single like. Set semantics are keyed by `user`: a post holds at most
/// one like per user, enforced by the mutators before the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    /// Author name/avatar snapshotted at comment time
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A post with its embedded like and comment subdocuments. The JSONB
/// columns are read and written whole, so a likes or comments update is a
/// single atomic column replace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Author name/avatar snapshotted at post time
    pub name: String,
    pub avatar: Option<String>,
    pub text: String,
    pub likes: Json<Vec<Like>>,
    pub comments: Json<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
}
