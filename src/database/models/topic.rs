use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
    pub description: String,
}
