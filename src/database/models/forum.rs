use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Id, Owned, Topic};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Forum {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub user_name: Option<String>,
    /// Loaded from forum_topics after the row itself
    #[sqlx(skip)]
    pub topics: Vec<Topic>,
}

impl Owned for Forum {
    fn owner_id(&self) -> Id {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewForum {
    pub user_id: Id,
    pub title: String,
    pub content: String,
}
