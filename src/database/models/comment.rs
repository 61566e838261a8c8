use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Id, Owned};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comment_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommentVisibility {
    #[default]
    Review,
    Public,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Id,
    pub user_id: Id,
    pub forum_id: Id,
    pub content: String,
    pub visibility: CommentVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub user_name: Option<String>,
}

impl Owned for Comment {
    fn owner_id(&self) -> Id {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: Id,
    pub forum_id: Id,
    pub content: String,
    pub visibility: CommentVisibility,
}
