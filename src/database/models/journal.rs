use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Id, Owned};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "journal_mood", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JournalMood {
    Happy,
    Good,
    Normal,
    Sad,
    Angry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "journal_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JournalVisibility {
    Private,
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Journal {
    pub id: Id,
    pub user_id: Id,
    pub mood: JournalMood,
    pub content: String,
    pub visibility: JournalVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owner display name, present when the row was read joined with users
    #[sqlx(default)]
    pub user_name: Option<String>,
}

impl Owned for Journal {
    fn owner_id(&self) -> Id {
        self.user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewJournal {
    pub user_id: Id,
    pub mood: JournalMood,
    pub content: String,
    pub visibility: JournalVisibility,
}
