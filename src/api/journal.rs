use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserResponse;
use super::validate::{FieldErrors, Validate};
use crate::database::models::{Id, Journal, JournalMood, JournalVisibility};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJournalRequest {
    pub mood: JournalMood,
    pub content: String,
    pub visibility: JournalVisibility,
}

impl Validate for CreateJournalRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.required("content", &self.content);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJournalRequest {
    pub mood: Option<JournalMood>,
    pub content: Option<String>,
    pub visibility: Option<JournalVisibility>,
}

impl Validate for UpdateJournalRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(content) = &self.content {
            errors.required("content", content);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalResponse {
    pub id: Id,
    pub user_id: Id,
    pub mood: JournalMood,
    pub content: String,
    pub visibility: JournalVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Journal> for JournalResponse {
    fn from(journal: Journal) -> Self {
        let user = journal
            .user_name
            .map(|name| UserResponse::author(journal.user_id, Some(name)));
        Self {
            id: journal.id,
            user_id: journal.user_id,
            mood: journal.mood,
            content: journal.content,
            visibility: journal.visibility,
            created_at: journal.created_at,
            updated_at: journal.updated_at,
            user,
        }
    }
}
