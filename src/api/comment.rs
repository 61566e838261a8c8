use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserResponse;
use super::validate::{FieldErrors, Validate};
use crate::database::models::{Comment, CommentVisibility, Id};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub forum_id: Id,
    pub content: String,
    /// Defaults to `review`
    #[serde(default)]
    pub visibility: Option<CommentVisibility>,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.positive("forum_id", self.forum_id);
        errors.required("content", &self.content);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
    pub visibility: Option<CommentVisibility>,
}

impl Validate for UpdateCommentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(content) = &self.content {
            errors.required("content", content);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Id,
    pub forum_id: Id,
    pub user_id: Id,
    pub content: String,
    pub visibility: CommentVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        let user = comment
            .user_name
            .map(|name| UserResponse::author(comment.user_id, Some(name)));
        Self {
            id: comment.id,
            forum_id: comment.forum_id,
            user_id: comment.user_id,
            content: comment.content,
            visibility: comment.visibility,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user,
        }
    }
}
