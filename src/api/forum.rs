use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::topic::TopicResponse;
use super::user::UserResponse;
use super::validate::{FieldErrors, Validate};
use crate::database::models::{Forum, Id};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateForumRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub topics: Vec<Id>,
}

impl Validate for CreateForumRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.required("title", &self.title);
        errors.required("content", &self.content);
        for id in &self.topics {
            errors.positive("topics", *id);
        }
        errors.into_result()
    }
}

/// `topics: None` keeps the current association, `Some` replaces it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForumRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub topics: Option<Vec<Id>>,
}

impl Validate for UpdateForumRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            errors.required("title", title);
        }
        if let Some(content) = &self.content {
            errors.required("content", content);
        }
        for id in self.topics.iter().flatten() {
            errors.positive("topics", *id);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForumResponse {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<TopicResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<Forum> for ForumResponse {
    fn from(forum: Forum) -> Self {
        let user = forum
            .user_name
            .map(|name| UserResponse::author(forum.user_id, Some(name)));
        Self {
            id: forum.id,
            user_id: forum.user_id,
            title: forum.title,
            content: forum.content,
            topics: forum.topics.into_iter().map(TopicResponse::from).collect(),
            created_at: forum.created_at,
            updated_at: forum.updated_at,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_default_to_empty_on_create() {
        let req: CreateForumRequest =
            serde_json::from_value(serde_json::json!({ "title": "t", "content": "c" })).unwrap();
        assert!(req.topics.is_empty());
    }

    #[test]
    fn omitted_topics_on_update_stay_none() {
        let req: UpdateForumRequest =
            serde_json::from_value(serde_json::json!({ "title": "new" })).unwrap();
        assert!(req.topics.is_none());

        let req: UpdateForumRequest =
            serde_json::from_value(serde_json::json!({ "topics": [] })).unwrap();
        assert_eq!(req.topics, Some(Vec::new()));
    }

    #[test]
    fn non_positive_topic_ids_are_rejected() {
        let req = CreateForumRequest {
            title: "t".into(),
            content: "c".into(),
            topics: vec![1, 0],
        };
        assert!(req.validate().is_err());
    }
}
