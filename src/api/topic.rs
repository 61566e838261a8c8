use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{FieldErrors, Validate};
use crate::database::models::{Id, Topic};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
    pub description: String,
}

impl Validate for CreateTopicRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.required("name", &self.name);
        errors.required("description", &self.description);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTopicRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Validate for UpdateTopicRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.required("name", name);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicResponse {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            description: topic.description,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}
