use std::sync::Arc;

use crate::api::topic::{CreateTopicRequest, TopicResponse, UpdateTopicRequest};
use crate::database::models::{Id, NewTopic};
use crate::database::repository::TopicStore;

use super::ServiceResult;

/// Topics are a shared taxonomy; any authenticated user may edit them
pub struct TopicService {
    topics: Arc<dyn TopicStore>,
}

impl TopicService {
    pub fn new(topics: Arc<dyn TopicStore>) -> Self {
        Self { topics }
    }

    pub async fn create(&self, req: CreateTopicRequest) -> ServiceResult<TopicResponse> {
        let topic = self
            .topics
            .create(NewTopic {
                name: req.name,
                description: req.description,
            })
            .await?;
        Ok(topic.into())
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<TopicResponse>> {
        let topics = self.topics.find_all().await?;
        Ok(topics.into_iter().map(TopicResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: Id) -> ServiceResult<TopicResponse> {
        Ok(self.topics.find_by_id(id).await?.into())
    }

    pub async fn update(&self, id: Id, req: UpdateTopicRequest) -> ServiceResult<TopicResponse> {
        let mut topic = self.topics.find_by_id(id).await?;
        if let Some(name) = req.name {
            topic.name = name;
        }
        if let Some(description) = req.description {
            topic.description = description;
        }
        Ok(self.topics.update(&topic).await?.into())
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        self.topics.find_by_id(id).await?;
        self.topics.delete(id).await?;
        Ok(())
    }
}
