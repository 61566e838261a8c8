use std::sync::Arc;

use crate::api::forum::{CreateForumRequest, ForumResponse, UpdateForumRequest};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, NewForum};
use crate::database::repository::{ForumStore, TopicStore};

use super::ownership::authorized;
use super::{ServiceError, ServiceResult};

pub struct ForumService {
    forums: Arc<dyn ForumStore>,
    topics: Arc<dyn TopicStore>,
}

impl ForumService {
    pub fn new(forums: Arc<dyn ForumStore>, topics: Arc<dyn TopicStore>) -> Self {
        Self { forums, topics }
    }

    /// Every id must name an existing topic. Duplicates collapse, order is kept.
    async fn resolve_topics(&self, ids: &[Id]) -> ServiceResult<Vec<Id>> {
        let mut resolved: Vec<Id> = Vec::with_capacity(ids.len());
        for &id in ids {
            if resolved.contains(&id) {
                continue;
            }
            match self.topics.find_by_id(id).await {
                Ok(topic) => resolved.push(topic.id),
                Err(DatabaseError::NotFound(_)) => {
                    return Err(ServiceError::NotFound(format!("topic {} not found", id)));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(resolved)
    }

    pub async fn create(&self, owner: Id, req: CreateForumRequest) -> ServiceResult<ForumResponse> {
        let topic_ids = self.resolve_topics(&req.topics).await?;
        let forum = self
            .forums
            .create(
                NewForum {
                    user_id: owner,
                    title: req.title,
                    content: req.content,
                },
                &topic_ids,
            )
            .await?;
        Ok(forum.into())
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<ForumResponse>> {
        let forums = self.forums.find_all().await?;
        Ok(forums.into_iter().map(ForumResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: Id) -> ServiceResult<ForumResponse> {
        Ok(self.forums.find_by_id(id).await?.into())
    }

    pub async fn update(&self, id: Id, caller: Id, req: UpdateForumRequest) -> ServiceResult<ForumResponse> {
        let mut forum = authorized(caller, "forum", self.forums.find_by_id(id)).await?;

        let topic_ids = match &req.topics {
            Some(ids) => Some(self.resolve_topics(ids).await?),
            None => None,
        };
        if let Some(title) = req.title {
            forum.title = title;
        }
        if let Some(content) = req.content {
            forum.content = content;
        }

        let forum = self.forums.update(&forum, topic_ids.as_deref()).await?;
        Ok(forum.into())
    }

    pub async fn delete(&self, id: Id, caller: Id) -> ServiceResult<()> {
        authorized(caller, "forum", self.forums.find_by_id(id)).await?;
        self.forums.delete(id).await?;
        Ok(())
    }

    /// Detach every topic from the forum; the forum itself stays
    pub async fn remove_topics(&self, id: Id, caller: Id) -> ServiceResult<()> {
        authorized(caller, "forum", self.forums.find_by_id(id)).await?;
        self.forums.clear_topics(id).await?;
        Ok(())
    }
}
