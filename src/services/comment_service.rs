use std::sync::Arc;

use crate::api::comment::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, NewComment};
use crate::database::repository::{CommentStore, ForumStore};

use super::ownership::authorized;
use super::{ServiceError, ServiceResult};

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    forums: Arc<dyn ForumStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, forums: Arc<dyn ForumStore>) -> Self {
        Self { comments, forums }
    }

    pub async fn create(&self, owner: Id, req: CreateCommentRequest) -> ServiceResult<CommentResponse> {
        match self.forums.find_by_id(req.forum_id).await {
            Ok(_) => {}
            Err(DatabaseError::NotFound(_)) => {
                return Err(ServiceError::NotFound(format!("forum {} not found", req.forum_id)));
            }
            Err(e) => return Err(e.into()),
        }

        let comment = self
            .comments
            .create(NewComment {
                user_id: owner,
                forum_id: req.forum_id,
                content: req.content,
                visibility: req.visibility.unwrap_or_default(),
            })
            .await?;
        Ok(comment.into())
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.comments.find_all().await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: Id) -> ServiceResult<CommentResponse> {
        Ok(self.comments.find_by_id(id).await?.into())
    }

    pub async fn update(&self, id: Id, caller: Id, req: UpdateCommentRequest) -> ServiceResult<CommentResponse> {
        let mut comment = authorized(caller, "comment", self.comments.find_by_id(id)).await?;
        if let Some(content) = req.content {
            comment.content = content;
        }
        if let Some(visibility) = req.visibility {
            comment.visibility = visibility;
        }
        Ok(self.comments.update(&comment).await?.into())
    }

    pub async fn delete(&self, id: Id, caller: Id) -> ServiceResult<()> {
        authorized(caller, "comment", self.comments.find_by_id(id)).await?;
        self.comments.delete(id).await?;
        Ok(())
    }
}
