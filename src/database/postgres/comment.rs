use async_trait::async_trait;

use super::{found, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Comment, Id, NewComment};
use crate::database::repository::{non_empty, CommentStore};

const SELECT_COMMENTS: &str = "SELECT c.id, c.user_id, c.forum_id, c.content, c.visibility,
        c.created_at, c.updated_at, u.name AS user_name
     FROM comments c JOIN users u ON u.id = c.user_id";

const WITH_AUTHOR: &str = "SELECT c.id, c.user_id, c.forum_id, c.content, c.visibility,
        c.created_at, c.updated_at, u.name AS user_name
     FROM c JOIN users u ON u.id = c.user_id";

#[async_trait]
impl CommentStore for PgStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let created = sqlx::query_as::<_, Comment>(&format!(
            "WITH c AS (
                INSERT INTO comments (user_id, forum_id, content, visibility) VALUES ($1, $2, $3, $4)
                RETURNING *
             ) {}",
            WITH_AUTHOR
        ))
        .bind(comment.user_id)
        .bind(comment.forum_id)
        .bind(&comment.content)
        .bind(comment.visibility)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Comment>, DatabaseError> {
        let comments = sqlx::query_as::<_, Comment>(&format!("{} ORDER BY c.id", SELECT_COMMENTS))
            .fetch_all(&self.pool)
            .await?;
        non_empty(comments, "comments")
    }

    async fn find_by_id(&self, id: Id) -> Result<Comment, DatabaseError> {
        let comment = sqlx::query_as::<_, Comment>(&format!("{} WHERE c.id = $1", SELECT_COMMENTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(comment, "comment", id)
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DatabaseError> {
        let updated = sqlx::query_as::<_, Comment>(&format!(
            "WITH c AS (
                UPDATE comments SET content = $2, visibility = $3, updated_at = now()
                WHERE id = $1 RETURNING *
             ) {}",
            WITH_AUTHOR
        ))
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.visibility)
        .fetch_optional(&self.pool)
        .await?;
        found(updated, "comment", comment.id)
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("comment {} not found", id)));
        }
        Ok(())
    }
}
