use async_trait::async_trait;

use super::{found, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, NewTopic, Topic};
use crate::database::repository::{non_empty, TopicStore};

const TOPIC_COLUMNS: &str = "id, name, description, created_at, updated_at";

#[async_trait]
impl TopicStore for PgStore {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        let created = sqlx::query_as::<_, Topic>(&format!(
            "INSERT INTO topics (name, description) VALUES ($1, $2) RETURNING {}",
            TOPIC_COLUMNS
        ))
        .bind(&topic.name)
        .bind(&topic.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Topic>, DatabaseError> {
        let topics = sqlx::query_as::<_, Topic>(&format!(
            "SELECT {} FROM topics ORDER BY id",
            TOPIC_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        non_empty(topics, "topics")
    }

    async fn find_by_id(&self, id: Id) -> Result<Topic, DatabaseError> {
        let topic = sqlx::query_as::<_, Topic>(&format!(
            "SELECT {} FROM topics WHERE id = $1",
            TOPIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        found(topic, "topic", id)
    }

    async fn update(&self, topic: &Topic) -> Result<Topic, DatabaseError> {
        let updated = sqlx::query_as::<_, Topic>(&format!(
            "UPDATE topics SET name = $2, description = $3, updated_at = now()
             WHERE id = $1 RETURNING {}",
            TOPIC_COLUMNS
        ))
        .bind(topic.id)
        .bind(&topic.name)
        .bind(&topic.description)
        .fetch_optional(&self.pool)
        .await?;
        found(updated, "topic", topic.id)
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("topic {} not found", id)));
        }
        Ok(())
    }
}
