use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection};

use super::{found, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Forum, Id, NewForum, Topic};
use crate::database::repository::{non_empty, ForumStore};

const SELECT_FORUMS: &str = "SELECT f.id, f.user_id, f.title, f.content,
        f.created_at, f.updated_at, u.name AS user_name
     FROM forums f JOIN users u ON u.id = f.user_id";

#[derive(FromRow)]
struct ForumTopicRow {
    forum_id: Id,
    #[sqlx(flatten)]
    topic: Topic,
}

impl PgStore {
    /// Attach topics to each forum with a single round trip
    async fn load_topics(&self, forums: &mut [Forum]) -> Result<(), DatabaseError> {
        let ids: Vec<Id> = forums.iter().map(|f| f.id).collect();
        let rows = sqlx::query_as::<_, ForumTopicRow>(
            "SELECT ft.forum_id, t.id, t.name, t.description, t.created_at, t.updated_at
             FROM forum_topics ft JOIN topics t ON t.id = ft.topic_id
             WHERE ft.forum_id = ANY($1)
             ORDER BY t.id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_forum: HashMap<Id, Vec<Topic>> = HashMap::new();
        for row in rows {
            by_forum.entry(row.forum_id).or_default().push(row.topic);
        }
        for forum in forums.iter_mut() {
            forum.topics = by_forum.remove(&forum.id).unwrap_or_default();
        }
        Ok(())
    }
}

async fn clear_links(conn: &mut PgConnection, forum_id: Id) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM forum_topics WHERE forum_id = $1")
        .bind(forum_id)
        .execute(conn)
        .await?;
    Ok(())
}

async fn insert_links(conn: &mut PgConnection, forum_id: Id, topic_ids: &[Id]) -> Result<(), DatabaseError> {
    if topic_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO forum_topics (forum_id, topic_id)
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(forum_id)
    .bind(topic_ids)
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl ForumStore for PgStore {
    async fn create(&self, forum: NewForum, topic_ids: &[Id]) -> Result<Forum, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (Id,) = sqlx::query_as(
            "INSERT INTO forums (user_id, title, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(forum.user_id)
        .bind(&forum.title)
        .bind(&forum.content)
        .fetch_one(&mut *tx)
        .await?;
        insert_links(&mut tx, id, topic_ids).await?;

        tx.commit().await?;
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Forum>, DatabaseError> {
        let mut forums = sqlx::query_as::<_, Forum>(&format!("{} ORDER BY f.id", SELECT_FORUMS))
            .fetch_all(&self.pool)
            .await?;
        self.load_topics(&mut forums).await?;
        non_empty(forums, "forums")
    }

    async fn find_by_id(&self, id: Id) -> Result<Forum, DatabaseError> {
        let forum = sqlx::query_as::<_, Forum>(&format!("{} WHERE f.id = $1", SELECT_FORUMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let mut forums = vec![found(forum, "forum", id)?];
        self.load_topics(&mut forums).await?;
        Ok(forums.remove(0))
    }

    async fn update(&self, forum: &Forum, topic_ids: Option<&[Id]>) -> Result<Forum, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE forums SET title = $2, content = $3, updated_at = now() WHERE id = $1",
        )
        .bind(forum.id)
        .bind(&forum.title)
        .bind(&forum.content)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("forum {} not found", forum.id)));
        }
        if let Some(topic_ids) = topic_ids {
            clear_links(&mut tx, forum.id).await?;
            insert_links(&mut tx, forum.id, topic_ids).await?;
        }

        tx.commit().await?;
        self.find_by_id(forum.id).await
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        clear_links(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM forums WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("forum {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn clear_topics(&self, id: Id) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        clear_links(&mut conn, id).await
    }
}
