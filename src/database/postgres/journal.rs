use async_trait::async_trait;

use super::{found, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, Journal, NewJournal};
use crate::database::repository::{non_empty, JournalStore};

/// Journals joined with their owner's display name
const SELECT_JOURNALS: &str = "SELECT j.id, j.user_id, j.mood, j.content, j.visibility,
        j.created_at, j.updated_at, u.name AS user_name
     FROM journals j JOIN users u ON u.id = j.user_id";

/// Re-joins a written row (exposed as CTE `j`) with its owner's name
const WITH_AUTHOR: &str = "SELECT j.id, j.user_id, j.mood, j.content, j.visibility,
        j.created_at, j.updated_at, u.name AS user_name
     FROM j JOIN users u ON u.id = j.user_id";

#[async_trait]
impl JournalStore for PgStore {
    async fn create(&self, journal: NewJournal) -> Result<Journal, DatabaseError> {
        let created = sqlx::query_as::<_, Journal>(&format!(
            "WITH j AS (
                INSERT INTO journals (user_id, mood, content, visibility) VALUES ($1, $2, $3, $4)
                RETURNING *
             ) {}",
            WITH_AUTHOR
        ))
        .bind(journal.user_id)
        .bind(journal.mood)
        .bind(&journal.content)
        .bind(journal.visibility)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Journal>, DatabaseError> {
        let journals = sqlx::query_as::<_, Journal>(&format!("{} ORDER BY j.id", SELECT_JOURNALS))
            .fetch_all(&self.pool)
            .await?;
        non_empty(journals, "journals")
    }

    async fn find_by_id(&self, id: Id) -> Result<Journal, DatabaseError> {
        let journal = sqlx::query_as::<_, Journal>(&format!("{} WHERE j.id = $1", SELECT_JOURNALS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(journal, "journal", id)
    }

    async fn update(&self, journal: &Journal) -> Result<Journal, DatabaseError> {
        let updated = sqlx::query_as::<_, Journal>(&format!(
            "WITH j AS (
                UPDATE journals SET mood = $2, content = $3, visibility = $4, updated_at = now()
                WHERE id = $1 RETURNING *
             ) {}",
            WITH_AUTHOR
        ))
        .bind(journal.id)
        .bind(journal.mood)
        .bind(&journal.content)
        .bind(journal.visibility)
        .fetch_optional(&self.pool)
        .await?;
        found(updated, "journal", journal.id)
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("journal {} not found", id)));
        }
        Ok(())
    }
}
