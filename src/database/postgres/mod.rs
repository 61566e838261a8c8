//! PostgreSQL adapters, one file per entity.

mod comment;
mod forum;
mod journal;
mod topic;
mod user;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::repository::HealthProbe;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a zero-row result onto the not-found signal
fn found<T>(row: Option<T>, what: &str, id: i64) -> Result<T, DatabaseError> {
    row.ok_or_else(|| DatabaseError::not_found(format!("{} {} not found", what, id)))
}
