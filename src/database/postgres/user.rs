use async_trait::async_trait;

use super::{found, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Id, NewUser, User};
use crate::database::repository::{non_empty, UserStore};

const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        non_empty(users, "users")
    }

    async fn find_by_id(&self, id: Id) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        found(user, "user", id)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("user not found"))
    }

    async fn update(&self, user: &User) -> Result<User, DatabaseError> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = $2, email = $3, password = $4, updated_at = now()
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        found(updated, "user", user.id)
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("user {} not found", id)));
        }
        Ok(())
    }
}
