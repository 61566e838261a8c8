//! Capability traits for each persisted entity.
//!
//! Services depend on these traits only. The PostgreSQL adapter in
//! `database::postgres` implements all of them; tests swap in an in-memory
//! store. Collection reads return `DatabaseError::NotFound` when they match
//! no rows, and so do primary-key lookups that miss.

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, Forum, Id, Journal, NewComment, NewForum, NewJournal, NewTopic, NewUser, Topic, User,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<User>, DatabaseError>;
    async fn find_by_id(&self, id: Id) -> Result<User, DatabaseError>;
    async fn find_by_email(&self, email: &str) -> Result<User, DatabaseError>;
    /// Persist every mutable column of `user` and return the stored row
    async fn update(&self, user: &User) -> Result<User, DatabaseError>;
    async fn delete(&self, id: Id) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn create(&self, journal: NewJournal) -> Result<Journal, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<Journal>, DatabaseError>;
    async fn find_by_id(&self, id: Id) -> Result<Journal, DatabaseError>;
    async fn update(&self, journal: &Journal) -> Result<Journal, DatabaseError>;
    async fn delete(&self, id: Id) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait TopicStore: Send + Sync {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<Topic>, DatabaseError>;
    async fn find_by_id(&self, id: Id) -> Result<Topic, DatabaseError>;
    async fn update(&self, topic: &Topic) -> Result<Topic, DatabaseError>;
    async fn delete(&self, id: Id) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Insert the forum and link it to `topic_ids`, atomically
    async fn create(&self, forum: NewForum, topic_ids: &[Id]) -> Result<Forum, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<Forum>, DatabaseError>;
    async fn find_by_id(&self, id: Id) -> Result<Forum, DatabaseError>;
    /// Persist the forum columns; `Some(ids)` replaces the topic association
    async fn update(&self, forum: &Forum, topic_ids: Option<&[Id]>) -> Result<Forum, DatabaseError>;
    /// Clear topic associations, then remove the row
    async fn delete(&self, id: Id) -> Result<(), DatabaseError>;
    /// Drop every topic association of the forum, keeping the forum
    async fn clear_topics(&self, id: Id) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError>;
    async fn find_all(&self) -> Result<Vec<Comment>, DatabaseError>;
    async fn find_by_id(&self, id: Id) -> Result<Comment, DatabaseError>;
    async fn update(&self, comment: &Comment) -> Result<Comment, DatabaseError>;
    async fn delete(&self, id: Id) -> Result<(), DatabaseError>;
}

/// Connectivity probe backing GET /health
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Turn an empty collection into the not-found signal
pub fn non_empty<T>(rows: Vec<T>, what: &str) -> Result<Vec<T>, DatabaseError> {
    if rows.is_empty() {
        Err(DatabaseError::not_found(format!("no {} found", what)))
    } else {
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_not_found() {
        let rows: Vec<i32> = Vec::new();
        assert!(matches!(non_empty(rows, "journals"), Err(DatabaseError::NotFound(_))));
    }

    #[test]
    fn populated_collection_passes_through() {
        assert_eq!(non_empty(vec![1, 2], "journals").unwrap(), vec![1, 2]);
    }
}
