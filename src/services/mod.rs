pub mod comment_service;
pub mod forum_service;
pub mod journal_service;
pub mod ownership;
pub mod topic_service;
pub mod user_service;
pub mod vent_service;

pub use comment_service::CommentService;
pub use forum_service::ForumService;
pub use journal_service::JournalService;
pub use topic_service::TopicService;
pub use user_service::UserService;
pub use vent_service::{ConversationKey, ConversationStore, VentService};

use crate::ai::AiError;
use crate::auth::JwtError;
use crate::database::manager::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),
    #[error("Token error: {0}")]
    Token(#[from] JwtError),
    #[error("Generative AI error: {0}")]
    Ai(#[from] AiError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
