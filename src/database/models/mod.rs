pub mod comment;
pub mod forum;
pub mod journal;
pub mod topic;
pub mod user;

pub use comment::{Comment, CommentVisibility, NewComment};
pub use forum::{Forum, NewForum};
pub use journal::{Journal, JournalMood, JournalVisibility, NewJournal};
pub use topic::{NewTopic, Topic};
pub use user::{NewUser, User};

/// Primary key type shared by every table (BIGSERIAL)
pub type Id = i64;

/// Records that carry the id of the user who created them
pub trait Owned {
    fn owner_id(&self) -> Id;
}
