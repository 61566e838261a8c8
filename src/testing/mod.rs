//! In-memory doubles for the store traits and the chat model.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::ai::{AiError, ChatModel};
use crate::auth::TokenIssuer;
use crate::database::manager::DatabaseError;
use crate::database::models::{
    Comment, Forum, Id, Journal, NewComment, NewForum, NewJournal, NewTopic, NewUser, Topic, User,
};
use crate::database::repository::{
    non_empty, CommentStore, ForumStore, HealthProbe, JournalStore, TopicStore, UserStore,
};

pub const TEST_SECRET: &str = "zense-test-secret";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_PASSWORD_COST: u32 = 4;

pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, Duration::minutes(10)).expect("test issuer")
}

#[derive(Default)]
struct State {
    next_id: Id,
    users: BTreeMap<Id, User>,
    journals: BTreeMap<Id, Journal>,
    topics: BTreeMap<Id, Topic>,
    forums: BTreeMap<Id, Forum>,
    forum_topics: Vec<(Id, Id)>,
    comments: BTreeMap<Id, Comment>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn user_name(&self, id: Id) -> Option<String> {
        self.users.get(&id).map(|u| u.name.clone())
    }

    fn email_taken(&self, email: &str, except: Option<Id>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn forum_with_topics(&self, forum: &Forum) -> Forum {
        let mut forum = forum.clone();
        forum.user_name = self.user_name(forum.user_id);
        let mut topics: Vec<Topic> = self
            .forum_topics
            .iter()
            .filter(|(forum_id, _)| *forum_id == forum.id)
            .filter_map(|(_, topic_id)| self.topics.get(topic_id).cloned())
            .collect();
        topics.sort_by_key(|t| t.id);
        forum.topics = topics;
        forum
    }

    fn link(&mut self, forum_id: Id, topic_ids: &[Id]) {
        for &topic_id in topic_ids {
            if !self.forum_topics.contains(&(forum_id, topic_id)) {
                self.forum_topics.push((forum_id, topic_id));
            }
        }
    }
}

fn missing(what: &str, id: Id) -> DatabaseError {
    DatabaseError::not_found(format!("{} {} not found", what, id))
}

/// Implements every store trait over one mutex-guarded state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, skipping password hashing
    pub async fn seed_user(&self, name: &str, email: &str) -> Id {
        let user = UserStore::create(
            self,
            NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: "unused-hash".to_string(),
            },
        )
        .await
        .expect("seed user");
        user.id
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut state = self.state.lock().await;
        if state.email_taken(&user.email, None) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let state = self.state.lock().await;
        non_empty(state.users.values().cloned().collect(), "users")
    }

    async fn find_by_id(&self, id: Id) -> Result<User, DatabaseError> {
        let state = self.state.lock().await;
        state.users.get(&id).cloned().ok_or_else(|| missing("user", id))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        let state = self.state.lock().await;
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found("user not found"))
    }

    async fn update(&self, user: &User) -> Result<User, DatabaseError> {
        let mut state = self.state.lock().await;
        if state.email_taken(&user.email, Some(user.id)) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let stored = state.users.get_mut(&user.id).ok_or_else(|| missing("user", user.id))?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.password = user.password.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.users.remove(&id).map(|_| ()).ok_or_else(|| missing("user", id))
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn create(&self, journal: NewJournal) -> Result<Journal, DatabaseError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let journal = Journal {
            id: state.next_id(),
            user_id: journal.user_id,
            mood: journal.mood,
            content: journal.content,
            visibility: journal.visibility,
            created_at: now,
            updated_at: now,
            user_name: state.user_name(journal.user_id),
        };
        state.journals.insert(journal.id, journal.clone());
        Ok(journal)
    }

    async fn find_all(&self) -> Result<Vec<Journal>, DatabaseError> {
        let state = self.state.lock().await;
        non_empty(state.journals.values().cloned().collect(), "journals")
    }

    async fn find_by_id(&self, id: Id) -> Result<Journal, DatabaseError> {
        let state = self.state.lock().await;
        state.journals.get(&id).cloned().ok_or_else(|| missing("journal", id))
    }

    async fn update(&self, journal: &Journal) -> Result<Journal, DatabaseError> {
        let mut state = self.state.lock().await;
        let stored = state
            .journals
            .get_mut(&journal.id)
            .ok_or_else(|| missing("journal", journal.id))?;
        stored.mood = journal.mood;
        stored.content = journal.content.clone();
        stored.visibility = journal.visibility;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.journals.remove(&id).map(|_| ()).ok_or_else(|| missing("journal", id))
    }
}

#[async_trait]
impl TopicStore for MemoryStore {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let topic = Topic {
            id: state.next_id(),
            name: topic.name,
            description: topic.description,
            created_at: now,
            updated_at: now,
        };
        state.topics.insert(topic.id, topic.clone());
        Ok(topic)
    }

    async fn find_all(&self) -> Result<Vec<Topic>, DatabaseError> {
        let state = self.state.lock().await;
        non_empty(state.topics.values().cloned().collect(), "topics")
    }

    async fn find_by_id(&self, id: Id) -> Result<Topic, DatabaseError> {
        let state = self.state.lock().await;
        state.topics.get(&id).cloned().ok_or_else(|| missing("topic", id))
    }

    async fn update(&self, topic: &Topic) -> Result<Topic, DatabaseError> {
        let mut state = self.state.lock().await;
        let stored = state
            .topics
            .get_mut(&topic.id)
            .ok_or_else(|| missing("topic", topic.id))?;
        stored.name = topic.name.clone();
        stored.description = topic.description.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.topics.remove(&id).ok_or_else(|| missing("topic", id))?;
        state.forum_topics.retain(|(_, topic_id)| *topic_id != id);
        Ok(())
    }
}

#[async_trait]
impl ForumStore for MemoryStore {
    async fn create(&self, forum: NewForum, topic_ids: &[Id]) -> Result<Forum, DatabaseError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let forum = Forum {
            id: state.next_id(),
            user_id: forum.user_id,
            title: forum.title,
            content: forum.content,
            created_at: now,
            updated_at: now,
            user_name: None,
            topics: Vec::new(),
        };
        state.forums.insert(forum.id, forum.clone());
        state.link(forum.id, topic_ids);
        Ok(state.forum_with_topics(&forum))
    }

    async fn find_all(&self) -> Result<Vec<Forum>, DatabaseError> {
        let state = self.state.lock().await;
        let forums = state.forums.values().map(|f| state.forum_with_topics(f)).collect();
        non_empty(forums, "forums")
    }

    async fn find_by_id(&self, id: Id) -> Result<Forum, DatabaseError> {
        let state = self.state.lock().await;
        state
            .forums
            .get(&id)
            .map(|f| state.forum_with_topics(f))
            .ok_or_else(|| missing("forum", id))
    }

    async fn update(&self, forum: &Forum, topic_ids: Option<&[Id]>) -> Result<Forum, DatabaseError> {
        let mut state = self.state.lock().await;
        let stored = state
            .forums
            .get_mut(&forum.id)
            .ok_or_else(|| missing("forum", forum.id))?;
        stored.title = forum.title.clone();
        stored.content = forum.content.clone();
        stored.updated_at = Utc::now();
        let stored = stored.clone();

        if let Some(topic_ids) = topic_ids {
            state.forum_topics.retain(|(forum_id, _)| *forum_id != forum.id);
            state.link(forum.id, topic_ids);
        }
        Ok(state.forum_with_topics(&stored))
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.forums.remove(&id).ok_or_else(|| missing("forum", id))?;
        state.forum_topics.retain(|(forum_id, _)| *forum_id != id);
        state.comments.retain(|_, c| c.forum_id != id);
        Ok(())
    }

    async fn clear_topics(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.forum_topics.retain(|(forum_id, _)| *forum_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, DatabaseError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let comment = Comment {
            id: state.next_id(),
            user_id: comment.user_id,
            forum_id: comment.forum_id,
            content: comment.content,
            visibility: comment.visibility,
            created_at: now,
            updated_at: now,
            user_name: state.user_name(comment.user_id),
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_all(&self) -> Result<Vec<Comment>, DatabaseError> {
        let state = self.state.lock().await;
        non_empty(state.comments.values().cloned().collect(), "comments")
    }

    async fn find_by_id(&self, id: Id) -> Result<Comment, DatabaseError> {
        let state = self.state.lock().await;
        state.comments.get(&id).cloned().ok_or_else(|| missing("comment", id))
    }

    async fn update(&self, comment: &Comment) -> Result<Comment, DatabaseError> {
        let mut state = self.state.lock().await;
        let stored = state
            .comments
            .get_mut(&comment.id)
            .ok_or_else(|| missing("comment", comment.id))?;
        stored.content = comment.content.clone();
        stored.visibility = comment.visibility;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Id) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().await;
        state.comments.remove(&id).map(|_| ()).ok_or_else(|| missing("comment", id))
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Replays canned replies in order and records every prompt it receives
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying<const N: usize>(replies: [&str; N]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the upstream returned nothing
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.replies.lock().await.pop_front().ok_or(AiError::EmptyResponse)
    }
}
