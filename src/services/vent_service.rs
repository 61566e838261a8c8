//! AI "venting" chat over in-memory, per-session transcripts.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::ai::ChatModel;
use crate::api::vent::{VentRequest, VentResponse};
use crate::database::models::Id;

use super::ServiceResult;

/// One transcript per user and optional client-chosen session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub user_id: Id,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    User(String),
    Ai(String),
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::User(text) => write!(f, "User: {}", text),
            Turn::Ai(text) => write!(f, "AI: {}", text),
        }
    }
}

pub type Transcript = Vec<Turn>;

/// Sessions a single user may hold before the least recently used idle one is dropped
pub const DEFAULT_SESSIONS_PER_USER: usize = 16;

struct Session {
    transcript: Arc<Mutex<Transcript>>,
    last_used: AtomicU64,
}

impl Session {
    fn new(tick: u64) -> Self {
        Self {
            transcript: Arc::default(),
            last_used: AtomicU64::new(tick),
        }
    }

    /// Nobody outside the map holds the transcript handle
    fn is_idle(&self) -> bool {
        Arc::strong_count(&self.transcript) == 1
    }
}

/// Process-local transcripts; lost on restart
pub struct ConversationStore {
    sessions: RwLock<HashMap<ConversationKey, Session>>,
    clock: AtomicU64,
    sessions_per_user: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_session_limit(DEFAULT_SESSIONS_PER_USER)
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_limit(sessions_per_user: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            sessions_per_user: sessions_per_user.max(1),
        }
    }

    /// Fetch the session's transcript handle, creating an empty one on first use
    pub async fn session(&self, key: ConversationKey) -> Arc<Mutex<Transcript>> {
        let tick = self.clock.fetch_add(1, Ordering::Relaxed);
        if let Some(existing) = self.sessions.read().await.get(&key) {
            existing.last_used.store(tick, Ordering::Relaxed);
            return existing.transcript.clone();
        }

        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&key) {
            self.make_room(&mut sessions, key.user_id);
        }
        let session = sessions.entry(key).or_insert_with(|| Session::new(tick));
        session.last_used.store(tick, Ordering::Relaxed);
        session.transcript.clone()
    }

    /// Evict the user's least recently used idle session once the limit is reached
    fn make_room(&self, sessions: &mut HashMap<ConversationKey, Session>, user_id: Id) {
        let owned = sessions.keys().filter(|key| key.user_id == user_id).count();
        if owned < self.sessions_per_user {
            return;
        }

        let oldest = sessions
            .iter()
            .filter(|(key, session)| key.user_id == user_id && session.is_idle())
            .min_by_key(|(_, session)| session.last_used.load(Ordering::Relaxed))
            .map(|(key, _)| *key);

        if let Some(key) = oldest {
            tracing::debug!("Evicting vent session {:?} of user {}", key.session_id, user_id);
            sessions.remove(&key);
        }
    }

    /// Remove a session that holds no turns and that no request is using
    async fn release_if_empty(&self, key: ConversationKey) {
        let mut sessions = self.sessions.write().await;
        let unused = match sessions.get(&key) {
            Some(session) if session.is_idle() => match session.transcript.try_lock() {
                Ok(transcript) => transcript.is_empty(),
                Err(_) => false,
            },
            _ => false,
        };
        if unused {
            sessions.remove(&key);
        }
    }

    pub async fn clear(&self, key: ConversationKey) {
        self.sessions.write().await.remove(&key);
    }

    /// Drop every session belonging to `user_id`
    pub async fn clear_user(&self, user_id: Id) {
        self.sessions.write().await.retain(|key, _| key.user_id != user_id);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub async fn snapshot(&self, key: ConversationKey) -> Transcript {
        let session = self.sessions.read().await.get(&key).map(|s| s.transcript.clone());
        match session {
            Some(session) => session.lock().await.clone(),
            None => Vec::new(),
        }
    }
}

fn build_prompt(transcript: &[Turn], message: &str) -> String {
    let conversation = transcript
        .iter()
        .map(Turn::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Kamu adalah teman yang dipercaya. Tanggapi pesan berikut dengan empati, gunakan Bahasa Indonesia.\n\
         Berikut adalah percakapan sejauh ini:\n\
         {}\n\
         Pesan terbaru adalah: '{}'.\n\
         Tolong berikan jawaban yang singkat.",
        conversation, message
    )
}

pub struct VentService {
    model: Arc<dyn ChatModel>,
    conversations: Arc<ConversationStore>,
}

impl VentService {
    pub fn new(model: Arc<dyn ChatModel>, conversations: Arc<ConversationStore>) -> Self {
        Self { model, conversations }
    }

    pub async fn chat(&self, caller: Id, req: VentRequest) -> ServiceResult<VentResponse> {
        let key = ConversationKey {
            user_id: caller,
            session_id: req.session_id,
        };
        let session = self.conversations.session(key).await;

        // Held across the model call so turns in one session stay ordered
        let mut transcript = session.lock().await;
        transcript.push(Turn::User(req.message.clone()));
        let prompt = build_prompt(&transcript, &req.message);

        match self.model.generate(&prompt).await {
            Ok(reply) => {
                transcript.push(Turn::Ai(reply.clone()));
                Ok(VentResponse {
                    message: reply,
                    session_id: req.session_id,
                })
            }
            Err(e) => {
                transcript.pop();
                let empty = transcript.is_empty();
                drop(transcript);
                drop(session);
                if empty {
                    self.conversations.release_if_empty(key).await;
                }
                tracing::warn!("Vent reply failed for user {}: {}", caller, e);
                Err(e.into())
            }
        }
    }

    /// Reset one session, or every session of the caller when none is named
    pub async fn clear(&self, caller: Id, session_id: Option<Uuid>) {
        match session_id {
            Some(session_id) => {
                self.conversations
                    .clear(ConversationKey {
                        user_id: caller,
                        session_id: Some(session_id),
                    })
                    .await
            }
            None => self.conversations.clear_user(caller).await,
        }
    }
}
