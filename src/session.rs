//! Conversation session state
//!
//! Holds the ordered turn history, the conversation topic, and the running
//! count of user turns for the single process-wide conversation.

#[cfg(test)]
mod proptests;

use serde::Serialize;
use tokio::sync::Mutex;

/// Number of most recent turns forwarded to the model per request
pub const CONTEXT_WINDOW: usize = 4;

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub language: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            language: language.into(),
        }
    }
}

/// Read-only view of the session used for prompt decisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub topic: Option<String>,
    pub user_turn_count: usize,
}

/// Append-only conversation history.
///
/// `topic` is `None` until the first user turn arrives and is never
/// overwritten afterwards. `user_turn_count` always equals the number of
/// user turns in `history`.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<Turn>,
    topic: Option<String>,
    user_turn_count: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. The caller guarantees `text` is non-empty.
    pub fn append_turn(&mut self, role: Role, text: impl Into<String>, language: impl Into<String>) {
        let turn = Turn::new(role, text, language);
        if turn.role == Role::User {
            if self.topic.is_none() {
                self.topic = Some(turn.text.clone());
            }
            self.user_turn_count += 1;
        }
        self.history.push(turn);
    }

    /// The last `n` turns in conversation order (fewer if history is shorter)
    pub fn recent_window(&self, n: usize) -> &[Turn] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            topic: self.topic.clone(),
            user_turn_count: self.user_turn_count,
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}

/// Shared handle to the session.
///
/// Every mutation happens under the lock so the history, topic and counter
/// never disagree, even when requests arrive concurrently.
#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Session::new()),
        }
    }

    /// Append a user turn and return the context window and snapshot taken
    /// right after it, as one atomic step.
    pub async fn record_user_turn(
        &self,
        text: &str,
        language: &str,
    ) -> (Vec<Turn>, SessionSnapshot) {
        let mut session = self.inner.lock().await;
        session.append_turn(Role::User, text, language);
        let window = session.recent_window(CONTEXT_WINDOW).to_vec();
        (window, session.snapshot())
    }

    pub async fn append_turn(&self, role: Role, text: &str, language: &str) {
        self.inner.lock().await.append_turn(role, text, language);
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn history(&self) -> Vec<Turn> {
        self.inner.lock().await.history().to_vec()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
