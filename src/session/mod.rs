use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One chat message. Immutable once appended; the only way messages go
/// away is a whole-session reset via `start_new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: u64,
}

/// The active conversation. Sessions are in-memory only and superseded
/// rather than closed; starting a new one discards the previous
/// transcript.
#[derive(Debug, Clone)]
pub struct ChatSession {
    session_id: String,
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn start_new(&mut self) -> &str {
        self.session_id = Uuid::new_v4().to_string();
        self.messages.clear();
        &self.session_id
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// Never fails. Timestamps are epoch millis, clamped so the
    /// sequence stays non-decreasing even if the wall clock steps back.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        let floor = self.messages.last().map(|m| m.timestamp).unwrap_or(0);
        self.messages.push(Message {
            role,
            content: content.into(),
            timestamp: Self::now_millis().max(floor),
        });
    }

    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    fn now_millis() -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_millis() as u64,
            Err(_) => 0,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
