// src/transcript.rs — In-memory chat transcript
//
// Messages exist only for the life of the process and are wiped on logout
// so one user's conversation never carries over to the next.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

use crate::session::SessionListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Local wall-clock time for display, `HH:MM`.
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: now.with_timezone(&Local).format("%H:%M").to_string(),
            created_at: now,
        }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    messages: Mutex<Vec<ChatMessage>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_user(&self, text: impl Into<String>) -> ChatMessage {
        self.push(ChatMessage::new(Role::User, text))
    }

    pub fn push_model(&self, text: impl Into<String>) -> ChatMessage {
        self.push(ChatMessage::new(Role::Model, text))
    }

    fn push(&self, message: ChatMessage) -> ChatMessage {
        self.lock().push(message.clone());
        message
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl SessionListener for Transcript {
    fn reset(&self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_order_and_roles() {
        let t = Transcript::new();
        t.push_user("What is in my contract?");
        t.push_model("It renews yearly.");

        let msgs = t.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[1].role, Role::Model);
        assert_ne!(msgs[0].id, msgs[1].id);
        assert_eq!(msgs[0].timestamp.len(), 5);
    }

    #[test]
    fn test_reset_clears() {
        let t = Transcript::new();
        t.push_user("hi");
        SessionListener::reset(&t);
        assert!(t.is_empty());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), r#""model""#);
    }
}
