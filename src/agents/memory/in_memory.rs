//! In-memory message store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::MessageStore;
use crate::agents::domain::{ChatMessage, ConversationSession};
use crate::agents::error::OrchestratorResult;

/// In-memory message store
pub struct InMemoryStore {
    sessions: Arc<RwLock<HashMap<String, ConversationSession>>>,
    max_messages_per_session: usize,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new(max_messages_per_session: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_messages_per_session,
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn append(&self, message: ChatMessage) -> OrchestratorResult<()> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .entry(message.session_id.clone())
            .or_insert_with(|| {
                ConversationSession::new(message.session_id.clone(), message.user_id.clone())
            });
        session.add_message(message);

        // Trim if exceeds max messages
        if session.messages.len() > self.max_messages_per_session {
            let remove_count = session.messages.len() - self.max_messages_per_session;
            session.messages.drain(0..remove_count);
        }

        Ok(())
    }

    async fn session(&self, session_id: &str) -> OrchestratorResult<Option<ConversationSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &str) -> OrchestratorResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::Role;

    #[tokio::test]
    async fn test_append_creates_session() {
        let store = InMemoryStore::new(100);
        store
            .append(ChatMessage::new("s1", "u1", Role::User, "hello"))
            .await
            .unwrap();

        let session = store.session("s1").await.unwrap().unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.message_count(), 1);
    }

    #[tokio::test]
    async fn test_history_is_oldest_first() {
        let store = InMemoryStore::new(100);
        store
            .append(ChatMessage::new("s1", "u1", Role::User, "first"))
            .await
            .unwrap();
        store
            .append(ChatMessage::new("s1", "u1", Role::Assistant, "second"))
            .await
            .unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "first");
        assert_eq!(history[1].content, "second");
    }

    #[tokio::test]
    async fn test_history_of_unknown_session_is_empty() {
        let store = InMemoryStore::new(100);
        assert!(store.history("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trims_to_max_messages() {
        let store = InMemoryStore::new(2);
        for i in 0..4 {
            store
                .append(ChatMessage::new("s1", "u1", Role::User, format!("m{i}")))
                .await
                .unwrap();
        }

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "m2");
        assert_eq!(history[1].content, "m3");
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let store = InMemoryStore::new(100);
        store
            .append(ChatMessage::new("s1", "u1", Role::User, "hello"))
            .await
            .unwrap();
        store.delete("s1").await.unwrap();
        assert!(store.session("s1").await.unwrap().is_none());
    }
}
