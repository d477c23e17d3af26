//! Conversation persistence
//!
//! The orchestrator depends on a [`MessageStore`] port: it appends the user
//! and assistant messages of each request and reads history for context.
//! The in-memory backend is the default and loses state on restart.

mod in_memory;

pub use in_memory::InMemoryStore;

use async_trait::async_trait;

use crate::agents::domain::{ChatMessage, ConversationSession};
use crate::agents::error::OrchestratorResult;

/// Trait for conversation storage backends
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message, creating the session when it does not exist
    async fn append(&self, message: ChatMessage) -> OrchestratorResult<()>;

    /// Load a session by id
    async fn session(&self, session_id: &str) -> OrchestratorResult<Option<ConversationSession>>;

    /// Message history for a session, oldest first; empty when the session
    /// does not exist
    async fn history(&self, session_id: &str) -> OrchestratorResult<Vec<ChatMessage>> {
        Ok(self
            .session(session_id)
            .await?
            .map(|s| s.messages)
            .unwrap_or_default())
    }

    /// Delete a session
    async fn delete(&self, session_id: &str) -> OrchestratorResult<()>;
}
