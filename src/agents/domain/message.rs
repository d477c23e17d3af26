//! Chat message and session types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::ToolCall;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message (instructions to the LLM)
    System,
    /// User message
    User,
    /// Assistant (LLM) message
    Assistant,
    /// Tool result message
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A message in an LLM exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Message content (text)
    pub content: String,
    /// Tool calls made by the assistant (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// ID of the tool call this message is responding to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Create an assistant message with tool calls
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(tool_calls)
            },
            tool_call_id: None,
        }
    }

    /// Create a tool result message
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A persisted chat message, owned by the session store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Session this message belongs to
    pub session_id: String,
    /// User who owns the session
    pub user_id: String,
    /// Role of the message sender (user or assistant)
    pub role: Role,
    /// Message content
    pub content: String,
    /// Creation timestamp (Unix epoch milliseconds)
    pub timestamp: u64,
}

impl ChatMessage {
    /// Create a new chat message stamped with the current time
    pub fn new(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        role: Role,
        content: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            role,
            content: content.into(),
            timestamp: epoch_millis(),
        }
    }
}

/// An incoming chat request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    /// Session identifier; generated when absent
    #[serde(default)]
    pub session_id: Option<String>,
    /// User identifier
    #[serde(default = "default_user")]
    pub user_id: String,
    /// The user's message text
    pub message: String,
}

fn default_user() -> String {
    "anonymous".to_string()
}

/// Final outcome of one orchestrated request
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    /// The assistant message persisted for this request
    pub message: ChatMessage,
    /// Ordered interaction log, one entry per state transition
    pub interactions: Vec<super::AgentInteraction>,
}

/// A conversation session containing persisted chat history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Unique session identifier
    pub session_id: String,
    /// User who owns the session
    pub user_id: String,
    /// Message history
    pub messages: Vec<ChatMessage>,
    /// Arbitrary metadata attached to the session
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Session creation timestamp (Unix epoch milliseconds)
    pub created_at: u64,
    /// Last update timestamp (Unix epoch milliseconds)
    pub updated_at: u64,
}

impl ConversationSession {
    /// Create a new conversation session
    pub fn new(session_id: String, user_id: String) -> Self {
        let now = epoch_millis();
        Self {
            session_id,
            user_id,
            messages: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a message to the session
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = epoch_millis();
    }

    /// Get the number of messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

pub(crate) fn epoch_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
