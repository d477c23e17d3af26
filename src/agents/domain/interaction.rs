//! Activity log entries emitted at every orchestration step boundary

use serde::{Deserialize, Serialize};

/// Status of one orchestration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    /// Step has been entered
    Starting,
    /// Step is underway
    InProgress,
    /// Step finished normally
    Success,
    /// Step failed; the orchestrator decides whether this is fatal
    Error,
}

impl std::fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionStatus::Starting => write!(f, "starting"),
            InteractionStatus::InProgress => write!(f, "in_progress"),
            InteractionStatus::Success => write!(f, "success"),
            InteractionStatus::Error => write!(f, "error"),
        }
    }
}

/// One immutable record of an orchestration step.
///
/// Appended to the per-request interaction list and mirrored to the
/// activity broadcaster; never mutated after creation. The broadcast is a
/// side channel: every published interaction also appears in the list
/// returned to the caller, in the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInteraction {
    /// Name of the agent (or orchestrator step) that produced this entry
    pub agent_name: String,
    /// Human-readable description of the action taken
    pub action: String,
    /// Step status
    pub status: InteractionStatus,
    /// Result text, when the step produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Wall-clock duration of the step in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Creation timestamp (Unix epoch milliseconds)
    pub timestamp: u64,
}

impl AgentInteraction {
    /// Create a success-status interaction
    pub fn success(
        agent_name: impl Into<String>,
        action: impl Into<String>,
        result: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            action: action.into(),
            status: InteractionStatus::Success,
            result: Some(result.into()),
            duration_ms: Some(duration_ms),
            timestamp: super::message::epoch_millis(),
        }
    }

    /// Create an error-status interaction
    pub fn error(
        agent_name: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            action: action.into(),
            status: InteractionStatus::Error,
            result: Some(message.into()),
            duration_ms: Some(duration_ms),
            timestamp: super::message::epoch_millis(),
        }
    }
}
