//! Agent descriptor types

use serde::{Deserialize, Serialize};

/// Agent information returned from list/get operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Unique agent id
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Human-readable description
    pub description: String,
    /// Domain tags used by the router
    pub domains: Vec<String>,
    /// Tools this agent may call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    /// LLM provider being used
    pub llm_provider: String,
    /// LLM model being used
    pub llm_model: String,
}
