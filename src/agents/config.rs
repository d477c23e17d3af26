//! Configuration types for agents, routing, and the orchestrator

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for one domain agent.
///
/// Loaded from static configuration at startup and immutable afterwards;
/// this is the agent's descriptor as far as the router and orchestrator
/// are concerned.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Unique agent id (e.g. "adx", "maps")
    pub id: String,
    /// Human-readable display name
    #[serde(default)]
    pub display_name: String,
    /// Human-readable description
    pub description: String,
    /// Domain tags the router matches against (e.g. ["data"])
    pub domains: Vec<String>,
    /// Tools this agent may call (names from the tool registry)
    #[serde(default)]
    pub tools: Vec<String>,
    /// System prompt describing the agent's domain and allowed tools
    pub system_prompt: String,
    /// LLM provider configuration
    pub llm: LlmProviderConfig,
    /// Maximum tool-call rounds inside one invocation
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,
    /// Temperature override (if not set, uses LLM config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Max tokens override (if not set, uses LLM config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_max_tool_rounds() -> u32 {
    5
}

/// LLM provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmProviderConfig {
    /// Provider type
    pub provider: LlmProviderType,
    /// Model name (or Azure deployment name)
    pub model: String,
    /// Environment variable containing the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Custom base URL (required for Azure, optional otherwise)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default temperature for completions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Default max tokens for completions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// OpenAI (GPT-4o, GPT-4, etc.)
    #[default]
    OpenAI,
    /// Azure OpenAI
    #[serde(alias = "azure")]
    AzureOpenAI,
}

impl std::fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderType::OpenAI => write!(f, "openai"),
            LlmProviderType::AzureOpenAI => write!(f, "azure"),
        }
    }
}

/// Configuration for one registered tool.
///
/// Tools are static definitions: a name, a description, a JSON Schema for
/// the argument map, and a canned response. Real backends live outside this
/// service; the registry validates arguments and answers from the static
/// response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Tool name, unique within the registry
    pub name: String,
    /// Human-readable description, surfaced to the LLM
    pub description: String,
    /// JSON Schema for the argument map
    #[serde(default = "default_input_schema")]
    pub input_schema: serde_json::Value,
    /// Canned response returned on execution
    #[serde(default)]
    pub static_response: Option<serde_json::Value>,
}

fn default_input_schema() -> serde_json::Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// Routing configuration: per-domain keyword sets plus the chained-workflow
/// rule table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Domain id -> keyword set, matched case-insensitively as substrings
    #[serde(default = "default_domains")]
    pub domains: HashMap<String, Vec<String>>,
    /// Chained-workflow rules, checked in order before independent execution
    #[serde(default = "default_chain_rules")]
    pub chains: Vec<ChainRule>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            chains: default_chain_rules(),
        }
    }
}

/// One chained-workflow rule: when the matched domain set equals `domains`
/// and any of `keywords` appears in the message, the router emits the
/// pipeline as an ordered agent sequence tagged with `pattern`.
///
/// New chained workflows are additions to this table, not edits to the
/// orchestrator's control flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainRule {
    /// Workflow pattern tag (e.g. "lookup-then-route")
    pub pattern: String,
    /// Exact matched-domain set that triggers this rule
    pub domains: Vec<String>,
    /// Additional vocabulary, any of which must appear in the message
    pub keywords: Vec<String>,
    /// Ordered domain pipeline to execute
    pub pipeline: Vec<String>,
}

fn default_domains() -> HashMap<String, Vec<String>> {
    let mut domains = HashMap::new();
    domains.insert(
        "data".to_string(),
        [
            "find", "lookup", "search", "record", "customer", "database",
            "query", "table", "address", "phone", "email", "house",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    domains.insert(
        "maps".to_string(),
        [
            "directions", "route", "map", "navigate", "distance", "nearby",
            "geocode",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    domains.insert(
        "documents".to_string(),
        [
            "document", "file", "pdf", "report", "attachment", "upload",
            "names in",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    domains.insert(
        "resources".to_string(),
        [
            "subscription", "resource group", "deployment", "tenant",
            "virtual machine", "storage account",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    domains
}

fn default_chain_rules() -> Vec<ChainRule> {
    vec![
        ChainRule {
            pattern: "lookup-then-route".to_string(),
            domains: vec!["data".to_string(), "maps".to_string()],
            keywords: vec![
                "directions".to_string(),
                "route".to_string(),
                "navigate".to_string(),
            ],
            pipeline: vec!["data".to_string(), "maps".to_string()],
        },
        ChainRule {
            pattern: "extract-then-cross-reference".to_string(),
            domains: vec!["documents".to_string(), "data".to_string()],
            keywords: vec![
                "cross-reference".to_string(),
                "cross reference".to_string(),
                "check against".to_string(),
                "compare".to_string(),
            ],
            pipeline: vec!["documents".to_string(), "data".to_string()],
        },
    ]
}

/// Orchestrator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestratorConfig {
    /// LLM used for direct responses and synthesis
    #[serde(default)]
    pub llm: LlmProviderConfig,
    /// Delay between sequential agent invocations in the independent
    /// multi-agent path, for observability of the activity stream
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// System prompt for the direct-response path
    #[serde(default = "default_direct_prompt")]
    pub direct_system_prompt: String,
    /// System prompt for the synthesis step
    #[serde(default = "default_synthesis_prompt")]
    pub synthesis_system_prompt: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            llm: LlmProviderConfig::default(),
            step_delay_ms: default_step_delay_ms(),
            direct_system_prompt: default_direct_prompt(),
            synthesis_system_prompt: default_synthesis_prompt(),
        }
    }
}

fn default_step_delay_ms() -> u64 {
    150
}

fn default_direct_prompt() -> String {
    "You are a helpful assistant. Answer the user's question directly using \
     the conversation history."
        .to_string()
}

fn default_synthesis_prompt() -> String {
    "You are the final answer composer. Given results gathered by \
     specialized agents, produce one coherent answer to the user's original \
     question. Do not mention the agents."
        .to_string()
}
