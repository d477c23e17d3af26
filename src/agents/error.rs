//! Error types for the orchestration core

use thiserror::Error;

/// Errors raised while driving one orchestration request
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Agent not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An agent's completion call failed
    #[error("Agent '{agent}' invocation failed: {message}")]
    AgentInvocation { agent: String, message: String },

    /// The final synthesis call failed; fatal for the request
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// Persistence error
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised inside a single agent invocation
#[derive(Debug, Error)]
pub enum AgentError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Tool execution error
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Execution error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Errors raised at the tool registry boundary
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not registered
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Argument map rejected by the tool's input schema
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    /// The tool itself failed
    #[error("Tool '{tool}' failed: {message}")]
    Failed { tool: String, message: String },
}

/// Errors specific to LLM provider operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::Network(format!("Connection error: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

/// Result type alias for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Result type alias for tool operations
pub type ToolOpResult<T> = Result<T, ToolError>;
