//! Domain types for the orchestration core
//!
//! Core abstractions shared across the router, agents, orchestrator, and
//! the activity broadcaster.

mod agent;
mod interaction;
mod message;
mod tool_call;

pub use agent::*;
pub use interaction::*;
pub use message::*;
pub use tool_call::*;

use async_trait::async_trait;
use serde_json::Value;

/// Port trait for the tool registry collaborator.
///
/// The orchestrator and agents depend on this boundary but never implement
/// tool internals; argument maps are schema-validated at this boundary.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// List the registered tool descriptors
    async fn list_tools(&self) -> Vec<ToolDescriptor>;

    /// Execute a tool by name with a JSON argument map
    async fn execute_tool(&self, name: &str, args: Value) -> crate::agents::error::ToolOpResult<ToolExecution>;
}
