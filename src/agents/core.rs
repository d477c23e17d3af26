//! Domain agent implementation
//!
//! A domain agent is a thin wrapper around a completion provider plus the
//! subset of registered tools its configuration names. Invocation is a
//! single exchange with a bounded tool-call loop and no retries.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::agents::config::AgentConfig;
use crate::agents::domain::{AgentInfo, Message, ToolDescriptor, ToolRegistry};
use crate::agents::error::{AgentError, AgentResult};
use crate::agents::llm::{CompletionRequest, LlmProvider};

/// A domain-scoped agent
pub struct DomainAgent {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    tools: Arc<dyn ToolRegistry>,
}

/// Outcome of one agent invocation
#[derive(Debug, Clone)]
pub struct AgentTurn {
    /// The agent's final answer text
    pub content: String,
    /// Descriptions of tool calls that failed during the turn, in call
    /// order; empty when every tool call succeeded
    pub tool_errors: Vec<String>,
}

impl DomainAgent {
    /// Create a new domain agent
    pub fn new(config: AgentConfig, llm: Arc<dyn LlmProvider>, tools: Arc<dyn ToolRegistry>) -> Self {
        Self { config, llm, tools }
    }

    /// The agent's static configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Descriptor surfaced by the agents listing endpoint
    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            id: self.config.id.clone(),
            display_name: self.config.display_name.clone(),
            description: self.config.description.clone(),
            domains: self.config.domains.clone(),
            tools: self.config.tools.clone(),
            llm_provider: self.config.llm.provider.to_string(),
            llm_model: self.config.llm.model.clone(),
        }
    }

    /// Registered tool descriptors filtered to this agent's allowed names
    async fn tool_definitions(&self) -> Vec<ToolDescriptor> {
        self.tools
            .list_tools()
            .await
            .into_iter()
            .filter(|t| self.config.tools.iter().any(|name| name == &t.name))
            .collect()
    }

    /// Run one invocation: a task, optional context from an earlier
    /// workflow step, and a bounded tool-call loop.
    ///
    /// A failed tool call does not abort the invocation: the error is fed
    /// back to the model as the tool result of the same turn, and the
    /// failure is reported on the returned [`AgentTurn`] so the caller can
    /// flag the step. Only completion failures abort.
    pub async fn invoke(&self, task: &str, prior_context: Option<&str>) -> AgentResult<AgentTurn> {
        let started = Instant::now();

        let user_content = match prior_context {
            Some(context) => format!("An earlier step found: {context}\n\n{task}"),
            None => task.to_string(),
        };

        let mut messages = vec![
            Message::system(&self.config.system_prompt),
            Message::user(user_content),
        ];

        let tools = self.tool_definitions().await;
        let mut tool_errors: Vec<String> = Vec::new();

        for round in 0..self.config.max_tool_rounds {
            let request = CompletionRequest {
                messages: messages.clone(),
                model: Some(self.config.llm.model.clone()),
                temperature: self.config.temperature.or(self.config.llm.temperature),
                max_tokens: self.config.max_tokens.or(self.config.llm.max_tokens),
                tools: if tools.is_empty() {
                    None
                } else {
                    Some(tools.clone())
                },
            };

            let response = self.llm.complete(request).await?;
            let tool_calls = response.message.tool_calls.clone().unwrap_or_default();

            if tool_calls.is_empty() {
                debug!(
                    agent = %self.config.id,
                    rounds = round,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "agent invocation complete"
                );
                return Ok(AgentTurn {
                    content: response.message.content,
                    tool_errors,
                });
            }

            messages.push(response.message);

            for tool_call in &tool_calls {
                let result = self
                    .tools
                    .execute_tool(&tool_call.name, tool_call.arguments.clone())
                    .await;

                let content = match result {
                    Ok(execution) if execution.is_error => {
                        let description = execution
                            .content
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| execution.content.to_string());
                        warn!(
                            agent = %self.config.id,
                            tool = %tool_call.name,
                            error = %description,
                            "tool reported an error, surfacing it to the model"
                        );
                        tool_errors.push(format!("{}: {description}", tool_call.name));
                        format!("Error: {description}")
                    }
                    Ok(execution) => execution.content.to_string(),
                    Err(e) => {
                        warn!(
                            agent = %self.config.id,
                            tool = %tool_call.name,
                            error = %e,
                            "tool call failed, surfacing error to the model"
                        );
                        tool_errors.push(format!("{}: {e}", tool_call.name));
                        format!("Error: {e}")
                    }
                };

                messages.push(Message::tool_result(&tool_call.id, content));
            }
        }

        Err(AgentError::Execution(format!(
            "agent '{}' exceeded {} tool rounds without a final answer",
            self.config.id, self.config.max_tool_rounds
        )))
    }
}
