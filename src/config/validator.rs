use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::agents::config::{AgentConfig, ChainRule, RoutingConfig, ToolConfig};
use crate::config::Settings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_agents(&settings.agents) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_tools(&settings.tools) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_routing(&settings.routing) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_cross_references(settings) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &crate::config::ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_agents(agents: &[AgentConfig]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_ids = HashMap::new();

        for (idx, agent) in agents.iter().enumerate() {
            if let Some(prev_idx) = seen_ids.insert(&agent.id, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Agent id '{}' appears at indices {} and {}",
                    agent.id, prev_idx, idx
                )));
            }

            if agent.id.is_empty() {
                errors.push(ValidationError::MissingField(format!("agents[{}].id", idx)));
            }

            if agent.system_prompt.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "agents[{}].system_prompt",
                    idx
                )));
            }

            if agent.domains.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("agents[{}].domains", idx),
                    reason: "Agent must declare at least one domain".to_string(),
                });
            }

            if agent.max_tool_rounds == 0 {
                errors.push(ValidationError::InvalidValue {
                    field: format!("agents[{}].max_tool_rounds", idx),
                    reason: "Tool round limit must be greater than 0".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_tools(tools: &[ToolConfig]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, tool) in tools.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&tool.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Tool name '{}' appears at indices {} and {}",
                    tool.name, prev_idx, idx
                )));
            }

            if tool.name.is_empty() {
                errors.push(ValidationError::MissingField(format!("tools[{}].name", idx)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_routing(routing: &RoutingConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (domain, keywords) in &routing.domains {
            if keywords.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("routing.domains.{}", domain),
                    reason: "Keyword set must not be empty".to_string(),
                });
            }
        }

        let known: HashSet<&String> = routing.domains.keys().collect();
        for (idx, rule) in routing.chains.iter().enumerate() {
            Self::validate_chain_rule(rule, idx, &known, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_chain_rule(
        rule: &ChainRule,
        idx: usize,
        known: &HashSet<&String>,
        errors: &mut Vec<ValidationError>,
    ) {
        if rule.pattern.is_empty() {
            errors.push(ValidationError::MissingField(format!(
                "routing.chains[{}].pattern",
                idx
            )));
        }

        if rule.keywords.is_empty() {
            errors.push(ValidationError::InvalidValue {
                field: format!("routing.chains[{}].keywords", idx),
                reason: "Chain rule must carry trigger vocabulary".to_string(),
            });
        }

        for domain in rule.domains.iter().chain(rule.pipeline.iter()) {
            if !known.contains(domain) {
                errors.push(ValidationError::CrossReference(format!(
                    "Chain rule '{}' references unknown domain '{}'",
                    rule.pattern, domain
                )));
            }
        }
    }

    fn validate_cross_references(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let tool_names: HashSet<&String> = settings.tools.iter().map(|t| &t.name).collect();

        for agent in &settings.agents {
            for tool in &agent.tools {
                if !tool_names.contains(tool) {
                    errors.push(ValidationError::CrossReference(format!(
                        "Agent '{}' references unknown tool '{}'",
                        agent.id, tool
                    )));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
