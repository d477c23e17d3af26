//! Tool registry
//!
//! Agents never execute tool internals; they hand a name and a JSON
//! argument map to the registry and get a result back. Arguments are
//! validated against the tool's input schema at this boundary, so a
//! malformed call from the model is rejected before anything runs.

use serde_json::{json, Value};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::agents::config::ToolConfig;
use crate::agents::domain::{ToolDescriptor, ToolExecution, ToolRegistry};
use crate::agents::error::{ToolError, ToolOpResult};

/// Registry of statically configured tools.
///
/// The tool set is fixed at startup, so no interior locking is needed.
pub struct StaticToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl StaticToolRegistry {
    /// Build a registry from tool configurations
    pub fn new(config: Vec<ToolConfig>) -> Self {
        let mut tools = HashMap::new();
        for tool in config {
            tools.insert(tool.name.clone(), tool);
        }
        Self { tools }
    }

    /// Whether a tool with the given name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

#[async_trait]
impl ToolRegistry for StaticToolRegistry {
    async fn list_tools(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .tools
            .values()
            .map(|t| ToolDescriptor::new(&t.name, &t.description, t.input_schema.clone()))
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    async fn execute_tool(&self, name: &str, args: Value) -> ToolOpResult<ToolExecution> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        validate_args(&tool.input_schema, &args).map_err(|message| {
            ToolError::InvalidArguments {
                tool: name.to_string(),
                message,
            }
        })?;

        match &tool.static_response {
            Some(response) => Ok(ToolExecution::ok(response.clone())),
            None => Ok(ToolExecution::ok(
                json!({ "status": "executed", "tool": name }),
            )),
        }
    }
}

/// Validate a JSON argument map against a tool's input schema.
///
/// Covers the contract agents rely on: the argument value must be an
/// object, every `required` field must be present, and declared property
/// types must hold for the fields that are present. Nested schemas are not
/// descended into.
fn validate_args(schema: &Value, args: &Value) -> Result<(), String> {
    let obj = args
        .as_object()
        .ok_or_else(|| "arguments must be a JSON object".to_string())?;

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !obj.contains_key(field) {
                return Err(format!("missing required field '{}'", field));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (field, value) in obj {
            let Some(expected) = properties
                .get(field)
                .and_then(|p| p.get("type"))
                .and_then(Value::as_str)
            else {
                continue;
            };

            let matches = match expected {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.is_i64() || value.is_u64(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };

            if !matches {
                return Err(format!(
                    "field '{}' must be of type {}",
                    field, expected
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_tool() -> ToolConfig {
        ToolConfig {
            name: "customer_lookup".to_string(),
            description: "Look up a customer record by name".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "limit": { "type": "integer" }
                },
                "required": ["name"]
            }),
            static_response: Some(json!({
                "name": "Frank Turner",
                "address": "12 Harbour St"
            })),
        }
    }

    fn registry() -> StaticToolRegistry {
        StaticToolRegistry::new(vec![lookup_tool()])
    }

    #[tokio::test]
    async fn test_execute_returns_static_response() {
        let result = registry()
            .execute_tool("customer_lookup", json!({ "name": "Frank Turner" }))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content["address"], "12 Harbour St");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected() {
        let err = registry()
            .execute_tool("no_such_tool", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected() {
        let err = registry()
            .execute_tool("customer_lookup", json!({ "limit": 3 }))
            .await
            .unwrap_err();
        match err {
            ToolError::InvalidArguments { message, .. } => {
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_type_is_rejected() {
        let err = registry()
            .execute_tool(
                "customer_lookup",
                json!({ "name": "Frank Turner", "limit": "three" }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_non_object_arguments_are_rejected() {
        let err = registry()
            .execute_tool("customer_lookup", json!("Frank Turner"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_list_tools_is_sorted_by_name() {
        let mut other = lookup_tool();
        other.name = "address_geocode".to_string();
        let registry = StaticToolRegistry::new(vec![lookup_tool(), other]);

        let names: Vec<String> = registry
            .list_tools()
            .await
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["address_geocode", "customer_lookup"]);
    }
}
