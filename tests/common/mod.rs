//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use conductor::agents::broadcast::SessionBroadcaster;
use conductor::agents::config::{
    AgentConfig, LlmProviderConfig, LlmProviderType, OrchestratorConfig, RoutingConfig,
};
use conductor::agents::config::ToolConfig;
use conductor::agents::core::DomainAgent;
use conductor::agents::domain::{Message, ToolCall};
use conductor::agents::error::{LlmError, LlmResult};
use conductor::agents::llm::{CompletionRequest, CompletionResponse, FinishReason, LlmProvider};
use conductor::agents::memory::InMemoryStore;
use conductor::agents::orchestrator::Orchestrator;
use conductor::agents::routing::KeywordRouter;
use conductor::agents::tools::StaticToolRegistry;

/// Provider that replays a fixed script and records every request it sees
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(texts: &[&str]) -> Arc<Self> {
        Self::from_responses(texts.iter().map(|t| text_response(t)).collect())
    }

    pub fn from_responses(responses: Vec<CompletionResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// The user-role contents of every recorded request, in call order
    pub fn user_contents(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .flat_map(|r| {
                r.messages
                    .iter()
                    .filter(|m| matches!(m.role, conductor::agents::domain::Role::User))
                    .map(|m| m.content.clone())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::InvalidRequest("script exhausted".to_string()))
    }
}

/// Provider whose every call fails
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> LlmResult<CompletionResponse> {
        Err(LlmError::Api {
            status: 500,
            message: "provider unavailable".to_string(),
        })
    }
}

pub fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        finish_reason: FinishReason::Stop,
    }
}

pub fn tool_call_response(name: &str, arguments: serde_json::Value) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant_with_tools("", vec![ToolCall::new("call_1", name, arguments)]),
        finish_reason: FinishReason::ToolCalls,
    }
}

pub fn agent_config(id: &str, domains: &[&str]) -> AgentConfig {
    AgentConfig {
        id: id.to_string(),
        display_name: id.to_string(),
        description: format!("{} agent", id),
        domains: domains.iter().map(|d| d.to_string()).collect(),
        tools: Vec::new(),
        system_prompt: format!("You are the {} agent.", id),
        llm: LlmProviderConfig {
            provider: LlmProviderType::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
        },
        max_tool_rounds: 5,
        temperature: None,
        max_tokens: None,
    }
}

pub struct TestHarness {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<InMemoryStore>,
    pub broadcaster: Arc<SessionBroadcaster>,
}

/// Wire an orchestrator over the default routing table with zero step delay.
/// The registry holds a single customer lookup tool so scripted agents can
/// exercise the tool loop.
pub fn harness(
    agent_providers: Vec<(AgentConfig, Arc<dyn LlmProvider>)>,
    orchestrator_llm: Arc<dyn LlmProvider>,
) -> TestHarness {
    let tools = Arc::new(StaticToolRegistry::new(vec![ToolConfig {
        name: "customer_lookup".to_string(),
        description: "Look up a customer record".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        }),
        static_response: Some(serde_json::json!({ "address": "12 Harbour St" })),
    }]));
    let configs: Vec<AgentConfig> = agent_providers.iter().map(|(c, _)| c.clone()).collect();

    let agents = agent_providers
        .into_iter()
        .map(|(config, llm)| Arc::new(DomainAgent::new(config, llm, tools.clone())))
        .collect();

    let router = Arc::new(KeywordRouter::new(&RoutingConfig::default(), &configs));
    let store = Arc::new(InMemoryStore::new(100));
    let broadcaster = Arc::new(SessionBroadcaster::default());

    let config = OrchestratorConfig {
        step_delay_ms: 0,
        ..Default::default()
    };

    let orchestrator = Arc::new(Orchestrator::new(
        agents,
        router,
        orchestrator_llm,
        store.clone(),
        broadcaster.clone(),
        config,
    ));

    TestHarness {
        orchestrator,
        store,
        broadcaster,
    }
}
