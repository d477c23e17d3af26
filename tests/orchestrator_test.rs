mod common;

use std::sync::Arc;

use common::{
    agent_config, harness, text_response, tool_call_response, FailingProvider, ScriptedProvider,
};
use conductor::agents::domain::{ChatRequest, InteractionStatus, Role};
use conductor::agents::memory::MessageStore;
use serde_json::json;

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        session_id: Some("test-session".to_string()),
        user_id: "tester".to_string(),
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_unmatched_request_falls_back_to_direct_response() {
    let orchestrator_llm = ScriptedProvider::new(&["It is sunny in Wellington today."]);
    let h = harness(
        vec![(
            agent_config("adx", &["data"]),
            ScriptedProvider::new(&[]) as Arc<dyn conductor::agents::llm::LlmProvider>,
        )],
        orchestrator_llm,
    );

    let outcome = h
        .orchestrator
        .handle(request("what's the weather today?"))
        .await
        .unwrap();

    assert_eq!(outcome.message.content, "It is sunny in Wellington today.");
    assert_eq!(outcome.interactions.len(), 2);
    assert_eq!(outcome.interactions[0].agent_name, "router");
    assert_eq!(outcome.interactions[1].agent_name, "orchestrator");
    assert!(outcome
        .interactions
        .iter()
        .all(|i| i.status == InteractionStatus::Success));
}

#[tokio::test]
async fn test_single_agent_output_passes_through() {
    let adx = ScriptedProvider::new(&["Frank Turner lives at 12 Harbour St."]);
    // Orchestrator LLM must not be consulted on the single-agent path
    let h = harness(
        vec![(agent_config("adx", &["data"]), adx)],
        Arc::new(FailingProvider),
    );

    let outcome = h
        .orchestrator
        .handle(request("find Frank Turner's address"))
        .await
        .unwrap();

    assert_eq!(outcome.message.content, "Frank Turner lives at 12 Harbour St.");
    assert_eq!(outcome.interactions.len(), 2);
    assert_eq!(outcome.interactions[1].agent_name, "adx");
}

#[tokio::test]
async fn test_chained_workflow_feeds_prior_output_forward() {
    let adx = ScriptedProvider::new(&["Frank Turner lives at 12 Harbour St."]);
    let maps = ScriptedProvider::new(&["16 minutes via Waterloo Quay."]);
    let maps_probe = maps.clone();
    let orchestrator_llm =
        ScriptedProvider::new(&["Drive to 12 Harbour St; about 16 minutes via Waterloo Quay."]);

    let h = harness(
        vec![
            (agent_config("adx", &["data"]), adx),
            (agent_config("maps", &["maps"]), maps),
        ],
        orchestrator_llm,
    );

    let outcome = h
        .orchestrator
        .handle(request("give me directions to Frank Turner's house"))
        .await
        .unwrap();

    // Routing, data agent, maps agent, synthesis
    assert_eq!(outcome.interactions.len(), 4);
    let names: Vec<&str> = outcome
        .interactions
        .iter()
        .map(|i| i.agent_name.as_str())
        .collect();
    assert_eq!(names, vec!["router", "adx", "maps", "orchestrator"]);

    // The second agent's prompt carries the first agent's raw output
    let maps_prompts = maps_probe.user_contents();
    assert_eq!(maps_prompts.len(), 1);
    assert!(maps_prompts[0]
        .contains("An earlier step found: Frank Turner lives at 12 Harbour St."));

    assert_eq!(
        outcome.message.content,
        "Drive to 12 Harbour St; about 16 minutes via Waterloo Quay."
    );
}

#[tokio::test]
async fn test_independent_agents_are_synthesized() {
    let adx = ScriptedProvider::new(&["Database usage is 42 GB."]);
    let resources = ScriptedProvider::new(&["The storage account holds 3 containers."]);
    let orchestrator_llm = ScriptedProvider::new(&["42 GB across 3 containers."]);

    let h = harness(
        vec![
            (agent_config("adx", &["data"]), adx),
            (agent_config("resources", &["resources"]), resources),
        ],
        orchestrator_llm,
    );

    let outcome = h
        .orchestrator
        .handle(request("query the database for our storage account usage"))
        .await
        .unwrap();

    assert_eq!(outcome.interactions.len(), 4);
    assert_eq!(outcome.message.content, "42 GB across 3 containers.");
    // No chain vocabulary, so no chained pattern in the routing summary
    let routing = &outcome.interactions[0];
    assert!(routing.result.as_deref().unwrap().contains("matched agents"));
}

#[tokio::test]
async fn test_tool_failure_marks_interaction_error_but_request_completes() {
    // The model calls the lookup tool without its required argument; the
    // registry rejects the call and the model answers anyway
    let adx = ScriptedProvider::from_responses(vec![
        tool_call_response("customer_lookup", json!({})),
        text_response("I could not look that up."),
    ]);
    let mut config = agent_config("adx", &["data"]);
    config.tools = vec!["customer_lookup".to_string()];

    let h = harness(
        vec![(
            config,
            adx as Arc<dyn conductor::agents::llm::LlmProvider>,
        )],
        Arc::new(FailingProvider),
    );

    let outcome = h
        .orchestrator
        .handle(request("find Frank Turner's address"))
        .await
        .unwrap();

    // The request still completes with the agent's answer
    assert_eq!(outcome.message.content, "I could not look that up.");

    // But the agent's step is flagged with a non-empty error message
    let adx_step = &outcome.interactions[1];
    assert_eq!(adx_step.agent_name, "adx");
    assert_eq!(adx_step.status, InteractionStatus::Error);
    assert!(adx_step
        .result
        .as_deref()
        .unwrap_or_default()
        .contains("customer_lookup"));
}

#[tokio::test]
async fn test_failed_agent_degrades_to_placeholder_contribution() {
    let resources = ScriptedProvider::new(&["The storage account holds 3 containers."]);
    let orchestrator_llm = ScriptedProvider::new(&["3 containers; database data unavailable."]);

    let h = harness(
        vec![
            (agent_config("adx", &["data"]), Arc::new(FailingProvider)),
            (agent_config("resources", &["resources"]), resources),
        ],
        orchestrator_llm,
    );

    let outcome = h
        .orchestrator
        .handle(request("query the database for our storage account usage"))
        .await
        .unwrap();

    // The request still completes with a non-error final answer
    assert_eq!(
        outcome.message.content,
        "3 containers; database data unavailable."
    );

    let adx = &outcome.interactions[1];
    assert_eq!(adx.agent_name, "adx");
    assert_eq!(adx.status, InteractionStatus::Error);
    assert!(!adx.result.as_deref().unwrap_or_default().is_empty());

    // Synthesis still ran over both contributions
    assert_eq!(outcome.interactions.len(), 4);
    assert_eq!(outcome.interactions[3].status, InteractionStatus::Success);
}

#[tokio::test]
async fn test_synthesis_failure_persists_an_apology() {
    let adx = ScriptedProvider::new(&["Database usage is 42 GB."]);
    let resources = ScriptedProvider::new(&["The storage account holds 3 containers."]);

    let h = harness(
        vec![
            (agent_config("adx", &["data"]), adx),
            (agent_config("resources", &["resources"]), resources),
        ],
        Arc::new(FailingProvider),
    );

    let outcome = h
        .orchestrator
        .handle(request("query the database for our storage account usage"))
        .await
        .unwrap();

    assert!(outcome.message.content.contains("sorry"));
    let synthesis = outcome.interactions.last().unwrap();
    assert_eq!(synthesis.status, InteractionStatus::Error);

    // The apology is persisted as the assistant message
    let history = h.store.history("test-session").await.unwrap();
    let assistant = history.iter().find(|m| m.role == Role::Assistant).unwrap();
    assert_eq!(assistant.content, outcome.message.content);
}

#[tokio::test]
async fn test_broadcast_matches_returned_interactions_in_order() {
    let adx = ScriptedProvider::new(&["Frank Turner lives at 12 Harbour St."]);
    let maps = ScriptedProvider::new(&["16 minutes via Waterloo Quay."]);
    let orchestrator_llm = ScriptedProvider::new(&["Drive to 12 Harbour St."]);

    let h = harness(
        vec![
            (agent_config("adx", &["data"]), adx),
            (agent_config("maps", &["maps"]), maps),
        ],
        orchestrator_llm,
    );

    let mut events = h.broadcaster.subscribe("test-session").await;

    let outcome = h
        .orchestrator
        .handle(request("give me directions to Frank Turner's house"))
        .await
        .unwrap();

    for expected in &outcome.interactions {
        let event = events.recv().await.unwrap();
        assert_eq!(event.agent_name, expected.agent_name);
        assert_eq!(event.action, expected.action);
        assert_eq!(event.status, expected.status);
        assert_eq!(event.result, expected.result);
        assert_eq!(event.timestamp, expected.timestamp);
    }
}

#[tokio::test]
async fn test_conversation_is_persisted() {
    let adx = ScriptedProvider::new(&["Frank Turner lives at 12 Harbour St."]);
    let h = harness(
        vec![(agent_config("adx", &["data"]), adx)],
        Arc::new(FailingProvider),
    );

    h.orchestrator
        .handle(request("find Frank Turner's address"))
        .await
        .unwrap();

    let history = h.store.history("test-session").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "find Frank Turner's address");
    assert_eq!(history[1].role, Role::Assistant);
}

#[tokio::test]
async fn test_session_id_is_generated_when_absent() {
    let adx = ScriptedProvider::new(&["Frank Turner lives at 12 Harbour St."]);
    let h = harness(
        vec![(agent_config("adx", &["data"]), adx)],
        Arc::new(FailingProvider),
    );

    let outcome = h
        .orchestrator
        .handle(ChatRequest {
            session_id: None,
            user_id: "tester".to_string(),
            message: "find Frank Turner's address".to_string(),
        })
        .await
        .unwrap();

    assert!(!outcome.message.session_id.is_empty());
}
