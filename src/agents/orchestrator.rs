//! Orchestrator
//!
//! Drives one chat request through the routing state machine:
//!
//! ```text
//! Routing -> { SingleAgent | ChainedWorkflow | IndependentMultiAgent
//!            | DirectResponse } -> Synthesizing -> Done
//! ```
//!
//! Exactly one [`AgentInteraction`] is recorded per state transition. Each
//! recorded interaction is also published to the activity broadcaster
//! before the next step runs, so subscribers observe the same list, in the
//! same order, as the caller receives.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::agents::broadcast::ActivityBroadcaster;
use crate::agents::config::OrchestratorConfig;
use crate::agents::core::DomainAgent;
use crate::agents::domain::{
    AgentInfo, AgentInteraction, ChatMessage, ChatOutcome, ChatRequest, Message, Role,
};
use crate::agents::error::{OrchestratorError, OrchestratorResult};
use crate::agents::llm::{CompletionRequest, LlmProvider};
use crate::agents::memory::MessageStore;
use crate::agents::routing::{Router, RoutingDecision};

/// Name used for orchestrator-level interactions
const ORCHESTRATOR: &str = "orchestrator";
/// Name used for the routing interaction
const ROUTER: &str = "router";
/// Assistant message persisted when synthesis or the direct response fails
const APOLOGY: &str =
    "I'm sorry, something went wrong while composing the answer. Please try again.";

/// Execution plan derived from a routing decision
enum WorkflowPlan {
    DirectResponse,
    SingleAgent(Arc<DomainAgent>),
    ChainedWorkflow(Vec<Arc<DomainAgent>>, String),
    IndependentMultiAgent(Vec<Arc<DomainAgent>>),
}

/// Records interactions and mirrors each one to the broadcaster.
///
/// Publishing is awaited before the entry is appended, which keeps the
/// broadcast order identical to the returned list.
struct InteractionLog<'a> {
    session_id: &'a str,
    broadcaster: &'a dyn ActivityBroadcaster,
    entries: Vec<AgentInteraction>,
}

impl<'a> InteractionLog<'a> {
    fn new(session_id: &'a str, broadcaster: &'a dyn ActivityBroadcaster) -> Self {
        Self {
            session_id,
            broadcaster,
            entries: Vec::new(),
        }
    }

    async fn record(&mut self, interaction: AgentInteraction) {
        self.broadcaster
            .publish(self.session_id, &interaction)
            .await;
        self.entries.push(interaction);
    }
}

/// The orchestration core: owns the registered agents and the injected
/// collaborator ports.
pub struct Orchestrator {
    agents: Vec<Arc<DomainAgent>>,
    router: Arc<dyn Router>,
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn MessageStore>,
    broadcaster: Arc<dyn ActivityBroadcaster>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator over registered agents and collaborators
    pub fn new(
        agents: Vec<Arc<DomainAgent>>,
        router: Arc<dyn Router>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn MessageStore>,
        broadcaster: Arc<dyn ActivityBroadcaster>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            agents,
            router,
            llm,
            store,
            broadcaster,
            config,
        }
    }

    /// Descriptors of the registered agents, in registration order
    pub fn agent_infos(&self) -> Vec<AgentInfo> {
        self.agents.iter().map(|a| a.info()).collect()
    }

    /// Run one chat request through the state machine.
    ///
    /// Always returns an outcome unless a collaborator port fails outside
    /// the recoverable taxonomy: agent failures degrade to placeholder
    /// contributions, and a synthesis failure degrades to a generic
    /// apology. The interaction list has one entry per transition taken.
    pub async fn handle(&self, request: ChatRequest) -> OrchestratorResult<ChatOutcome> {
        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.store
            .append(ChatMessage::new(
                &session_id,
                &request.user_id,
                Role::User,
                &request.message,
            ))
            .await?;

        let mut log = InteractionLog::new(&session_id, self.broadcaster.as_ref());

        // Routing
        let routing_started = Instant::now();
        let decision = self.router.decide(&request.message);
        info!(
            session = %session_id,
            agents = ?decision.agents,
            pattern = ?decision.pattern,
            "routing decision"
        );
        log.record(AgentInteraction::success(
            ROUTER,
            "route request",
            describe_decision(&decision),
            routing_started.elapsed().as_millis() as u64,
        ))
        .await;

        let plan = self.plan(&decision)?;

        let final_answer = match plan {
            WorkflowPlan::DirectResponse => {
                self.direct_response(&session_id, &request.message, &mut log)
                    .await
            }
            WorkflowPlan::SingleAgent(agent) => {
                let contributions = self
                    .run_agents(&[agent], &request.message, false, &mut log)
                    .await;
                self.synthesize(&request.message, contributions, &mut log)
                    .await
            }
            WorkflowPlan::ChainedWorkflow(agents, pattern) => {
                info!(session = %session_id, pattern = %pattern, "running chained workflow");
                let contributions = self
                    .run_agents(&agents, &request.message, true, &mut log)
                    .await;
                self.synthesize(&request.message, contributions, &mut log)
                    .await
            }
            WorkflowPlan::IndependentMultiAgent(agents) => {
                let contributions = self
                    .run_agents(&agents, &request.message, false, &mut log)
                    .await;
                self.synthesize(&request.message, contributions, &mut log)
                    .await
            }
        };

        let assistant = ChatMessage::new(&session_id, &request.user_id, Role::Assistant, final_answer);
        self.store.append(assistant.clone()).await?;

        Ok(ChatOutcome {
            message: assistant,
            interactions: log.entries,
        })
    }

    /// Resolve a routing decision into an execution plan
    fn plan(&self, decision: &RoutingDecision) -> OrchestratorResult<WorkflowPlan> {
        if decision.is_empty() {
            return Ok(WorkflowPlan::DirectResponse);
        }

        let agents = decision
            .agents
            .iter()
            .map(|id| {
                self.agents
                    .iter()
                    .find(|a| a.config().id == *id)
                    .cloned()
                    .ok_or_else(|| OrchestratorError::AgentNotFound(id.clone()))
            })
            .collect::<OrchestratorResult<Vec<_>>>()?;

        Ok(match (&decision.pattern, agents.len()) {
            (Some(pattern), _) => WorkflowPlan::ChainedWorkflow(agents, pattern.clone()),
            (None, 1) => WorkflowPlan::SingleAgent(agents.into_iter().next().ok_or_else(
                || OrchestratorError::Internal("empty single-agent plan".to_string()),
            )?),
            (None, _) => WorkflowPlan::IndependentMultiAgent(agents),
        })
    }

    /// Invoke agents in order, recording one interaction each.
    ///
    /// In chained mode each agent receives the previous agent's full output
    /// as prior context. In independent mode each agent gets the task
    /// rephrased with its domain prefix and runs without context, separated
    /// by the configured delay so the activity stream is observable step by
    /// step. A failed invocation degrades to a placeholder contribution;
    /// a turn that answered despite tool failures keeps its answer as the
    /// contribution but is recorded with error status.
    async fn run_agents(
        &self,
        agents: &[Arc<DomainAgent>],
        task: &str,
        chained: bool,
        log: &mut InteractionLog<'_>,
    ) -> Vec<(String, String)> {
        let mut contributions: Vec<(String, String)> = Vec::new();
        let mut prior: Option<String> = None;
        let independent = !chained && agents.len() > 1;

        for (index, agent) in agents.iter().enumerate() {
            if independent && index > 0 && self.config.step_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.step_delay_ms)).await;
            }

            let id = agent.config().id.clone();
            let context = if chained { prior.as_deref() } else { None };
            let agent_task = if independent {
                format!(
                    "As the {} specialist, answer: {}",
                    agent.config().domains.join(", "),
                    task
                )
            } else {
                task.to_string()
            };
            let started = Instant::now();

            match agent.invoke(&agent_task, context).await {
                Ok(turn) if turn.tool_errors.is_empty() => {
                    log.record(AgentInteraction::success(
                        &id,
                        "invoke agent",
                        turn.content.clone(),
                        started.elapsed().as_millis() as u64,
                    ))
                    .await;
                    prior = Some(turn.content.clone());
                    contributions.push((id, turn.content));
                }
                Ok(turn) => {
                    warn!(
                        agent = %id,
                        errors = ?turn.tool_errors,
                        "agent answered despite tool failures"
                    );
                    log.record(AgentInteraction::error(
                        &id,
                        "invoke agent",
                        format!("tool call failed: {}", turn.tool_errors.join("; ")),
                        started.elapsed().as_millis() as u64,
                    ))
                    .await;
                    prior = Some(turn.content.clone());
                    contributions.push((id, turn.content));
                }
                Err(e) => {
                    error!(agent = %id, error = %e, "agent invocation failed");
                    log.record(AgentInteraction::error(
                        &id,
                        "invoke agent",
                        e.to_string(),
                        started.elapsed().as_millis() as u64,
                    ))
                    .await;
                    prior = None;
                    contributions.push((id.clone(), format!("Agent '{id}' returned no result")));
                }
            }
        }

        contributions
    }

    /// Compose the final answer from agent contributions.
    ///
    /// A single contribution passes through unchanged; two or more go
    /// through a synthesis completion. A synthesis failure is fatal for the
    /// request and degrades to a generic apology.
    async fn synthesize(
        &self,
        question: &str,
        contributions: Vec<(String, String)>,
        log: &mut InteractionLog<'_>,
    ) -> String {
        if contributions.len() < 2 {
            return contributions
                .into_iter()
                .next()
                .map(|(_, output)| output)
                .unwrap_or_default();
        }

        let started = Instant::now();
        let findings = contributions
            .iter()
            .map(|(id, output)| format!("[{id}] {output}"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let request = CompletionRequest {
            messages: vec![
                Message::system(&self.config.synthesis_system_prompt),
                Message::user(format!(
                    "Original question: {question}\n\nAgent findings:\n{findings}"
                )),
            ],
            ..Default::default()
        };

        match self.llm.complete(request).await {
            Ok(response) => {
                log.record(AgentInteraction::success(
                    ORCHESTRATOR,
                    "synthesize final answer",
                    response.message.content.clone(),
                    started.elapsed().as_millis() as u64,
                ))
                .await;
                response.message.content
            }
            Err(e) => {
                error!(error = %e, "synthesis failed");
                log.record(AgentInteraction::error(
                    ORCHESTRATOR,
                    "synthesize final answer",
                    e.to_string(),
                    started.elapsed().as_millis() as u64,
                ))
                .await;
                APOLOGY.to_string()
            }
        }
    }

    /// Answer without agents, using the session history for context
    async fn direct_response(
        &self,
        session_id: &str,
        question: &str,
        log: &mut InteractionLog<'_>,
    ) -> String {
        let started = Instant::now();

        let history = match self.store.history(session_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(session = %session_id, error = %e, "history unavailable for direct response");
                Vec::new()
            }
        };

        let mut messages = vec![Message::system(&self.config.direct_system_prompt)];
        messages.extend(history.iter().filter_map(|m| match m.role {
            Role::User => Some(Message::user(&m.content)),
            Role::Assistant => Some(Message::assistant(&m.content)),
            _ => None,
        }));
        if history.is_empty() {
            messages.push(Message::user(question));
        }

        let request = CompletionRequest {
            messages,
            ..Default::default()
        };

        match self.llm.complete(request).await {
            Ok(response) => {
                log.record(AgentInteraction::success(
                    ORCHESTRATOR,
                    "respond directly",
                    response.message.content.clone(),
                    started.elapsed().as_millis() as u64,
                ))
                .await;
                response.message.content
            }
            Err(e) => {
                error!(session = %session_id, error = %e, "direct response failed");
                log.record(AgentInteraction::error(
                    ORCHESTRATOR,
                    "respond directly",
                    e.to_string(),
                    started.elapsed().as_millis() as u64,
                ))
                .await;
                APOLOGY.to_string()
            }
        }
    }
}

/// Human-readable summary of a routing decision for the activity log
fn describe_decision(decision: &RoutingDecision) -> String {
    if decision.is_empty() {
        return "no agents matched; responding directly".to_string();
    }
    match &decision.pattern {
        Some(pattern) => format!(
            "chained workflow '{}': {}",
            pattern,
            decision.agents.join(" -> ")
        ),
        None => format!("matched agents: {}", decision.agents.join(", ")),
    }
}
