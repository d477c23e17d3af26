//! Request routing
//!
//! Maps free-text user input to the set of relevant agents. The keyword
//! implementation is deliberately isolated behind the [`Router`] trait so
//! it can be swapped for an embedding- or LLM-based classifier without
//! touching the orchestrator's state machine.

mod keyword;

pub use keyword::KeywordRouter;

/// A routing decision: the ordered agents to invoke plus an optional
/// workflow-pattern tag when a chained pipeline was recognized.
///
/// Transient and derived; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Ordered agent ids to invoke
    pub agents: Vec<String>,
    /// Workflow pattern tag (e.g. "lookup-then-route"), when a chain rule
    /// matched
    pub pattern: Option<String>,
}

impl RoutingDecision {
    /// A decision matching no agents; the orchestrator falls back to a
    /// direct response
    pub fn empty() -> Self {
        Self {
            agents: Vec::new(),
            pattern: None,
        }
    }

    /// Whether no agents matched
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Trait for request classifiers.
///
/// Implementations must be pure functions of the message text and the
/// registered domains: deciding twice on the same input yields the same
/// decision.
pub trait Router: Send + Sync {
    /// Classify a raw user message into a routing decision
    fn decide(&self, message: &str) -> RoutingDecision;
}
