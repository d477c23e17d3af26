//! Keyword-based router implementation

use std::collections::BTreeSet;

use super::{Router, RoutingDecision};
use crate::agents::config::{AgentConfig, ChainRule, RoutingConfig};

/// Router that classifies requests by case-insensitive keyword matching
/// against per-domain keyword sets.
///
/// A request may match zero, one, or several domains. Chained workflows
/// are recognized from a declarative rule table: when the matched domain
/// set equals a rule's trigger set and the message carries the rule's
/// vocabulary, the rule's pipeline is emitted in order. The heuristics can
/// mis-trigger on unrelated text containing the same keywords; callers
/// wanting better precision swap this implementation behind [`Router`].
pub struct KeywordRouter {
    /// Domain id + lowercased keywords, in a stable order
    domains: Vec<(String, Vec<String>)>,
    /// Chain rules, checked in table order
    chains: Vec<ChainRule>,
    /// Registered agents as (id, domain tags), in registration order
    agents: Vec<(String, Vec<String>)>,
}

impl KeywordRouter {
    /// Build a router from the routing configuration and the registered
    /// agent descriptors
    pub fn new(config: &RoutingConfig, agents: &[AgentConfig]) -> Self {
        let mut domains: Vec<(String, Vec<String>)> = config
            .domains
            .iter()
            .map(|(domain, keywords)| {
                (
                    domain.clone(),
                    keywords.iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        domains.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            domains,
            chains: config.chains.clone(),
            agents: agents
                .iter()
                .map(|a| (a.id.clone(), a.domains.clone()))
                .collect(),
        }
    }

    /// Domains whose keyword set intersects the message
    fn matched_domains(&self, message: &str) -> BTreeSet<String> {
        self.domains
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| message.contains(k.as_str())))
            .map(|(domain, _)| domain.clone())
            .collect()
    }

    /// First registered agent tagged with the given domain
    fn agent_for_domain(&self, domain: &str) -> Option<String> {
        self.agents
            .iter()
            .find(|(_, tags)| tags.iter().any(|t| t == domain))
            .map(|(id, _)| id.clone())
    }

    /// Agents whose domain tags intersect the matched set, in registration
    /// order
    fn agents_for_domains(&self, matched: &BTreeSet<String>) -> Vec<String> {
        self.agents
            .iter()
            .filter(|(_, tags)| tags.iter().any(|t| matched.contains(t)))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Router for KeywordRouter {
    fn decide(&self, message: &str) -> RoutingDecision {
        let lowered = message.to_lowercase();
        let matched = self.matched_domains(&lowered);

        if matched.is_empty() {
            return RoutingDecision::empty();
        }

        // Chain rules fire only on an exact matched-set + vocabulary hit
        for rule in &self.chains {
            let trigger: BTreeSet<String> = rule.domains.iter().cloned().collect();
            if matched == trigger
                && rule
                    .keywords
                    .iter()
                    .any(|k| lowered.contains(k.to_lowercase().as_str()))
            {
                let pipeline: Vec<String> = rule
                    .pipeline
                    .iter()
                    .filter_map(|domain| self.agent_for_domain(domain))
                    .collect();

                if pipeline.len() == rule.pipeline.len() {
                    return RoutingDecision {
                        agents: pipeline,
                        pattern: Some(rule.pattern.clone()),
                    };
                }
            }
        }

        RoutingDecision {
            agents: self.agents_for_domains(&matched),
            pattern: None,
        }
    }
}
