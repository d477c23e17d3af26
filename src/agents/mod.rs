//! Multi-agent orchestration core
//!
//! Routing, domain agents, the orchestration state machine, and the
//! collaborator ports they depend on (LLM providers, tool registry,
//! message store, activity broadcaster).

pub mod broadcast;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod llm;
pub mod memory;
pub mod orchestrator;
pub mod routing;
pub mod tools;
