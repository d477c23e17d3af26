//! # Conductor - Multi-Agent Chat Orchestration
//!
//! Conductor is an HTTP chat service that routes each user request to the
//! specialized agents whose domain it matches, runs them as a single-agent,
//! chained, or independent multi-agent workflow, and synthesizes their
//! findings into one answer. Every orchestration step is mirrored to a
//! per-session activity stream so clients can watch the work as it happens.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conductor::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let settings = Settings::new()?;
//!
//!     // Server will start on configured host:port
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Conductor follows Hexagonal Architecture:
//! - **Domain**: Core types shared across the orchestration state machine
//! - **Agents**: Router, domain agents, orchestrator, and collaborator ports
//! - **Adapters**: HTTP handlers for the chat API and health checks
//! - **Config**: Configuration management

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::agents::broadcast::SessionBroadcaster;
use crate::agents::core::DomainAgent;
use crate::agents::llm::create_provider;
use crate::agents::memory::InMemoryStore;
use crate::agents::orchestrator::Orchestrator;
use crate::agents::routing::KeywordRouter;
use crate::agents::tools::StaticToolRegistry;
use crate::config::Settings;

/// Wire the orchestration core from loaded settings.
///
/// Creates one completion provider per agent plus the orchestrator's own,
/// so provider construction fails fast on missing API keys.
pub fn build_state(settings: &Settings) -> anyhow::Result<ApiState> {
    let tools = Arc::new(StaticToolRegistry::new(settings.tools.clone()));

    let mut agents = Vec::with_capacity(settings.agents.len());
    for config in &settings.agents {
        let llm = create_provider(&config.llm)?;
        agents.push(Arc::new(DomainAgent::new(
            config.clone(),
            llm,
            tools.clone(),
        )));
    }

    let router = Arc::new(KeywordRouter::new(&settings.routing, &settings.agents));
    let orchestrator_llm = create_provider(&settings.orchestrator.llm)?;
    let store = Arc::new(InMemoryStore::new(settings.max_messages_per_session));
    let broadcaster = Arc::new(SessionBroadcaster::default());

    let orchestrator = Arc::new(Orchestrator::new(
        agents,
        router,
        orchestrator_llm,
        store.clone(),
        broadcaster.clone(),
        settings.orchestrator.clone(),
    ));

    Ok(ApiState {
        orchestrator,
        store,
        broadcaster,
    })
}

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(state: ApiState, health_handler: Arc<HealthHandler>) -> Router {
    let public_router = Router::new()
        .route(
            "/health",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.health().await }
                }
            }),
        )
        .route(
            "/health/ready",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.ready().await }
                }
            }),
        )
        .route(
            "/health/live",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.live().await }
                }
            }),
        );

    let api_router = Router::new()
        .route("/chat", post(api_handler::chat))
        .route("/agents", get(api_handler::list_agents))
        .route("/sessions/:id", get(api_handler::get_session))
        .route("/sessions/:id/events", get(api_handler::session_events))
        .with_state(state);

    let router = public_router.nest("/api", api_router);

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
