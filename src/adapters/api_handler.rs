//! REST and SSE handlers for the chat API

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::agents::broadcast::SessionBroadcaster;
use crate::agents::domain::{AgentInfo, ChatOutcome, ChatRequest, ConversationSession};
use crate::agents::error::OrchestratorError;
use crate::agents::memory::MessageStore;
use crate::agents::orchestrator::Orchestrator;

/// Shared state for the API routes
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<dyn MessageStore>,
    pub broadcaster: Arc<SessionBroadcaster>,
}

type ApiError = (StatusCode, Json<Value>);

fn internal_error(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

/// POST /api/chat - run one orchestrated request
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>, ApiError> {
    if request.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "message must not be empty" })),
        ));
    }

    match state.orchestrator.handle(request).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(OrchestratorError::AgentNotFound(id)) => {
            Err(not_found(format!("agent '{}' is not registered", id)))
        }
        Err(e) => {
            error!(error = %e, "chat request failed");
            Err(internal_error(e.to_string()))
        }
    }
}

/// GET /api/agents - list registered agent descriptors
pub async fn list_agents(State(state): State<ApiState>) -> Json<Vec<AgentInfo>> {
    Json(state.orchestrator.agent_infos())
}

/// GET /api/sessions/:id - conversation history for one session
pub async fn get_session(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<ConversationSession>, ApiError> {
    match state.store.session(&session_id).await {
        Ok(Some(session)) => Ok(Json(session)),
        Ok(None) => Err(not_found(format!("session '{}' not found", session_id))),
        Err(e) => {
            error!(session = %session_id, error = %e, "session lookup failed");
            Err(internal_error(e.to_string()))
        }
    }
}

/// GET /api/sessions/:id/events - SSE stream of activity events
pub async fn session_events(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let activity = state.broadcaster.subscribe(&session_id).await;

    let stream = activity.map(|interaction| {
        let event = Event::default()
            .json_data(&interaction)
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to serialize interaction event");
                Event::default().data("{}")
            });
        Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
