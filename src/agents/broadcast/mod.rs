//! Activity broadcasting
//!
//! Every orchestration step is mirrored to subscribers of the request's
//! session as it happens. The broadcast is a side channel: dropped or slow
//! subscribers never affect the request, and the authoritative interaction
//! log is the list returned with the final message.

use async_trait::async_trait;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, RwLock};
use tracing::warn;

use crate::agents::domain::AgentInteraction;

/// Port trait for the activity side channel.
///
/// `publish` is fire-and-forget: failures are logged, never propagated.
#[async_trait]
pub trait ActivityBroadcaster: Send + Sync {
    /// Publish one interaction to the session's subscribers
    async fn publish(&self, session_id: &str, interaction: &AgentInteraction);
}

/// A subscriber's view of one session's activity stream
pub struct ActivityStream {
    receiver: mpsc::Receiver<AgentInteraction>,
}

impl ActivityStream {
    /// Receive the next interaction; `None` once the stream is closed
    pub async fn recv(&mut self) -> Option<AgentInteraction> {
        self.receiver.recv().await
    }
}

impl futures::Stream for ActivityStream {
    type Item = AgentInteraction;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

/// Per-session fan-out over bounded channels.
///
/// Ordering: the orchestrator awaits each publish before taking the next
/// step, and a session has one request in flight, so subscribers observe
/// events in emission order. A subscriber whose buffer is full misses the
/// event; one that went away is pruned on the next publish.
pub struct SessionBroadcaster {
    subscribers: Arc<RwLock<HashMap<String, Vec<mpsc::Sender<AgentInteraction>>>>>,
    buffer: usize,
}

impl SessionBroadcaster {
    /// Create a broadcaster whose subscriber channels hold `buffer` events
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            buffer,
        }
    }

    /// Subscribe to a session's activity stream
    pub async fn subscribe(&self, session_id: &str) -> ActivityStream {
        let (tx, rx) = mpsc::channel(self.buffer);
        let mut subscribers = self.subscribers.write().await;
        subscribers
            .entry(session_id.to_string())
            .or_default()
            .push(tx);
        ActivityStream { receiver: rx }
    }

    /// Number of live subscribers for a session
    pub async fn subscriber_count(&self, session_id: &str) -> usize {
        let subscribers = self.subscribers.read().await;
        subscribers.get(session_id).map_or(0, |s| s.len())
    }
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl ActivityBroadcaster for SessionBroadcaster {
    async fn publish(&self, session_id: &str, interaction: &AgentInteraction) {
        if session_id.is_empty() {
            warn!(
                agent = %interaction.agent_name,
                "skipping broadcast for empty session id"
            );
            return;
        }

        let mut subscribers = self.subscribers.write().await;
        let Some(senders) = subscribers.get_mut(session_id) else {
            return;
        };

        senders.retain(|tx| {
            if tx.is_closed() {
                return false;
            }
            // Full buffer means a slow subscriber; it misses this event
            let _ = tx.try_send(interaction.clone());
            true
        });

        if senders.is_empty() {
            subscribers.remove(session_id);
        }
    }
}
