//! Per-channel AI session cache.
//!
//! Each channel talks to the bot through its own [`LlmSession`], so the
//! provider keeps one conversation context per channel. The cache creates a
//! session lazily on the first bot-bound message in a channel and hands the
//! same session back on later calls until it is evicted.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use gemchat_domain::ChatTurn;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Shared handle to a cached session.
pub type SessionHandle = Arc<dyn LlmSession>;

/// Channel id to session map.
///
/// The map lock is held while a missing session is created, so concurrent
/// first calls for one channel always end up with the same handle.
pub struct SessionCache {
    gateway: Arc<dyn LlmGateway>,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionCache {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the session for `channel_id`, creating it from `seed` if absent.
    ///
    /// `seed` is ignored when a session already exists.
    pub async fn get_or_create(
        &self,
        channel_id: &str,
        seed: &[ChatTurn],
    ) -> Result<SessionHandle, GatewayError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(handle) = sessions.get(channel_id) {
            return Ok(Arc::clone(handle));
        }

        let session = self.gateway.create_session(channel_id, seed).await?;
        let handle: SessionHandle = Arc::from(session);
        info!(
            channel = channel_id,
            session = handle.id(),
            model = handle.model(),
            seed_turns = seed.len(),
            "Created bot session"
        );
        sessions.insert(channel_id.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Drop the session for `channel_id`. Returns whether one existed.
    pub async fn evict(&self, channel_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(channel_id).is_some();
        if removed {
            debug!(channel = channel_id, "Evicted bot session");
        }
        removed
    }

    /// Drop the session for `channel_id` only if it is still `handle`.
    ///
    /// A replacement created after `handle` failed is left alone.
    pub async fn evict_if_same(&self, channel_id: &str, handle: &SessionHandle) -> bool {
        let mut sessions = self.sessions.lock().await;
        let same = sessions
            .get(channel_id)
            .is_some_and(|current| same_session(current, handle));
        if same {
            sessions.remove(channel_id);
            debug!(channel = channel_id, session = handle.id(), "Evicted bot session");
        }
        same
    }

    pub async fn contains(&self, channel_id: &str) -> bool {
        self.sessions.lock().await.contains_key(channel_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Drop every session.
    pub async fn clear(&self) {
        let mut sessions = self.sessions.lock().await;
        if !sessions.is_empty() {
            debug!(count = sessions.len(), "Clearing bot sessions");
        }
        sessions.clear();
    }
}

// Compares data pointers only; vtable pointers of the same type may differ
// between codegen units.
fn same_session(a: &SessionHandle, b: &SessionHandle) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
