use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ConversationContext, Message};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, Session>,
}

/// One client conversation: its accumulated context and transcript.
///
/// Lives only for the lifetime of the process; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub context: ConversationContext,
    pub messages: Vec<Message>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty application state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
        }
    }
}
