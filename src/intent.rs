//! Outbound navigation intents

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Message sent to whoever owns the pagination state.
///
/// Serializes as `{"action":"pagination","page":N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    Pagination { page: i64 },
}

impl Intent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fire-and-forget destination for intents. No reply is awaited.
pub trait IntentSink {
    fn push_intent(&self, intent: Intent);
}

impl IntentSink for mpsc::UnboundedSender<Intent> {
    fn push_intent(&self, intent: Intent) {
        if self.send(intent).is_err() {
            tracing::warn!("Intent receiver closed, dropping {:?}", intent);
        }
    }
}
