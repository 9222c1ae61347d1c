//! Proposal alert subscriptions
//!
//! One recurring poll task per subscribed chat, keyed by chat id so two chats
//! never share a timer. Activating a chat that already has a subscription
//! replaces the old task; deactivating aborts it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use icpulse_oc::{Message, OcClient};

use crate::services::DashboardApi;

const POLL_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Default)]
pub struct AlertRegistry {
    subs: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a poll task for a chat. Returns true if a previous
    /// subscription was replaced.
    pub fn activate(&self, chat: &str, task: JoinHandle<()>) -> bool {
        let mut subs = self.subs.lock().unwrap();
        let replaced = subs.remove(chat).map(|old| old.abort()).is_some();
        subs.insert(chat.to_string(), task);
        replaced
    }

    /// Abort and drop a chat's subscription. Returns false if none existed.
    pub fn deactivate(&self, chat: &str) -> bool {
        match self.subs.lock().unwrap().remove(chat) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, chat: &str) -> bool {
        self.subs.lock().unwrap().contains_key(chat)
    }
}

/// Poll loop for one chat: push a message whenever a proposal newer than the
/// last seen one appears. Delivery reuses the activation client; failures are
/// logged and the loop keeps going.
pub async fn poll_proposals(dashboard: DashboardApi, client: OcClient, chat: String) {
    let mut last_seen: Option<u64> = None;
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    // Skip the immediate first tick so activation itself stays quiet.
    ticker.tick().await;

    info!(chat = %chat, "proposal alerts activated");

    loop {
        ticker.tick().await;

        let proposals = match dashboard.recent_proposals(5).await {
            Ok(list) => list,
            Err(e) => {
                warn!(chat = %chat, error = %e, "proposal poll failed");
                continue;
            }
        };

        let newest = proposals
            .iter()
            .filter_map(|p| p.get("proposal_id").and_then(|v| v.as_u64()))
            .max();

        let Some(newest) = newest else { continue };

        if let Some(seen) = last_seen {
            for proposal in &proposals {
                let id = proposal.get("proposal_id").and_then(|v| v.as_u64());
                let Some(id) = id else { continue };
                if id <= seen {
                    continue;
                }
                let title = proposal
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or("(untitled)");
                let text = format!("\u{1F514} New NNS proposal {id}: {title}");
                if let Err(e) = client.send_message(&Message::text(text)).await {
                    warn!(chat = %chat, error = %e, "alert delivery failed");
                }
            }
        }

        last_seen = Some(newest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_task() -> JoinHandle<()> {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        })
    }

    #[tokio::test]
    async fn activate_is_per_chat() {
        let registry = AlertRegistry::new();
        registry.activate("chat-1", dummy_task());
        assert!(registry.is_active("chat-1"));
        assert!(!registry.is_active("chat-2"));
    }

    #[tokio::test]
    async fn reactivation_replaces_previous_handle() {
        let registry = AlertRegistry::new();
        assert!(!registry.activate("chat-1", dummy_task()));
        assert!(registry.activate("chat-1", dummy_task()));
        assert!(registry.is_active("chat-1"));
    }

    #[tokio::test]
    async fn deactivate_removes_subscription() {
        let registry = AlertRegistry::new();
        registry.activate("chat-1", dummy_task());
        assert!(registry.deactivate("chat-1"));
        assert!(!registry.deactivate("chat-1"));
        assert!(!registry.is_active("chat-1"));
    }
}
