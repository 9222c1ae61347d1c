//! Bot gateway client
//!
//! Pushes finalised messages to the bot API gateway named in the command JWT.
//! The JWT itself travels with the action; the gateway verifies it, we do not.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error};

use crate::jwt::CommandClaims;
use crate::message::Message;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to deliver message: {0}")]
    Send(String),

    #[error("Gateway rejected message: status {0}")]
    Rejected(u16),
}

/// Builds an [`OcClient`] per request from the command JWT.
///
/// Holds the single shared reqwest client so connection pools are reused
/// across requests.
#[derive(Clone)]
pub struct OcClientFactory {
    http: Client,
}

impl OcClientFactory {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    pub fn build(&self, jwt: String, claims: CommandClaims) -> OcClient {
        OcClient {
            http: self.http.clone(),
            jwt: Arc::new(jwt),
            claims: Arc::new(claims),
        }
    }
}

/// A per-command client bound to one invocation's JWT and gateway.
#[derive(Clone)]
pub struct OcClient {
    http: Client,
    jwt: Arc<String>,
    claims: Arc<CommandClaims>,
}

impl OcClient {
    pub fn claims(&self) -> &CommandClaims {
        &self.claims
    }

    /// Push a message to the gateway.
    ///
    /// Ephemeral messages are never pushed; they exist only in the response
    /// envelope, so this returns immediately for them.
    pub async fn send_message(&self, message: &Message) -> Result<(), DeliveryError> {
        if message.ephemeral {
            debug!(message_id = %message.id, "skipping gateway push for ephemeral message");
            return Ok(());
        }

        let url = format!(
            "{}/execute_bot_action",
            self.claims.bot_api_gateway.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "jwt": self.jwt.as_str(),
            "action": { "SendMessage": message },
        });

        let response = self
            .http
            .post(&url)
            .timeout(DELIVERY_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Send(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, message_id = %message.id, "gateway rejected message");
            return Err(DeliveryError::Rejected(status.as_u16()));
        }

        debug!(message_id = %message.id, "message delivered");
        Ok(())
    }
}
