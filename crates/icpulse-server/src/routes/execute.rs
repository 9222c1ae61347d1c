//! Command execution route
//!
//! The JWT middleware has already attached a per-request [`OcClient`]; from
//! here on every outcome is an HTTP 200 envelope. The finalised message is
//! also pushed to the gateway; if that push fails the envelope still carries
//! the message, so the caller sees the result either way.

use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use tracing::{info, warn};

use icpulse_oc::{Message, OcClient};

use crate::{commands, envelope, AppState};

pub async fn execute_command(
    State(state): State<AppState>,
    Extension(client): Extension<OcClient>,
) -> Response {
    let ctx = client.claims().to_context();
    info!(command = %ctx.command, chat = %ctx.chat, "executing command");

    match commands::dispatch(&state, &client, &ctx).await {
        None => {
            warn!(command = %ctx.command, "unknown command");
            envelope::ephemeral_error(format!("Command not found: {}", ctx.command))
        }
        Some(Ok(text)) => {
            let message = Message::text(text);
            if let Err(e) = client.send_message(&message).await {
                warn!(command = %ctx.command, error = %e, "gateway delivery failed");
            }
            envelope::success(message)
        }
        Some(Err(e)) => {
            warn!(command = %ctx.command, error = %e, "command failed");
            envelope::ephemeral_error(e.user_message())
        }
    }
}
