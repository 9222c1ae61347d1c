//! Proposal alert subscription command

use icpulse::{CommandContext, HandlerError};
use icpulse_oc::OcClient;

use crate::alerts::poll_proposals;
use crate::AppState;

/// `proposal_alerts` - toggle or inspect the per-chat proposal poll.
///
/// Delivery reuses the client built from the activating request's JWT, so a
/// subscription lives at most as long as that token's gateway accepts it.
pub async fn proposal_alerts(
    state: &AppState,
    client: &OcClient,
    ctx: &CommandContext,
) -> Result<String, HandlerError> {
    let action = ctx.string_arg("action")?;
    let chat = ctx.chat.clone();

    match action {
        "on" => {
            let task = tokio::spawn(poll_proposals(
                state.dashboard.clone(),
                client.clone(),
                chat.clone(),
            ));
            let replaced = state.alerts.activate(&chat, task);
            if replaced {
                Ok("\u{1F514} Proposal alerts refreshed for this chat".to_string())
            } else {
                Ok("\u{1F514} Proposal alerts enabled: new NNS proposals will be \
                    posted here (checked every 5 minutes)"
                    .to_string())
            }
        }
        "off" => {
            if state.alerts.deactivate(&chat) {
                Ok("\u{1F515} Proposal alerts disabled for this chat".to_string())
            } else {
                Ok("Proposal alerts were not enabled in this chat".to_string())
            }
        }
        "status" => {
            if state.alerts.is_active(&chat) {
                Ok("\u{1F514} Proposal alerts are ON in this chat".to_string())
            } else {
                Ok("\u{1F515} Proposal alerts are OFF in this chat".to_string())
            }
        }
        _ => Err(HandlerError::InvalidArgument("action".to_string())),
    }
}
