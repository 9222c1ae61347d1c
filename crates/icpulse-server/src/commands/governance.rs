//! NNS governance commands

use serde_json::Value;

use icpulse::format::{format_timestamp, format_vote_tally};
use icpulse::{ChatMessage, CommandContext, HandlerError};

use crate::AppState;

const DEFAULT_PROPOSAL_LIMIT: i64 = 5;
const MAX_PROPOSAL_LIMIT: i64 = 10;

const SUMMARY_SYSTEM_PROMPT: &str = "You summarize Internet Computer NNS proposals \
for a chat audience. Reply in at most three short sentences, plain language, no \
markdown headings.";

/// `recent_proposals` - newest NNS proposals, one line each.
pub async fn recent_proposals(
    state: &AppState,
    ctx: &CommandContext,
) -> Result<String, HandlerError> {
    let limit = ctx
        .opt_integer_arg("limit")
        .unwrap_or(DEFAULT_PROPOSAL_LIMIT)
        .clamp(1, MAX_PROPOSAL_LIMIT);
    let proposals = state.dashboard.recent_proposals(limit as u32).await?;
    Ok(build_recent_proposals(&proposals))
}

/// `proposal_info` - one proposal with status, tally, and deadline.
pub async fn proposal_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = proposal_id_arg(ctx)?;
    let body = state.dashboard.proposal(id).await?;
    Ok(build_proposal_info(id, &body))
}

/// `summarize_proposal` - LLM summary of a proposal's title and body text.
pub async fn summarize_proposal(
    state: &AppState,
    ctx: &CommandContext,
) -> Result<String, HandlerError> {
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| HandlerError::NotConfigured("summarize_proposal".to_string()))?;

    let id = proposal_id_arg(ctx)?;
    let body = state.dashboard.proposal(id).await?;

    let title = body.get("title").and_then(|v| v.as_str()).unwrap_or("");
    let summary = body.get("summary").and_then(|v| v.as_str()).unwrap_or("");
    let topic = body.get("topic").and_then(|v| v.as_str()).unwrap_or("");

    let prompt = format!(
        "Proposal {id}\nTopic: {topic}\nTitle: {title}\n\n{summary}"
    );
    let messages = [
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ];
    let completion = llm.complete(&messages).await?;

    Ok(format!(
        "\u{1F4DC} **Proposal {id} summary**\n\n{}",
        completion.content.trim()
    ))
}

fn proposal_id_arg(ctx: &CommandContext) -> Result<u64, HandlerError> {
    let id = ctx.integer_arg("id")?;
    u64::try_from(id).map_err(|_| HandlerError::InvalidArgument("id".to_string()))
}

pub fn build_recent_proposals(proposals: &[Value]) -> String {
    if proposals.is_empty() {
        return "No recent proposals found".to_string();
    }
    let mut msg = String::from("\u{1F5F3} **Recent NNS Proposals**\n");
    for p in proposals {
        let id = p
            .get("proposal_id")
            .and_then(|v| v.as_u64())
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());
        let topic = p.get("topic").and_then(|v| v.as_str()).unwrap_or("Unknown");
        let status = p.get("status").and_then(|v| v.as_str()).unwrap_or("?");
        let title = p
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("(untitled)");
        msg.push_str(&format!("\n\u{2022} {id} [{topic}] {status} \u{2014} {title}"));
    }
    msg
}

pub fn build_proposal_info(id: u64, body: &Value) -> String {
    let title = body
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or("(untitled)");
    let topic = body.get("topic").and_then(|v| v.as_str()).unwrap_or("Unknown");
    let status = body.get("status").and_then(|v| v.as_str()).unwrap_or("Unknown");

    let tally_field = |key: &str| {
        body.get("latest_tally")
            .and_then(|t| t.get(key))
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    };
    let yes = tally_field("yes");
    let no = tally_field("no");
    let total = tally_field("total");

    let mut msg = format!(
        "\u{1F5F3} **Proposal {id}**\n\n\
         {title}\n\n\
         Topic: {topic}\n\
         Status: {status}\n\
         Votes: {}",
        format_vote_tally(yes, no, total),
    );

    if let Some(deadline) = body
        .get("deadline_timestamp_seconds")
        .and_then(|v| v.as_i64())
    {
        msg.push_str(&format!("\nVoting ends: {}", format_timestamp(deadline)));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recent_list_renders_one_line_per_proposal() {
        let proposals = vec![
            json!({"proposal_id": 135001, "topic": "Governance", "status": "Open", "title": "Adopt thing"}),
            json!({"proposal_id": 135000, "topic": "SubnetManagement", "status": "Executed", "title": "Replace node"}),
        ];
        let msg = build_recent_proposals(&proposals);
        assert!(msg.contains("135001 [Governance] Open \u{2014} Adopt thing"));
        assert!(msg.contains("135000 [SubnetManagement] Executed"));
    }

    #[test]
    fn empty_list_has_friendly_text() {
        assert_eq!(build_recent_proposals(&[]), "No recent proposals found");
    }

    #[test]
    fn proposal_info_includes_tally_and_deadline() {
        let body = json!({
            "title": "Adopt thing",
            "topic": "Governance",
            "status": "Open",
            "latest_tally": {"yes": 3.0e15, "no": 1.0e15, "total": 4.0e15},
            "deadline_timestamp_seconds": 0
        });
        let msg = build_proposal_info(135001, &body);
        assert!(msg.contains("Proposal 135001"));
        assert!(msg.contains("75.0%"));
        assert!(msg.contains("Voting ends: 1970-01-01 00:00 UTC"));
    }

    #[test]
    fn proposal_info_with_no_tally() {
        let body = json!({"title": "Adopt thing", "topic": "Governance", "status": "Open"});
        let msg = build_proposal_info(1, &body);
        assert!(msg.contains("No votes cast yet"));
        assert!(!msg.contains("Voting ends"));
    }

    #[test]
    fn negative_id_is_invalid() {
        use icpulse::{ArgValue, CommandArg};
        let ctx = CommandContext {
            command: "proposal_info".to_string(),
            args: vec![CommandArg {
                name: "id".to_string(),
                value: ArgValue::Integer(-5),
            }],
            initiator: "u".to_string(),
            chat: "c".to_string(),
        };
        assert!(matches!(
            proposal_id_arg(&ctx),
            Err(HandlerError::InvalidArgument(_))
        ));
    }
}
