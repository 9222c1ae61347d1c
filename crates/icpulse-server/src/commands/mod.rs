//! Command registry and dispatch
//!
//! One match arm per advertised command. `dispatch` returns `None` for a name
//! the registry does not know, so the route can answer without touching any
//! upstream API.

use icpulse::definition::{BotDefinition, CommandDefinition, ParamDefinition};
use icpulse::{CommandContext, HandlerError};
use icpulse_oc::OcClient;

use crate::AppState;

pub mod alerts;
pub mod canisters;
pub mod fun;
pub mod governance;
pub mod memos;
pub mod network;
pub mod neurons;
pub mod sns;
pub mod tokens;

/// Run the handler for `ctx.command`. `None` means the command is not in the
/// registry; `Some(Err)` is a handler failure to report as an ephemeral
/// message.
pub async fn dispatch(
    state: &AppState,
    client: &OcClient,
    ctx: &CommandContext,
) -> Option<Result<String, HandlerError>> {
    let store = state.store.as_ref();
    let outcome = match ctx.command.as_str() {
        "network_status" => network::network_status(state).await,
        "cycle_burn" => network::cycle_burn(state).await,
        "icp_price" => tokens::icp_price(state).await,
        "cycles" => tokens::cycles(state, ctx).await,
        "token_info" => tokens::token_info(state, ctx).await,
        "icp_supply" => tokens::icp_supply(state).await,
        "recent_proposals" => governance::recent_proposals(state, ctx).await,
        "proposal_info" => governance::proposal_info(state, ctx).await,
        "summarize_proposal" => governance::summarize_proposal(state, ctx).await,
        "neuron_info" => neurons::neuron_info(state, ctx).await,
        "neuron_health" => neurons::neuron_health(state, ctx).await,
        "sns_list" => sns::sns_list(state).await,
        "sns_info" => sns::sns_info(state, ctx).await,
        "canister_info" => canisters::canister_info(state, ctx).await,
        "subnet_info" => canisters::subnet_info(state, ctx).await,
        "joke" => fun::joke(state).await,
        "ask" => fun::ask(state, ctx).await,
        "note_add" => memos::note_add(store, ctx),
        "note_list" => memos::note_list(store, ctx),
        "note_remove" => memos::note_remove(store, ctx),
        "task_add" => memos::task_add(store, ctx),
        "task_list" => memos::task_list(store, ctx),
        "task_remove" => memos::task_remove(store, ctx),
        "shoutout" => memos::shoutout(store, ctx),
        "proposal_alerts" => alerts::proposal_alerts(state, client, ctx).await,
        _ => return None,
    };
    Some(outcome)
}

/// The declarative descriptor served from `GET /bot_definition`. Must stay in
/// lockstep with [`dispatch`].
pub fn definitions() -> BotDefinition {
    let commands = vec![
        CommandDefinition::text_command("network_status", "Internet Computer network overview")
            .with_placeholder("Fetching network status..."),
        CommandDefinition::text_command("cycle_burn", "Current cycle burn rate"),
        CommandDefinition::text_command("icp_price", "ICP price in USD and XDR")
            .with_placeholder("Fetching price..."),
        CommandDefinition::text_command("cycles", "Convert an ICP amount to cycles")
            .with_param(ParamDefinition::decimal("amount", "ICP amount", 1e9)),
        CommandDefinition::text_command("token_info", "ICRC-1 token metadata").with_param(
            ParamDefinition::string("ledger", "Ledger canister id", true, 64),
        ),
        CommandDefinition::text_command("icp_supply", "Circulating and total ICP supply"),
        CommandDefinition::text_command("recent_proposals", "Latest NNS proposals").with_param(
            ParamDefinition::integer("limit", "How many proposals (1-10)", false, 10),
        ),
        CommandDefinition::text_command("proposal_info", "Details of one NNS proposal")
            .with_param(ParamDefinition::integer("id", "Proposal id", true, i64::MAX)),
        CommandDefinition::text_command("summarize_proposal", "AI summary of an NNS proposal")
            .with_placeholder("Summarizing...")
            .with_param(ParamDefinition::integer("id", "Proposal id", true, i64::MAX)),
        CommandDefinition::text_command("neuron_info", "Details of one NNS neuron")
            .with_param(ParamDefinition::integer("id", "Neuron id", true, i64::MAX)),
        CommandDefinition::text_command("neuron_health", "Staking assessment for a neuron")
            .with_param(ParamDefinition::integer("id", "Neuron id", true, i64::MAX)),
        CommandDefinition::text_command("sns_list", "Launched SNS DAOs"),
        CommandDefinition::text_command("sns_info", "Details of one SNS DAO").with_param(
            ParamDefinition::string("dao", "DAO name or root canister id", true, 64),
        ),
        CommandDefinition::text_command("canister_info", "Status of a canister").with_param(
            ParamDefinition::string("canister", "Canister id", true, 64),
        ),
        CommandDefinition::text_command("subnet_info", "Details of a subnet").with_param(
            ParamDefinition::string("subnet", "Subnet id", true, 128),
        ),
        CommandDefinition::text_command("joke", "A random joke"),
        CommandDefinition::text_command("ask", "Ask the assistant anything")
            .with_placeholder("Thinking...")
            .with_param(ParamDefinition::string("question", "Your question", true, 1000)),
        CommandDefinition::text_command("note_add", "Save a note")
            .with_param(ParamDefinition::string("text", "Note text", true, 500)),
        CommandDefinition::text_command("note_list", "List your notes"),
        CommandDefinition::text_command("note_remove", "Delete a note by id")
            .with_param(ParamDefinition::integer("id", "Note id", true, i64::MAX)),
        CommandDefinition::text_command("task_add", "Save a task")
            .with_param(ParamDefinition::string("text", "Task text", true, 500))
            .with_param(ParamDefinition::datetime("due", "Due date", false)),
        CommandDefinition::text_command("task_list", "List your tasks"),
        CommandDefinition::text_command("task_remove", "Delete a task by id")
            .with_param(ParamDefinition::integer("id", "Task id", true, i64::MAX)),
        CommandDefinition::text_command("shoutout", "Give someone a shoutout")
            .with_param(ParamDefinition::user("user", "Who to shout out")),
        CommandDefinition::text_command("proposal_alerts", "Toggle proposal alerts in this chat")
            .with_param(ParamDefinition::string_choice(
                "action",
                "on, off, or status",
                &["on", "off", "status"],
            )),
    ];

    BotDefinition {
        description: "Live Internet Computer metrics, governance, and token data \
                      right in your chat."
            .to_string(),
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use icpulse_oc::jwt::CommandPayload;
    use icpulse_oc::{BotScope, CommandClaims};

    use crate::config::Config;

    fn test_state() -> AppState {
        let config = Config {
            port: 0,
            ic_api_base: "http://localhost:0".to_string(),
            ledger_api_base: "http://localhost:0".to_string(),
            sns_api_base: "http://localhost:0".to_string(),
            oc_public: None,
            groq_api_key: None,
            groq_model: "test".to_string(),
        };
        AppState::new(config).unwrap()
    }

    fn test_client(state: &AppState) -> OcClient {
        let claims = CommandClaims {
            exp: i64::MAX,
            bot: "icpulse".to_string(),
            bot_api_gateway: "http://localhost:0".to_string(),
            scope: BotScope::Chat {
                chat: "chat-1".to_string(),
            },
            command: CommandPayload {
                name: "note_list".to_string(),
                args: Vec::new(),
                initiator: "user-1".to_string(),
            },
        };
        state.oc_factory.build("jwt".to_string(), claims)
    }

    fn ctx(command: &str) -> CommandContext {
        CommandContext {
            command: command.to_string(),
            args: Vec::new(),
            initiator: "user-1".to_string(),
            chat: "chat-1".to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_command_never_reaches_a_handler() {
        let state = test_state();
        let client = test_client(&state);
        let outcome = dispatch(&state, &client, &ctx("flux_capacitor")).await;
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn registered_command_dispatches() {
        // note_list only touches the injected store, no upstream calls.
        let state = test_state();
        let client = test_client(&state);
        let outcome = dispatch(&state, &client, &ctx("note_list")).await;
        assert!(matches!(outcome, Some(Ok(_))));
    }

    #[test]
    fn definition_names_are_unique() {
        let def = definitions();
        let names: HashSet<_> = def.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), def.commands.len());
    }

    #[test]
    fn registry_covers_every_topic() {
        let def = definitions();
        assert_eq!(def.commands.len(), 25);
        for name in [
            "network_status",
            "cycles",
            "recent_proposals",
            "neuron_health",
            "sns_info",
            "canister_info",
            "ask",
            "note_add",
            "proposal_alerts",
        ] {
            assert!(
                def.commands.iter().any(|c| c.name == name),
                "missing {name}"
            );
        }
    }

    #[test]
    fn alert_action_is_a_choice_param() {
        use icpulse::definition::ParamType;
        let def = definitions();
        let alerts = def
            .commands
            .iter()
            .find(|c| c.name == "proposal_alerts")
            .unwrap();
        match &alerts.params[0].param_type {
            ParamType::StringParam { choices, .. } => {
                assert_eq!(choices, &["on", "off", "status"]);
            }
            other => panic!("unexpected param type: {other:?}"),
        }
    }
}
