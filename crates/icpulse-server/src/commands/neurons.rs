//! NNS neuron commands

use serde_json::Value;

use icpulse::format::{format_duration_days, format_e8s, format_value};
use icpulse::{CommandContext, HandlerError};

use crate::AppState;

const EIGHT_YEARS_SECS: u64 = 8 * 365 * 86_400;

/// `neuron_info` - stake, state, and voting power of one neuron.
pub async fn neuron_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = neuron_id_arg(ctx)?;
    let body = state.dashboard.neuron(id).await?;
    Ok(build_neuron_info(id, &body))
}

/// `neuron_health` - the same lookup with a staking assessment attached.
pub async fn neuron_health(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = neuron_id_arg(ctx)?;
    let body = state.dashboard.neuron(id).await?;
    Ok(build_neuron_health(id, &body))
}

fn neuron_id_arg(ctx: &CommandContext) -> Result<u64, HandlerError> {
    let id = ctx.integer_arg("id")?;
    u64::try_from(id).map_err(|_| HandlerError::InvalidArgument("id".to_string()))
}

fn stake_e8s(body: &Value) -> u64 {
    body.get("stake_e8s")
        .and_then(|v| match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
        .unwrap_or(0)
}

fn dissolve_delay_secs(body: &Value) -> u64 {
    body.get("dissolve_delay_seconds")
        .and_then(|v| v.as_u64())
        .unwrap_or(0)
}

fn neuron_state(body: &Value) -> &str {
    body.get("state").and_then(|v| v.as_str()).unwrap_or("Unknown")
}

pub fn build_neuron_info(id: u64, body: &Value) -> String {
    let voting_power = body
        .get("voting_power")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let age = body.get("age_seconds").and_then(|v| v.as_u64()).unwrap_or(0);

    format!(
        "\u{1F9E0} **Neuron {id}**\n\n\
         Stake: {} ICP\n\
         State: {}\n\
         Dissolve delay: {}\n\
         Age: {}\n\
         Voting power: {}",
        format_e8s(stake_e8s(body)),
        neuron_state(body),
        format_duration_days(dissolve_delay_secs(body)),
        format_duration_days(age),
        format_value(voting_power / 1e8),
    )
}

pub fn build_neuron_health(id: u64, body: &Value) -> String {
    let state = neuron_state(body);
    let delay = dissolve_delay_secs(body);

    let assessment = match state {
        "NotDissolving" if delay >= EIGHT_YEARS_SECS => {
            "\u{2705} Dissolve delay is at the 8-year maximum; voting power is maxed out."
                .to_string()
        }
        "NotDissolving" => format!(
            "\u{26A0} Dissolve delay of {} is below optimal 8-year max. \
             Consider increasing dissolve delay to maximize voting rewards.",
            format_duration_days(delay)
        ),
        "Dissolving" => format!(
            "\u{23F3} Neuron is dissolving; {} until the stake unlocks and voting \
             power decays along the way.",
            format_duration_days(delay)
        ),
        "Dissolved" => {
            "\u{1F513} Neuron is fully dissolved; the stake is liquid and earns no rewards."
                .to_string()
        }
        _ => "State unknown; no assessment available.".to_string(),
    };

    format!(
        "\u{1FA7A} **Neuron {id} health**\n\n\
         Stake: {} ICP\n\
         State: {state}\n\n\
         {assessment}",
        format_e8s(stake_e8s(body)),
    )
}
