//! Canister and subnet commands

use serde_json::Value;

use icpulse::format::{format_bytes, format_cycles};
use icpulse::{CommandContext, HandlerError};

use crate::AppState;

/// `canister_info` - status, controllers, and resource usage of a canister.
pub async fn canister_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = ctx.string_arg("canister")?;
    validate_canister_id(id).map_err(|_| HandlerError::InvalidArgument("canister".to_string()))?;
    let body = state.dashboard.canister(id).await?;
    Ok(build_canister_info(id, &body))
}

/// `subnet_info` - node counts and type for one subnet.
pub async fn subnet_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = ctx.string_arg("subnet")?;
    validate_canister_id(id).map_err(|_| HandlerError::InvalidArgument("subnet".to_string()))?;
    let body = state.dashboard.subnet(id).await?;
    Ok(build_subnet_info(id, &body))
}

/// Syntactic check of the textual principal format: dash-separated groups of
/// lowercase base32 (a-z, 2-7). Checked locally before spending an upstream
/// call on an id that can never resolve.
pub fn validate_canister_id(id: &str) -> Result<(), ()> {
    let groups: Vec<&str> = id.split('-').collect();
    if groups.len() < 2 {
        return Err(());
    }
    for group in groups {
        if group.is_empty() || group.len() > 5 {
            return Err(());
        }
        if !group
            .chars()
            .all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c))
        {
            return Err(());
        }
    }
    Ok(())
}

pub fn build_canister_info(id: &str, body: &Value) -> String {
    let status = body
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let subnet = body
        .get("subnet_id")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let controllers = body
        .get("controllers")
        .and_then(|v| v.as_array())
        .map(|c| c.len())
        .unwrap_or(0);

    let module = match body.get("module_hash").and_then(|v| v.as_str()) {
        Some(hash) if !hash.is_empty() => "installed",
        _ => "none",
    };

    let mut msg = format!(
        "\u{1F4E6} **Canister `{id}`**\n\n\
         Status: {status}\n\
         Subnet: `{subnet}`\n\
         Controllers: {controllers}\n\
         Module: {module}",
    );

    if let Some(memory) = body.get("memory_size").and_then(|v| v.as_f64()) {
        msg.push_str(&format!("\nMemory: {}", format_bytes(memory)));
    }
    if let Some(cycles) = body.get("cycles_balance").and_then(|v| v.as_f64()) {
        msg.push_str(&format!("\nCycles balance: {}", format_cycles(cycles)));
    }
    msg
}

pub fn build_subnet_info(id: &str, body: &Value) -> String {
    let subnet_type = body
        .get("subnet_type")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let total_nodes = body.get("total_nodes").and_then(|v| v.as_u64()).unwrap_or(0);
    let up_nodes = body.get("up_nodes").and_then(|v| v.as_u64()).unwrap_or(0);

    let mut msg = format!(
        "\u{1F5A7} **Subnet `{id}`**\n\n\
         Type: {subnet_type}\n\
         Nodes: {up_nodes}/{total_nodes} up",
    );

    if let Some(canisters) = body
        .get("running_canisters")
        .and_then(|v| v.as_u64())
    {
        msg.push_str(&format!("\nRunning canisters: {canisters}"));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_principals() {
        assert!(validate_canister_id("ryjl3-tyaaa-aaaaa-aaaba-cai").is_ok());
        assert!(validate_canister_id("2ouva-viaaa-aaaaq-aaamq-cai").is_ok());
    }

    #[test]
    fn rejects_malformed_principals() {
        assert!(validate_canister_id("").is_err());
        assert!(validate_canister_id("no-dashes-but-UPPER").is_err());
        assert!(validate_canister_id("toolong-group-aaaaaa").is_err());
        assert!(validate_canister_id("single").is_err());
        assert!(validate_canister_id("bad--empty").is_err());
        assert!(validate_canister_id("has-digit-19").is_err());
    }

    #[test]
    fn canister_info_renders_resources() {
        let body = json!({
            "status": "running",
            "subnet_id": "tdb26-jop6k-aogll-7ltgs-eruif-6kk7m-qpktf-gdiqx-mxtrf-vb5e6-eqe",
            "controllers": ["a-b", "c-d"],
            "module_hash": "0xabc123",
            "memory_size": 1024.0 * 1024.0 * 2.0,
            "cycles_balance": 3.0e12
        });
        let msg = build_canister_info("ryjl3-tyaaa-aaaaa-aaaba-cai", &body);
        assert!(msg.contains("Status: running"));
        assert!(msg.contains("Controllers: 2"));
        assert!(msg.contains("Module: installed"));
        assert!(msg.contains("Memory: 2.0 MB"));
        assert!(msg.contains("Cycles balance: 3.00T"));
    }

    #[test]
    fn empty_canister_has_no_module() {
        let body = json!({"status": "stopped"});
        assert!(build_canister_info("a-b", &body).contains("Module: none"));
    }

    #[test]
    fn subnet_info_renders_node_counts() {
        let body = json!({
            "subnet_type": "application",
            "total_nodes": 13,
            "up_nodes": 13,
            "running_canisters": 40211
        });
        let msg = build_subnet_info("tdb26-jop6k", &body);
        assert!(msg.contains("Type: application"));
        assert!(msg.contains("Nodes: 13/13 up"));
        assert!(msg.contains("Running canisters: 40211"));
    }
}
