//! SNS DAO commands

use serde_json::Value;

use icpulse::{CommandContext, HandlerError};

use crate::AppState;

const LIST_LIMIT: u32 = 20;

/// `sns_list` - launched SNS DAOs, one line each.
pub async fn sns_list(state: &AppState) -> Result<String, HandlerError> {
    let daos = state.sns.list(LIST_LIMIT).await?;
    Ok(build_sns_list(&daos))
}

/// `sns_info` - one DAO, looked up by root canister id or by name.
pub async fn sns_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let query = ctx.string_arg("dao")?;

    let body = if super::canisters::validate_canister_id(query).is_ok() {
        state.sns.get(query).await?
    } else {
        let daos = state.sns.list(100).await?;
        find_by_name(&daos, query)
            .ok_or_else(|| HandlerError::Parse(format!("no SNS named '{query}'")))?
    };
    Ok(build_sns_info(&body))
}

/// Case-insensitive name match over the listing.
pub fn find_by_name(daos: &[Value], query: &str) -> Option<Value> {
    let needle = query.to_lowercase();
    daos.iter()
        .find(|d| {
            d.get("name")
                .and_then(|v| v.as_str())
                .is_some_and(|name| name.to_lowercase() == needle)
        })
        .or_else(|| {
            daos.iter().find(|d| {
                d.get("name")
                    .and_then(|v| v.as_str())
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
        })
        .cloned()
}

pub fn build_sns_list(daos: &[Value]) -> String {
    if daos.is_empty() {
        return "No SNS DAOs found".to_string();
    }
    let mut msg = String::from("\u{1F3DB} **SNS DAOs**\n");
    for dao in daos {
        let name = dao.get("name").and_then(|v| v.as_str()).unwrap_or("(unnamed)");
        let symbol = dao
            .get("icrc1_metadata")
            .and_then(|m| m.get("icrc1_symbol"))
            .and_then(|v| v.as_str())
            .unwrap_or("?");
        msg.push_str(&format!("\n\u{2022} {name} ({symbol})"));
    }
    msg
}

pub fn build_sns_info(body: &Value) -> String {
    let str_field = |key: &str| body.get(key).and_then(|v| v.as_str()).unwrap_or("unknown");
    let name = str_field("name");
    let root = str_field("root_canister_id");
    let lifecycle = str_field("swap_lifecycle");
    let symbol = body
        .get("icrc1_metadata")
        .and_then(|m| m.get("icrc1_symbol"))
        .and_then(|v| v.as_str())
        .unwrap_or("?");

    let mut msg = format!(
        "\u{1F3DB} **{name}**\n\n\
         Token: {symbol}\n\
         Root canister: `{root}`\n\
         Swap status: {lifecycle}",
    );

    if let Some(count) = body.get("proposal_count").and_then(|v| v.as_u64()) {
        msg.push_str(&format!("\nProposals: {count}"));
    }
    if let Some(desc) = body.get("description").and_then(|v| v.as_str()) {
        let desc = desc.trim();
        if !desc.is_empty() {
            let short: String = desc.chars().take(280).collect();
            msg.push_str(&format!("\n\n{short}"));
        }
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dao(name: &str, symbol: &str) -> Value {
        json!({
            "name": name,
            "root_canister_id": "3e3x2-xyaaa-aaaaq-aaalq-cai",
            "swap_lifecycle": "LIFECYCLE_COMMITTED",
            "icrc1_metadata": {"icrc1_symbol": symbol}
        })
    }

    #[test]
    fn list_renders_name_and_symbol() {
        let msg = build_sns_list(&[dao("OpenChat", "CHAT"), dao("Kinic", "KINIC")]);
        assert!(msg.contains("OpenChat (CHAT)"));
        assert!(msg.contains("Kinic (KINIC)"));
    }

    #[test]
    fn name_lookup_prefers_exact_match() {
        let daos = vec![dao("OpenChat Extended", "X"), dao("OpenChat", "CHAT")];
        let found = find_by_name(&daos, "openchat").unwrap();
        assert_eq!(found.get("name").unwrap(), "OpenChat");
    }

    #[test]
    fn name_lookup_falls_back_to_substring() {
        let daos = vec![dao("OpenChat", "CHAT")];
        assert!(find_by_name(&daos, "open").is_some());
        assert!(find_by_name(&daos, "gold").is_none());
    }

    #[test]
    fn info_includes_description_when_present() {
        let mut body = dao("OpenChat", "CHAT");
        body["description"] = json!("A decentralized chat app.");
        body["proposal_count"] = json!(812);
        let msg = build_sns_info(&body);
        assert!(msg.contains("Swap status: LIFECYCLE_COMMITTED"));
        assert!(msg.contains("Proposals: 812"));
        assert!(msg.contains("A decentralized chat app."));
    }
}
