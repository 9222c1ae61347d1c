//! Token and price commands

use serde_json::Value;

use icpulse::format::{format_percent, format_value};
use icpulse::{CommandContext, HandlerError};

use crate::services::UsdPrice;
use crate::AppState;

/// Largest ICP amount accepted by `cycles`; anything bigger is a typo.
const MAX_CYCLES_AMOUNT: f64 = 1e9;

/// `icp_price` - spot price in USD plus the XDR rate when available.
pub async fn icp_price(state: &AppState) -> Result<String, HandlerError> {
    let (price, xdr) = tokio::join!(state.ledger.usd_price(), state.dashboard.icp_xdr_rate());
    let price = price?;
    Ok(build_icp_price(price, xdr.ok()))
}

/// `cycles` - convert an ICP amount to cycles at the current XDR rate.
pub async fn cycles(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let amount = ctx.decimal_arg("amount")?;
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_CYCLES_AMOUNT {
        return Err(HandlerError::InvalidArgument("amount".to_string()));
    }
    let rate = state.dashboard.icp_xdr_rate().await?;
    Ok(build_cycles(amount, rate))
}

/// `token_info` - ICRC-1 ledger metadata by ledger canister id.
pub async fn token_info(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let ledger = ctx.string_arg("ledger")?;
    super::canisters::validate_canister_id(ledger)
        .map_err(|_| HandlerError::InvalidArgument("ledger".to_string()))?;
    let body = state.ledger.icrc_token(ledger).await?;
    Ok(build_token_info(ledger, &body))
}

/// `icp_supply` - circulating and total supply, each leg best-effort.
pub async fn icp_supply(state: &AppState) -> Result<String, HandlerError> {
    let (circulating, total) = tokio::join!(
        state.ledger.circulating_supply(),
        state.ledger.total_supply()
    );
    match (circulating, total) {
        (Err(e), Err(_)) => Err(e),
        (circulating, total) => Ok(build_icp_supply(circulating.ok(), total.ok())),
    }
}

pub fn build_icp_price(price: UsdPrice, xdr_rate: Option<f64>) -> String {
    let arrow = if price.change_24h >= 0.0 {
        "\u{1F4C8}"
    } else {
        "\u{1F4C9}"
    };
    let mut msg = format!(
        "{arrow} **ICP Price**\n\n\
         USD: ${:.2}\n\
         24h change: {:+.2}%",
        price.usd, price.change_24h,
    );
    if let Some(rate) = xdr_rate {
        msg.push_str(&format!("\nXDR: {:.4}", rate / 10_000.0));
    }
    msg
}

/// Conversion per NNS tokenomics: the dashboard rate is permyriad XDR per
/// ICP, one XDR buys one trillion cycles, and one XDR is pegged near $1.40.
pub fn build_cycles(amount: f64, rate: f64) -> String {
    let xdr_per_icp = rate / 10_000.0;
    let cycles = amount * xdr_per_icp * 1e12;
    let usd = amount * xdr_per_icp * 1.4;
    format!(
        "\u{26A1} **ICP \u{2192} Cycles**\n\n\
         {amount} ICP \u{2248} {} cycles (~${usd:.2})",
        format_value(cycles),
    )
}

pub fn build_token_info(ledger: &str, body: &Value) -> String {
    let str_field = |key: &str| {
        body.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string()
    };
    let symbol = str_field("symbol");
    let name = str_field("name");
    let decimals = body.get("decimals").and_then(|v| v.as_u64()).unwrap_or(8);

    // Supply and fee arrive as decimal strings in base units.
    let scaled = |key: &str| {
        body.get(key)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<f64>().ok())
            .map(|raw| format_value(raw / 10f64.powi(decimals as i32)))
            .unwrap_or_else(|| "N/A".to_string())
    };

    format!(
        "\u{1FA99} **{name} ({symbol})**\n\n\
         Ledger: `{ledger}`\n\
         Total supply: {} {symbol}\n\
         Transfer fee: {} {symbol}\n\
         Decimals: {decimals}",
        scaled("total_supply"),
        scaled("fee"),
    )
}

pub fn build_icp_supply(circulating: Option<f64>, total: Option<f64>) -> String {
    let fmt = |v: Option<f64>| v.map(format_value).unwrap_or_else(|| "N/A".to_string());
    let mut msg = format!(
        "\u{1F4B0} **ICP Supply**\n\n\
         Circulating: {} ICP\n\
         Total: {} ICP",
        fmt(circulating),
        fmt(total),
    );
    if let (Some(c), Some(t)) = (circulating, total) {
        if t > 0.0 {
            msg.push_str(&format!("\nCirculating share: {}", format_percent(c / t)));
        }
    }
    msg
}
