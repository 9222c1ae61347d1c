//! ICP ledger and price clients
//!
//! Supply figures come from the ledger API's plain-text endpoints; the USD
//! price and 24h change come from CoinGecko. ICRC token metadata comes from
//! the ICRC ledger API.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use icpulse::http::{get_json, get_text};
use icpulse::HandlerError;

const SUPPLY_TIMEOUT: Duration = Duration::from_secs(5);
const PRICE_TIMEOUT: Duration = Duration::from_secs(10);

const COINGECKO_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=internet-computer&vs_currencies=usd&include_24hr_change=true";
const ICRC_API_BASE: &str = "https://icrc-api.internetcomputer.org";

/// USD price point with 24h change.
#[derive(Debug, Clone, Copy)]
pub struct UsdPrice {
    pub usd: f64,
    pub change_24h: f64,
}

#[derive(Clone)]
pub struct LedgerApi {
    http: Client,
    base: String,
}

impl LedgerApi {
    pub fn new(http: Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    async fn supply(&self, kind: &str) -> Result<f64, HandlerError> {
        let url = format!(
            "{}/supply/{kind}/latest.txt",
            self.base.trim_end_matches('/')
        );
        let text = get_text(&self.http, &url, SUPPLY_TIMEOUT).await?;
        text.trim()
            .parse()
            .map_err(|_| HandlerError::Parse(format!("{kind} supply is not a number")))
    }

    /// Circulating ICP supply, in whole ICP.
    pub async fn circulating_supply(&self) -> Result<f64, HandlerError> {
        self.supply("circulating").await
    }

    /// Total ICP supply, in whole ICP.
    pub async fn total_supply(&self) -> Result<f64, HandlerError> {
        self.supply("total").await
    }

    /// Current ICP price in USD with 24h change.
    pub async fn usd_price(&self) -> Result<UsdPrice, HandlerError> {
        let body = get_json(&self.http, COINGECKO_PRICE_URL, PRICE_TIMEOUT).await?;
        parse_usd_price(&body)
    }

    /// ICRC-1 ledger metadata for a token ledger canister.
    pub async fn icrc_token(&self, ledger_id: &str) -> Result<Value, HandlerError> {
        let url = format!("{ICRC_API_BASE}/api/v1/ledgers/{ledger_id}");
        get_json(&self.http, &url, PRICE_TIMEOUT).await
    }
}

pub fn parse_usd_price(body: &Value) -> Result<UsdPrice, HandlerError> {
    let entry = body
        .get("internet-computer")
        .ok_or_else(|| HandlerError::Parse("price entry missing".to_string()))?;
    let usd = entry
        .get("usd")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| HandlerError::Parse("usd price missing".to_string()))?;
    let change_24h = entry
        .get("usd_24h_change")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Ok(UsdPrice { usd, change_24h })
}
