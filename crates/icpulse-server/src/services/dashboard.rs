//! IC dashboard API client
//!
//! Wraps the public dashboard REST API. Metric endpoints return a time series
//! under a key matching the path (`cycle-burn-rate` ->
//! `cycle_burn_rate: [[ts, value], ...]`); we only ever need the latest point.
//! Metric calls go through the retry policy; by-id lookups are single-shot so
//! a 404 comes back immediately.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use icpulse::http::{get_json, get_json_with_retry};
use icpulse::HandlerError;

const METRICS_TIMEOUT: Duration = Duration::from_secs(10);
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct DashboardApi {
    http: Client,
    base: String,
}

impl DashboardApi {
    pub fn new(http: Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3/{}", self.base.trim_end_matches('/'), path)
    }

    /// Latest point of a dashboard metric time series.
    pub async fn latest_metric(&self, metric: &str) -> Result<f64, HandlerError> {
        let url = self.url(&format!("metrics/{metric}"));
        let body = get_json_with_retry(&self.http, &url, METRICS_TIMEOUT).await?;
        let key = metric.replace('-', "_");
        latest_series_value(&body, &key)
            .ok_or_else(|| HandlerError::Parse(format!("no series for {key}")))
    }

    /// Full `[timestamp, value]` series of a dashboard metric.
    pub async fn metric_series(&self, metric: &str) -> Result<Vec<(i64, f64)>, HandlerError> {
        let url = self.url(&format!("metrics/{metric}"));
        let body = get_json_with_retry(&self.http, &url, METRICS_TIMEOUT).await?;
        let key = metric.replace('-', "_");
        series_points(&body, &key)
            .ok_or_else(|| HandlerError::Parse(format!("no series for {key}")))
    }

    /// Latest ICP/XDR conversion rate, in permyriad XDR per ICP.
    pub async fn icp_xdr_rate(&self) -> Result<f64, HandlerError> {
        let url = self.url("icp-xdr-conversion-rates");
        let body = get_json_with_retry(&self.http, &url, METRICS_TIMEOUT).await?;
        latest_series_value(&body, "icp_xdr_conversion_rates")
            .ok_or_else(|| HandlerError::Parse("no conversion rate series".to_string()))
    }

    /// Most recent NNS proposals, newest first.
    pub async fn recent_proposals(&self, limit: u32) -> Result<Vec<Value>, HandlerError> {
        let url = self.url(&format!("proposals?limit={limit}"));
        let body = get_json_with_retry(&self.http, &url, LOOKUP_TIMEOUT).await?;
        body.get("data")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| HandlerError::Parse("proposals list missing data".to_string()))
    }

    pub async fn proposal(&self, id: u64) -> Result<Value, HandlerError> {
        let url = self.url(&format!("proposals/{id}"));
        get_json(&self.http, &url, LOOKUP_TIMEOUT).await
    }

    pub async fn neuron(&self, id: u64) -> Result<Value, HandlerError> {
        let url = self.url(&format!("neurons/{id}"));
        get_json(&self.http, &url, LOOKUP_TIMEOUT).await
    }

    pub async fn canister(&self, canister_id: &str) -> Result<Value, HandlerError> {
        let url = self.url(&format!("canisters/{canister_id}"));
        get_json(&self.http, &url, LOOKUP_TIMEOUT).await
    }

    pub async fn subnet(&self, subnet_id: &str) -> Result<Value, HandlerError> {
        let url = self.url(&format!("subnets/{subnet_id}"));
        get_json(&self.http, &url, LOOKUP_TIMEOUT).await
    }
}

/// Pull the latest `[timestamp, value]` pair out of a metric response.
pub fn latest_series_value(body: &Value, key: &str) -> Option<f64> {
    let series = body.get(key)?.as_array()?;
    let last = series.last()?.as_array()?;
    point_value(last.get(1)?)
}

/// All `[timestamp, value]` pairs of a metric response, in series order.
pub fn series_points(body: &Value, key: &str) -> Option<Vec<(i64, f64)>> {
    let series = body.get(key)?.as_array()?;
    let points = series
        .iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            let ts = pair.first()?.as_i64()?;
            let value = point_value(pair.get(1)?)?;
            Some((ts, value))
        })
        .collect::<Vec<_>>();
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

// Values arrive as numbers or numeric strings depending on the endpoint.
fn point_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
