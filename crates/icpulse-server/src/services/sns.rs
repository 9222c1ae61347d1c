//! SNS registry API client

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use icpulse::http::get_json;
use icpulse::HandlerError;

const SNS_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct SnsApi {
    http: Client,
    base: String,
}

impl SnsApi {
    pub fn new(http: Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base.trim_end_matches('/'), path)
    }

    /// First page of registered SNS DAOs.
    pub async fn list(&self, limit: u32) -> Result<Vec<Value>, HandlerError> {
        let body = get_json(
            &self.http,
            &self.url(&format!("snses?limit={limit}&offset=0")),
            SNS_TIMEOUT,
        )
        .await?;
        body.get("data")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| HandlerError::Parse("SNS list missing data".to_string()))
    }

    /// One SNS by root canister id.
    pub async fn get(&self, root_canister_id: &str) -> Result<Value, HandlerError> {
        get_json(
            &self.http,
            &self.url(&format!("snses/{root_canister_id}")),
            SNS_TIMEOUT,
        )
        .await
    }
}
