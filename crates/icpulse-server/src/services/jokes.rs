//! Random joke API client

use std::time::Duration;

use reqwest::Client;

use icpulse::http::get_json;
use icpulse::HandlerError;

const JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";
const JOKE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct JokeApi {
    http: Client,
}

impl JokeApi {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Fetch one random joke as (setup, punchline).
    pub async fn random(&self) -> Result<(String, String), HandlerError> {
        let body = get_json(&self.http, JOKE_URL, JOKE_TIMEOUT).await?;
        let setup = body
            .get("setup")
            .and_then(|v| v.as_str())
            .ok_or_else(|| HandlerError::Parse("joke missing setup".to_string()))?;
        let punchline = body
            .get("punchline")
            .and_then(|v| v.as_str())
            .ok_or_else(|| HandlerError::Parse("joke missing punchline".to_string()))?;
        Ok((setup.to_string(), punchline.to_string()))
    }
}
