//! Outbound HTTP call policy
//!
//! Every upstream call goes through here: a fixed per-request timeout, status
//! bucketing into [`HandlerError`], and an optional fixed retry schedule.
//! Retries apply to connect-level and timeout failures only; an HTTP status of
//! any kind (404 included) fails immediately.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::domain::errors::HandlerError;

/// Retries attempted after the initial call.
pub const MAX_RETRIES: u32 = 3;

/// Delay before retry `attempt` (1-based): 2000, 4000, 6000 ms.
pub fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(attempt as u64 * 2000)
}

/// Whether a failure is eligible for retry under the fixed policy.
pub fn is_retryable(err: &HandlerError) -> bool {
    matches!(err, HandlerError::Timeout | HandlerError::Network(_))
}

fn map_send_error(err: reqwest::Error) -> HandlerError {
    if err.is_timeout() {
        HandlerError::Timeout
    } else {
        HandlerError::Network(err.to_string())
    }
}

/// Single GET returning parsed JSON, with the given timeout.
pub async fn get_json(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Value, HandlerError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(map_send_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(HandlerError::UpstreamStatus(status.as_u16()));
    }

    response
        .json()
        .await
        .map_err(|e| HandlerError::Parse(e.to_string()))
}

/// Single GET returning the raw body as text (plain-text ledger endpoints).
pub async fn get_text(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, HandlerError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(map_send_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(HandlerError::UpstreamStatus(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| HandlerError::Parse(e.to_string()))
}

/// GET with the fixed retry schedule applied on retryable failures.
pub async fn get_json_with_retry(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Value, HandlerError> {
    let mut last_err = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = retry_delay(attempt);
            tracing::warn!(url = %url, attempt = %attempt, delay_ms = %delay.as_millis(), "retrying upstream call");
            tokio::time::sleep(delay).await;
        }

        match get_json(client, url, timeout).await {
            Ok(value) => return Ok(value),
            Err(err) if is_retryable(&err) => {
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_err.unwrap_or(HandlerError::Timeout))
}
