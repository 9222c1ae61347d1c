//! Handler error taxonomy
//!
//! Every failure a command handler can hit is funneled into one of these
//! variants at the handler boundary. The dispatcher converts the variant into
//! a user-visible ephemeral message via [`HandlerError::user_message`]; nothing
//! here ever surfaces as a non-2xx response to the chat platform.

use thiserror::Error;

/// Errors produced inside command handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The outbound call exceeded its per-request timeout.
    #[error("Upstream request timed out")]
    Timeout,

    /// Connect-level failure before any HTTP status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream returned a non-success HTTP status.
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// A feature's API key or endpoint is not configured.
    #[error("Service not configured: {0}")]
    NotConfigured(String),
}

impl HandlerError {
    /// The friendly text rendered into the ephemeral error message.
    ///
    /// Upstream statuses are bucketed (404 / 422 / 5xx / other) so the user can
    /// tell a bad id from an upstream outage.
    pub fn user_message(&self) -> String {
        match self {
            HandlerError::MissingArgument(name) => {
                format!("Missing required argument: {name}")
            }
            HandlerError::InvalidArgument(name) => {
                format!("Invalid value for argument: {name}")
            }
            HandlerError::Timeout => {
                "The data service took too long to respond. Please try again in a moment."
                    .to_string()
            }
            HandlerError::Network(_) => {
                "Could not reach the data service. Please try again later.".to_string()
            }
            HandlerError::UpstreamStatus(404) => {
                "No data found for that request. Double-check the id and try again.".to_string()
            }
            HandlerError::UpstreamStatus(422) => {
                "The data service rejected the request. Check the argument format.".to_string()
            }
            HandlerError::UpstreamStatus(code) if *code >= 500 => {
                "The data service is having trouble right now. Please try again later.".to_string()
            }
            HandlerError::UpstreamStatus(code) => {
                format!("The data service returned an unexpected status ({code}).")
            }
            HandlerError::Parse(_) => {
                "Received an unexpected response from the data service.".to_string()
            }
            HandlerError::Llm(_) => {
                "The AI service could not complete the request. Please try again.".to_string()
            }
            HandlerError::NotConfigured(what) => {
                format!("This command is unavailable: {what} is not configured.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_text_differs_from_status_buckets() {
        let timeout = HandlerError::Timeout.user_message();
        let not_found = HandlerError::UpstreamStatus(404).user_message();
        let server = HandlerError::UpstreamStatus(503).user_message();
        assert_ne!(timeout, not_found);
        assert_ne!(not_found, server);
        assert!(timeout.contains("too long"));
    }

    #[test]
    fn five_xx_bucket_is_uniform() {
        assert_eq!(
            HandlerError::UpstreamStatus(500).user_message(),
            HandlerError::UpstreamStatus(502).user_message()
        );
    }

    #[test]
    fn validation_names_the_argument() {
        let msg = HandlerError::MissingArgument("neuron_id".to_string()).user_message();
        assert!(msg.contains("neuron_id"));
    }
}
