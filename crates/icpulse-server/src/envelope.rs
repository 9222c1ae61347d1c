//! Response envelope
//!
//! The chat platform only renders the `message` field of the body and ignores
//! the HTTP status, so every user-facing outcome - success or failure - is
//! HTTP 200 with a `{ message }` envelope. Failures ride along as ephemeral
//! messages; a non-2xx status would make the platform show a generic error
//! instead of the friendly text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use icpulse_oc::Message;

#[derive(Serialize)]
struct MessageEnvelope {
    message: Message,
}

/// Wrap a chat message into the success envelope.
pub fn success(message: Message) -> Response {
    (StatusCode::OK, Json(MessageEnvelope { message })).into_response()
}

/// Report a failure as an ephemeral message, still HTTP 200.
pub fn ephemeral_error(text: impl Into<String>) -> Response {
    success(Message::ephemeral_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_is_http_200() {
        let response = ephemeral_error("something went wrong");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn success_envelope_is_http_200() {
        let response = success(Message::text("done"));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
