//! Command JWT handling
//!
//! The platform sends a signed command JWT in the `x-oc-jwt` header. The bot
//! passes the token through to the gateway unchanged; locally we only decode
//! the claims segment to learn which command was invoked, by whom, and where.
//! Signature verification is the gateway's job, not ours.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use icpulse::{CommandArg, CommandContext};

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Malformed JWT: expected three dot-separated segments")]
    Malformed,

    #[error("Failed to decode JWT claims: {0}")]
    Decode(String),

    #[error("JWT expired")]
    Expired,
}

/// Where the command was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BotScope {
    Chat { chat: String },
    Community { community: String },
}

impl BotScope {
    /// The id alert subscriptions and demo data are keyed on.
    pub fn key(&self) -> &str {
        match self {
            BotScope::Chat { chat } => chat,
            BotScope::Community { community } => community,
        }
    }
}

/// The command payload inside the claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandPayload {
    pub name: String,
    #[serde(default)]
    pub args: Vec<CommandArg>,
    pub initiator: String,
}

/// Claims carried by a command JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandClaims {
    /// Expiry, seconds since epoch.
    pub exp: i64,
    pub bot: String,
    pub bot_api_gateway: String,
    pub scope: BotScope,
    pub command: CommandPayload,
}

impl CommandClaims {
    /// Decode the claims segment of a command JWT and check expiry.
    pub fn parse(token: &str) -> Result<Self, JwtError> {
        let claims = Self::parse_unchecked(token)?;
        if claims.exp < chrono::Utc::now().timestamp() {
            return Err(JwtError::Expired);
        }
        Ok(claims)
    }

    fn parse_unchecked(token: &str) -> Result<Self, JwtError> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_sig), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(JwtError::Malformed);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| JwtError::Decode(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| JwtError::Decode(e.to_string()))
    }

    /// Build the handler-facing command context from the claims.
    pub fn to_context(&self) -> CommandContext {
        CommandContext {
            command: self.command.name.clone(),
            args: self.command.args.clone(),
            initiator: self.command.initiator.clone(),
            chat: self.scope.key().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icpulse::ArgValue;

    fn make_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"ES256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        format!("{header}.{payload}.sig")
    }

    fn sample_claims(exp: i64) -> serde_json::Value {
        serde_json::json!({
            "exp": exp,
            "bot": "icpulse-bot",
            "bot_api_gateway": "https://gateway.example",
            "scope": { "Chat": { "chat": "chat-42" } },
            "command": {
                "name": "cycles",
                "args": [ { "name": "amount", "value": { "Decimal": 10.0 } } ],
                "initiator": "user-7"
            }
        })
    }

    #[test]
    fn parses_valid_token() {
        let exp = chrono::Utc::now().timestamp() + 300;
        let token = make_token(&sample_claims(exp));
        let claims = CommandClaims::parse(&token).unwrap();

        assert_eq!(claims.command.name, "cycles");
        assert_eq!(claims.scope.key(), "chat-42");

        let ctx = claims.to_context();
        assert_eq!(ctx.initiator, "user-7");
        assert_eq!(ctx.args[0].value, ArgValue::Decimal(10.0));
    }

    #[test]
    fn rejects_expired_token() {
        let token = make_token(&sample_claims(0));
        assert!(matches!(CommandClaims::parse(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(matches!(
            CommandClaims::parse("not-a-jwt"),
            Err(JwtError::Malformed)
        ));
        assert!(matches!(
            CommandClaims::parse("a.b.c.d"),
            Err(JwtError::Malformed)
        ));
    }

    #[test]
    fn rejects_garbage_payload() {
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(matches!(
            CommandClaims::parse(&token),
            Err(JwtError::Decode(_))
        ));
    }
}
