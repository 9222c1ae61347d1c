//! Command invocation model
//!
//! A command arrives from the chat platform as a name plus a small list of
//! typed arguments. Argument values are a tagged union; handlers pattern-match
//! through the typed accessors below rather than poking at raw JSON.

use serde::{Deserialize, Serialize};

use crate::domain::errors::HandlerError;

/// Tagged union of argument value kinds supported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    /// A user reference (platform user id).
    User(String),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
}

/// A named command argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub value: ArgValue,
}

/// A parsed command invocation plus its originating scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandContext {
    /// Command name as registered in the bot definition.
    pub command: String,
    #[serde(default)]
    pub args: Vec<CommandArg>,
    /// User id of the invoking user.
    pub initiator: String,
    /// Chat (or channel) the command was issued in. Alert subscriptions and
    /// demo memos are keyed on this.
    pub chat: String,
}

impl CommandContext {
    fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    /// Required string argument.
    pub fn string_arg(&self, name: &str) -> Result<&str, HandlerError> {
        match self.arg(name) {
            Some(ArgValue::String(s)) if !s.trim().is_empty() => Ok(s),
            Some(_) => Err(HandlerError::InvalidArgument(name.to_string())),
            None => Err(HandlerError::MissingArgument(name.to_string())),
        }
    }

    /// Optional string argument.
    pub fn opt_string_arg(&self, name: &str) -> Option<&str> {
        match self.arg(name) {
            Some(ArgValue::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// Required integer argument.
    pub fn integer_arg(&self, name: &str) -> Result<i64, HandlerError> {
        match self.arg(name) {
            Some(ArgValue::Integer(n)) => Ok(*n),
            Some(_) => Err(HandlerError::InvalidArgument(name.to_string())),
            None => Err(HandlerError::MissingArgument(name.to_string())),
        }
    }

    /// Optional integer argument.
    pub fn opt_integer_arg(&self, name: &str) -> Option<i64> {
        match self.arg(name) {
            Some(ArgValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Required decimal argument. An integer value is accepted and widened.
    pub fn decimal_arg(&self, name: &str) -> Result<f64, HandlerError> {
        match self.arg(name) {
            Some(ArgValue::Decimal(v)) => Ok(*v),
            Some(ArgValue::Integer(n)) => Ok(*n as f64),
            Some(_) => Err(HandlerError::InvalidArgument(name.to_string())),
            None => Err(HandlerError::MissingArgument(name.to_string())),
        }
    }

    /// Required user-reference argument.
    pub fn user_arg(&self, name: &str) -> Result<&str, HandlerError> {
        match self.arg(name) {
            Some(ArgValue::User(id)) => Ok(id),
            Some(_) => Err(HandlerError::InvalidArgument(name.to_string())),
            None => Err(HandlerError::MissingArgument(name.to_string())),
        }
    }

    /// Optional datetime argument (milliseconds since epoch).
    pub fn opt_datetime_arg(&self, name: &str) -> Option<i64> {
        match self.arg(name) {
            Some(ArgValue::DateTime(ms)) => Some(*ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(args: Vec<CommandArg>) -> CommandContext {
        CommandContext {
            command: "test".to_string(),
            args,
            initiator: "user-1".to_string(),
            chat: "chat-1".to_string(),
        }
    }

    #[test]
    fn string_arg_present() {
        let c = ctx(vec![CommandArg {
            name: "ledger".to_string(),
            value: ArgValue::String("ryjl3-tyaaa-aaaaa-aaaba-cai".to_string()),
        }]);
        assert_eq!(c.string_arg("ledger").unwrap(), "ryjl3-tyaaa-aaaaa-aaaba-cai");
    }

    #[test]
    fn string_arg_missing() {
        let c = ctx(vec![]);
        assert!(matches!(
            c.string_arg("ledger"),
            Err(HandlerError::MissingArgument(_))
        ));
    }

    #[test]
    fn string_arg_blank_is_missing_shaped_invalid() {
        let c = ctx(vec![CommandArg {
            name: "q".to_string(),
            value: ArgValue::String("   ".to_string()),
        }]);
        assert!(matches!(
            c.string_arg("q"),
            Err(HandlerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn decimal_accepts_integer() {
        let c = ctx(vec![CommandArg {
            name: "amount".to_string(),
            value: ArgValue::Integer(10),
        }]);
        assert_eq!(c.decimal_arg("amount").unwrap(), 10.0);
    }

    #[test]
    fn wrong_kind_is_invalid() {
        let c = ctx(vec![CommandArg {
            name: "id".to_string(),
            value: ArgValue::String("abc".to_string()),
        }]);
        assert!(matches!(
            c.integer_arg("id"),
            Err(HandlerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn user_arg_roundtrip() {
        let c = ctx(vec![CommandArg {
            name: "user".to_string(),
            value: ArgValue::User("abcde-fghij".to_string()),
        }]);
        assert_eq!(c.user_arg("user").unwrap(), "abcde-fghij");
    }
}
