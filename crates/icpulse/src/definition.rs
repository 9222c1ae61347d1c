//! Bot definition schema
//!
//! The declarative command descriptor the chat platform fetches from
//! `GET /bot_definition`. Pure data, no logic; the server's command registry
//! produces the concrete list.

use serde::{Deserialize, Serialize};

/// Top-level descriptor served to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotDefinition {
    pub description: String,
    pub commands: Vec<CommandDefinition>,
}

/// One command as advertised to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
    pub permissions: Permissions,
    /// Minimum chat role required to invoke the command, if restricted.
    #[serde(default)]
    pub default_role: Option<String>,
}

/// One command parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDefinition {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: ParamType,
}

/// Parameter type descriptors with their constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamType {
    StringParam {
        min_length: u32,
        max_length: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<String>,
    },
    IntegerParam {
        min_value: i64,
        max_value: i64,
    },
    DecimalParam {
        min_value: f64,
        max_value: f64,
    },
    UserParam,
    DateTimeParam,
}

/// Message permissions the bot requests for a command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub message: Vec<MessagePermission>,
}

impl Permissions {
    pub fn text() -> Self {
        Self {
            message: vec![MessagePermission::Text],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePermission {
    Text,
    Image,
}

impl CommandDefinition {
    /// Minimal text-only command with no parameters.
    pub fn text_command(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            placeholder: None,
            params: Vec::new(),
            permissions: Permissions::text(),
            default_role: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_param(mut self, param: ParamDefinition) -> Self {
        self.params.push(param);
        self
    }
}

impl ParamDefinition {
    pub fn string(name: &str, description: &str, required: bool, max_length: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required,
            param_type: ParamType::StringParam {
                min_length: 1,
                max_length,
                choices: Vec::new(),
            },
        }
    }

    pub fn string_choice(name: &str, description: &str, choices: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            param_type: ParamType::StringParam {
                min_length: 1,
                max_length: 100,
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    pub fn integer(name: &str, description: &str, required: bool, max_value: i64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required,
            param_type: ParamType::IntegerParam {
                min_value: 0,
                max_value,
            },
        }
    }

    pub fn decimal(name: &str, description: &str, max_value: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            param_type: ParamType::DecimalParam {
                min_value: 0.0,
                max_value,
            },
        }
    }

    pub fn user(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            param_type: ParamType::UserParam,
        }
    }

    pub fn datetime(name: &str, description: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required,
            param_type: ParamType::DateTimeParam,
        }
    }
}
