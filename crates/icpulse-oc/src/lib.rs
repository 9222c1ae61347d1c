//! OpenChat integration for ICPulse
//!
//! Thin wrapper over the OpenChat bot surface: command-JWT claim extraction,
//! chat-message construction with the ephemeral/finalised lifecycle, and the
//! gateway client used to push finalised messages.

pub mod client;
pub mod jwt;
pub mod message;

pub use client::{DeliveryError, OcClient, OcClientFactory};
pub use jwt::{BotScope, CommandClaims, JwtError};
pub use message::{Message, MessageContent};
