//! Bot definition route
//!
//! Served from both `/` and `/bot_definition`: the platform registration flow
//! fetches whichever the operator pastes in.

use axum::Json;

use icpulse::definition::BotDefinition;

use crate::commands;

pub async fn bot_definition() -> Json<BotDefinition> {
    Json(commands::definitions())
}
