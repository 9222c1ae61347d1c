//! Demo memo entities
//!
//! In-process demonstration data only; never persisted across restarts.
//! Ids auto-increment and are unique within the process lifetime.

use serde::{Deserialize, Serialize};

/// A free-text note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub text: String,
    pub author: String,
    pub created_at: i64,
}

/// A task with an optional due date (seconds since epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub due_at: Option<i64>,
    pub author: String,
}

/// A shoutout from one user to another, scoped to the chat it was given in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoutout {
    pub id: u64,
    pub chat: String,
    pub from: String,
    pub to: String,
}
