//! Demo store port
//!
//! The notes/tasks/shoutouts demo commands go through this interface instead
//! of process globals so tests can substitute their own store.

use crate::domain::memo::{Note, Shoutout, Task};

/// Create/list/delete operations over the in-process demo lists.
///
/// Implementations are expected to hand out auto-incrementing ids that stay
/// unique for the process lifetime.
pub trait MemoStore: Send + Sync {
    fn add_note(&self, author: &str, text: &str) -> Note;
    fn list_notes(&self, author: &str) -> Vec<Note>;
    fn remove_note(&self, author: &str, id: u64) -> bool;

    fn add_task(&self, author: &str, text: &str, due_at: Option<i64>) -> Task;
    fn list_tasks(&self, author: &str) -> Vec<Task>;
    fn remove_task(&self, author: &str, id: u64) -> bool;

    fn add_shoutout(&self, chat: &str, from: &str, to: &str) -> Shoutout;
    fn list_shoutouts(&self, chat: &str) -> Vec<Shoutout>;
}
