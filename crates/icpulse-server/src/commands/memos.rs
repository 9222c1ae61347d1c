//! Demo memo commands: notes, tasks, shoutouts
//!
//! All state lives behind the injected [`MemoStore`]; notes and tasks are
//! scoped to the invoking user, shoutouts to the chat.

use icpulse::format::format_timestamp;
use icpulse::{CommandContext, HandlerError, MemoStore};

/// `note_add`
pub fn note_add(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let text = ctx.string_arg("text")?;
    let note = store.add_note(&ctx.initiator, text);
    Ok(format!("\u{1F4DD} Note {} saved", note.id))
}

/// `note_list`
pub fn note_list(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let notes = store.list_notes(&ctx.initiator);
    if notes.is_empty() {
        return Ok("You have no notes yet. Add one with /note_add".to_string());
    }
    let mut msg = String::from("\u{1F4DD} **Your notes**\n");
    for note in notes {
        msg.push_str(&format!("\n{}. {}", note.id, note.text));
    }
    Ok(msg)
}

/// `note_remove`
pub fn note_remove(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = positive_id(ctx)?;
    if store.remove_note(&ctx.initiator, id) {
        Ok(format!("\u{1F5D1} Note {id} removed"))
    } else {
        Ok(format!("No note with id {id}"))
    }
}

/// `task_add`
pub fn task_add(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let text = ctx.string_arg("text")?;
    let due_at = ctx.opt_datetime_arg("due").map(|ms| ms / 1000);
    let task = store.add_task(&ctx.initiator, text, due_at);
    match task.due_at {
        Some(due) => Ok(format!(
            "\u{2705} Task {} saved, due {}",
            task.id,
            format_timestamp(due)
        )),
        None => Ok(format!("\u{2705} Task {} saved", task.id)),
    }
}

/// `task_list`
pub fn task_list(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let tasks = store.list_tasks(&ctx.initiator);
    if tasks.is_empty() {
        return Ok("You have no tasks. Add one with /task_add".to_string());
    }
    let mut msg = String::from("\u{2705} **Your tasks**\n");
    for task in tasks {
        match task.due_at {
            Some(due) => msg.push_str(&format!(
                "\n{}. {} (due {})",
                task.id,
                task.text,
                format_timestamp(due)
            )),
            None => msg.push_str(&format!("\n{}. {}", task.id, task.text)),
        }
    }
    Ok(msg)
}

/// `task_remove`
pub fn task_remove(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let id = positive_id(ctx)?;
    if store.remove_task(&ctx.initiator, id) {
        Ok(format!("\u{1F5D1} Task {id} removed"))
    } else {
        Ok(format!("No task with id {id}"))
    }
}

/// `shoutout` - public thanks to another user, recorded per chat.
pub fn shoutout(store: &dyn MemoStore, ctx: &CommandContext) -> Result<String, HandlerError> {
    let to = ctx.user_arg("user")?;
    let entry = store.add_shoutout(&ctx.chat, &ctx.initiator, to);
    let count = store.list_shoutouts(&ctx.chat).len();
    Ok(format!(
        "\u{1F4E3} Shoutout to @UserId({}) from @UserId({})! \
         This chat has given {count} shoutouts.",
        entry.to, entry.from,
    ))
}

fn positive_id(ctx: &CommandContext) -> Result<u64, HandlerError> {
    let id = ctx.integer_arg("id")?;
    u64::try_from(id).map_err(|_| HandlerError::InvalidArgument("id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use icpulse::{ArgValue, CommandArg};

    fn ctx(command: &str, args: Vec<(&str, ArgValue)>) -> CommandContext {
        CommandContext {
            command: command.to_string(),
            args: args
                .into_iter()
                .map(|(name, value)| CommandArg {
                    name: name.to_string(),
                    value,
                })
                .collect(),
            initiator: "user-1".to_string(),
            chat: "chat-1".to_string(),
        }
    }

    #[test]
    fn note_lifecycle() {
        let store = InMemoryStore::new();
        let add = ctx("note_add", vec![("text", ArgValue::String("buy milk".into()))]);
        let saved = note_add(&store, &add).unwrap();
        assert!(saved.contains("Note 1 saved"));

        let listed = note_list(&store, &add).unwrap();
        assert!(listed.contains("1. buy milk"));

        let remove = ctx("note_remove", vec![("id", ArgValue::Integer(1))]);
        assert!(note_remove(&store, &remove).unwrap().contains("removed"));
        assert!(note_list(&store, &remove).unwrap().contains("no notes"));
    }

    #[test]
    fn removing_missing_note_is_soft() {
        let store = InMemoryStore::new();
        let remove = ctx("note_remove", vec![("id", ArgValue::Integer(99))]);
        assert_eq!(note_remove(&store, &remove).unwrap(), "No note with id 99");
    }

    #[test]
    fn task_due_date_is_rendered() {
        let store = InMemoryStore::new();
        let add = ctx(
            "task_add",
            vec![
                ("text", ArgValue::String("ship release".into())),
                ("due", ArgValue::DateTime(0)),
            ],
        );
        let saved = task_add(&store, &add).unwrap();
        assert!(saved.contains("due 1970-01-01 00:00 UTC"));
    }

    #[test]
    fn shoutouts_count_per_chat() {
        let store = InMemoryStore::new();
        let c = ctx("shoutout", vec![("user", ArgValue::User("user-2".into()))]);
        let msg = shoutout(&store, &c).unwrap();
        assert!(msg.contains("@UserId(user-2)"));
        assert!(msg.contains("1 shoutouts"));
        let msg = shoutout(&store, &c).unwrap();
        assert!(msg.contains("2 shoutouts"));
    }
}
