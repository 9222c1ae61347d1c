//! In-memory demo store
//!
//! Process-lifetime lists behind a mutex; nothing survives a restart. Ids come
//! from a single atomic counter shared across entity kinds so they stay unique
//! for the process lifetime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use icpulse::{MemoStore, Note, Shoutout, Task};

#[derive(Default)]
pub struct InMemoryStore {
    next_id: AtomicU64,
    notes: Mutex<Vec<Note>>,
    tasks: Mutex<Vec<Task>>,
    shoutouts: Mutex<Vec<Shoutout>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Default::default()
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl MemoStore for InMemoryStore {
    fn add_note(&self, author: &str, text: &str) -> Note {
        let note = Note {
            id: self.next_id(),
            text: text.to_string(),
            author: author.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        };
        self.notes.lock().unwrap().push(note.clone());
        note
    }

    fn list_notes(&self, author: &str) -> Vec<Note> {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.author == author)
            .cloned()
            .collect()
    }

    fn remove_note(&self, author: &str, id: u64) -> bool {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.author == author));
        notes.len() < before
    }

    fn add_task(&self, author: &str, text: &str, due_at: Option<i64>) -> Task {
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            due_at,
            author: author.to_string(),
        };
        self.tasks.lock().unwrap().push(task.clone());
        task
    }

    fn list_tasks(&self, author: &str) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.author == author)
            .cloned()
            .collect()
    }

    fn remove_task(&self, author: &str, id: u64) -> bool {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.author == author));
        tasks.len() < before
    }

    fn add_shoutout(&self, chat: &str, from: &str, to: &str) -> Shoutout {
        let shoutout = Shoutout {
            id: self.next_id(),
            chat: chat.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        };
        self.shoutouts.lock().unwrap().push(shoutout.clone());
        shoutout
    }

    fn list_shoutouts(&self, chat: &str) -> Vec<Shoutout> {
        self.shoutouts
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.chat == chat)
            .cloned()
            .collect()
    }
}
