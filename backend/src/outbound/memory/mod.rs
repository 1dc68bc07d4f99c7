//! In-memory repositories.
//!
//! Used when the server starts without a database URL and by integration
//! tests. Each repository keeps its rows behind a single mutex, so a
//! uniqueness check and the write it guards happen under one lock.

mod comment_repository;
mod news_repository;
mod note_repository;

pub use comment_repository::InMemoryCommentRepository;
pub use news_repository::InMemoryNewsRepository;
pub use note_repository::InMemoryNoteRepository;

use std::sync::{Mutex, MutexGuard};

/// Rows plus the next identifier to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Lock a table, reporting poisoning through the caller's error type.
fn lock<'a, T, E>(
    table: &'a Mutex<Table<T>>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, Table<T>>, E> {
    table
        .lock()
        .map_err(|err| poisoned(format!("in-memory table lock poisoned: {err}")))
}
