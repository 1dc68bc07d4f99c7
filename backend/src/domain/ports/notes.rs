//! Driving ports for the notes workflow.
//!
//! Every operation takes the request [`Principal`] so the service can apply
//! the ownership policy before reading or writing anything.

use async_trait::async_trait;

use crate::domain::{Action, Error, Note, NoteDraft, Principal};

/// Note mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note authored by the principal.
    async fn create(&self, principal: &Principal, draft: NoteDraft) -> Result<Note, Error>;

    /// Replace the title, text and slug of an owned note.
    async fn edit(&self, principal: &Principal, slug: &str, draft: NoteDraft)
    -> Result<Note, Error>;

    /// Delete an owned note.
    async fn delete(&self, principal: &Principal, slug: &str) -> Result<Note, Error>;
}

/// Note reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// The principal's own notes, ordered by id.
    async fn list_own(&self, principal: &Principal) -> Result<Vec<Note>, Error>;

    /// Fetch an owned note for `action` (detail, edit form or delete
    /// confirmation).
    async fn note(&self, principal: &Principal, slug: &str, action: Action) -> Result<Note, Error>;
}
