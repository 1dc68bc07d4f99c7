//! Driven port for note persistence.
//!
//! Adapters must enforce slug uniqueness themselves and report collisions as
//! [`NoteRepositoryError::DuplicateSlug`]; the service-level pre-check is only
//! advisory.

use async_trait::async_trait;

use crate::domain::{NewNote, Note, NoteChanges, NoteId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } =>
            "note slug already exists: {slug}",
    }
}

/// Port for note storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch a note by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError>;

    /// List the notes written by `author`, ordered by id.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Whether any note other than `excluding` uses `slug`.
    async fn slug_exists(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError>;

    /// Store a new note and return it with its assigned id.
    async fn insert(&self, note: NewNote) -> Result<Note, NoteRepositoryError>;

    /// Replace the editable fields of a note.
    ///
    /// Returns `Ok(None)` when the note no longer exists.
    async fn update(
        &self,
        id: NoteId,
        changes: NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError>;

    /// Delete a note, returning whether a row was removed.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError>;
}
