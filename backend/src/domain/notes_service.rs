//! Notes domain service implementing the notes driving ports.
//!
//! The service applies the ownership policy, validates drafts, and resolves a
//! unique slug before any write reaches the repository. A failed check leaves
//! the store untouched.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{
    Action, Error, NewNote, Note, NoteChanges, NoteDraft, NoteId, NoteValidationError, Principal,
    acting_user, authorize, duplicate_slug_warning, slugify,
};

const ENTITY: &str = "note";

/// Notes service backed by a [`NoteRepository`].
#[derive(Clone)]
pub struct NotesService<R> {
    repo: Arc<R>,
}

impl<R> NotesService<R> {
    /// Create a service over the given repository.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn form_of(draft: &NoteDraft) -> Value {
    json!({
        "title": draft.title,
        "text": draft.text,
        "slug": draft.slug,
    })
}

fn validation_error(error: &NoteValidationError, draft: &NoteDraft) -> Error {
    Error::field(error.field(), error.code(), error.to_string(), form_of(draft))
}

fn duplicate_slug_error(slug: &str, draft: &NoteDraft) -> Error {
    Error::field(
        "slug",
        "duplicate_slug",
        duplicate_slug_warning(slug),
        form_of(draft),
    )
}

fn map_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
        NoteRepositoryError::DuplicateSlug { slug } => {
            Error::conflict(duplicate_slug_warning(&slug))
        }
    }
}

fn map_write_error(error: NoteRepositoryError, draft: &NoteDraft) -> Error {
    match error {
        NoteRepositoryError::DuplicateSlug { slug } => duplicate_slug_error(&slug, draft),
        other => map_repository_error(other),
    }
}

fn ownership_action(action: Action) -> Action {
    match action {
        Action::Edit | Action::Delete => action,
        _ => Action::ViewDetail,
    }
}

impl<R> NotesService<R>
where
    R: NoteRepository,
{
    /// Pick the slug for `draft` and make sure no other note uses it.
    async fn resolve_slug(&self, draft: &NoteDraft, excluding: Option<NoteId>) -> Result<String, Error> {
        let slug = match draft.requested_slug() {
            Some(requested) => requested.to_owned(),
            None => slugify(&draft.title),
        };
        if slug.is_empty() {
            return Err(validation_error(&NoteValidationError::UnderivableSlug, draft));
        }
        let taken = self
            .repo
            .slug_exists(&slug, excluding)
            .await
            .map_err(map_repository_error)?;
        if taken {
            return Err(duplicate_slug_error(&slug, draft));
        }
        Ok(slug)
    }

    async fn owned_note(&self, principal: &Principal, slug: &str, action: Action) -> Result<Note, Error> {
        let note = self
            .repo
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?;
        authorize(principal, note.as_ref().map(|note| &note.author), action).into_result(ENTITY)?;
        note.ok_or_else(|| Error::not_found(format!("{ENTITY} not found")))
    }
}

#[async_trait]
impl<R> NotesCommand for NotesService<R>
where
    R: NoteRepository,
{
    async fn create(&self, principal: &Principal, draft: NoteDraft) -> Result<Note, Error> {
        let author = acting_user(principal, Action::Create)?;
        draft
            .validate()
            .map_err(|err| validation_error(&err, &draft))?;
        let slug = self.resolve_slug(&draft, None).await?;

        let new_note = NewNote {
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug,
            author: author.clone(),
        };
        let note = self
            .repo
            .insert(new_note)
            .await
            .map_err(|err| map_write_error(err, &draft))?;
        info!(note_id = %note.id, slug = %note.slug, "note created");
        Ok(note)
    }

    async fn edit(&self, principal: &Principal, slug: &str, draft: NoteDraft) -> Result<Note, Error> {
        let current = self.owned_note(principal, slug, Action::Edit).await?;
        draft
            .validate()
            .map_err(|err| validation_error(&err, &draft))?;
        let slug = self.resolve_slug(&draft, Some(current.id)).await?;

        let changes = NoteChanges {
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug,
        };
        let note = self
            .repo
            .update(current.id, changes)
            .await
            .map_err(|err| map_write_error(err, &draft))?
            .ok_or_else(|| Error::not_found(format!("{ENTITY} not found")))?;
        info!(note_id = %note.id, slug = %note.slug, "note updated");
        Ok(note)
    }

    async fn delete(&self, principal: &Principal, slug: &str) -> Result<Note, Error> {
        let note = self.owned_note(principal, slug, Action::Delete).await?;
        let removed = self
            .repo
            .delete(note.id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("{ENTITY} not found")));
        }
        info!(note_id = %note.id, "note deleted");
        Ok(note)
    }
}

#[async_trait]
impl<R> NotesQuery for NotesService<R>
where
    R: NoteRepository,
{
    async fn list_own(&self, principal: &Principal) -> Result<Vec<Note>, Error> {
        let author = acting_user(principal, Action::ViewList)?;
        self.repo
            .list_by_author(author)
            .await
            .map_err(map_repository_error)
    }

    async fn note(&self, principal: &Principal, slug: &str, action: Action) -> Result<Note, Error> {
        self.owned_note(principal, slug, ownership_action(action))
            .await
    }
}

#[cfg(test)]
#[path = "notes_service_tests.rs"]
mod tests;
