//! PostgreSQL-backed `NoteRepository`.
//!
//! The unique index on `notes.slug` is the real guard against duplicate slugs;
//! a violation surfaces as [`NoteRepositoryError::DuplicateSlug`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NewNote, Note, NoteChanges, NoteId, UserId};

use super::error_mapping::{DbFailure, NOTES_SLUG_CONSTRAINT, classify, map_basic_diesel_error};
use super::models::{NewNoteRow, NoteRow, NoteUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Diesel implementation of the note repository port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NoteRepositoryError {
    NoteRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> NoteRepositoryError {
    map_basic_diesel_error(
        error,
        NoteRepositoryError::query,
        NoteRepositoryError::connection,
    )
}

/// Map a failed insert or update, recognising slug collisions.
fn map_write_error(error: diesel::result::Error, slug: &str) -> NoteRepositoryError {
    match classify(error) {
        DbFailure::UniqueViolation { constraint }
            if constraint.as_deref().is_none_or(|name| name == NOTES_SLUG_CONSTRAINT) =>
        {
            NoteRepositoryError::duplicate_slug(slug)
        }
        DbFailure::UniqueViolation { .. } => {
            NoteRepositoryError::query("unique constraint violated")
        }
        DbFailure::Connection(message) => NoteRepositoryError::connection(message),
        DbFailure::Query(message) => NoteRepositoryError::query(message),
    }
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = notes::table
            .filter(notes::slug.eq(slug))
            .select(NoteRow::as_select())
            .first::<NoteRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Note::from))
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NoteRow> = notes::table
            .filter(notes::author.eq(author.as_uuid()))
            .order(notes::id.asc())
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn slug_exists(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = notes::table.filter(notes::slug.eq(slug)).into_boxed();
        if let Some(id) = excluding {
            query = query.filter(notes::id.ne(id.get()));
        }
        diesel::select(diesel::dsl::exists(query))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, note: NewNote) -> Result<Note, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            title: &note.title,
            text: &note.text,
            slug: &note.slug,
            author: *note.author.as_uuid(),
        };
        let stored = diesel::insert_into(notes::table)
            .values(&row)
            .returning(NoteRow::as_returning())
            .get_result::<NoteRow>(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &note.slug))?;
        Ok(stored.into())
    }

    async fn update(
        &self,
        id: NoteId,
        changes: NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = NoteUpdate {
            title: &changes.title,
            text: &changes.text,
            slug: &changes.slug,
        };
        let updated = diesel::update(notes::table.filter(notes::id.eq(id.get())))
            .set(&changeset)
            .returning(NoteRow::as_returning())
            .get_result::<NoteRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, &changes.slug))?;
        Ok(updated.map(Note::from))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(notes::table.filter(notes::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
