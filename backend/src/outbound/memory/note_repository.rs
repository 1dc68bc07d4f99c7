//! In-memory `NoteRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{NewNote, Note, NoteChanges, NoteId, UserId, is_visible_to, note_order};

use super::{Table, lock};

/// Notes held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    table: Mutex<Table<Note>>,
}

impl InMemoryNoteRepository {
    fn slug_taken(rows: &[Note], slug: &str, excluding: Option<NoteId>) -> bool {
        rows.iter()
            .any(|note| note.slug == slug && Some(note.id) != excluding)
    }

    /// Number of stored notes.
    ///
    /// # Errors
    /// Fails only when the table lock is poisoned.
    pub fn count(&self) -> Result<usize, NoteRepositoryError> {
        Ok(lock(&self.table, NoteRepositoryError::query)?.rows.len())
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        Ok(table.rows.iter().find(|note| note.slug == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        let mut notes: Vec<Note> = table
            .rows
            .iter()
            .filter(|note| is_visible_to(note, author))
            .cloned()
            .collect();
        notes.sort_by(note_order);
        Ok(notes)
    }

    async fn slug_exists(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> Result<bool, NoteRepositoryError> {
        let table = lock(&self.table, NoteRepositoryError::query)?;
        Ok(Self::slug_taken(&table.rows, slug, excluding))
    }

    async fn insert(&self, note: NewNote) -> Result<Note, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        if Self::slug_taken(&table.rows, &note.slug, None) {
            return Err(NoteRepositoryError::duplicate_slug(note.slug));
        }
        let stored = Note {
            id: NoteId::new(table.allocate_id()),
            title: note.title,
            text: note.text,
            slug: note.slug,
            author: note.author,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: NoteId,
        changes: NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        if Self::slug_taken(&table.rows, &changes.slug, Some(id)) {
            return Err(NoteRepositoryError::duplicate_slug(changes.slug));
        }
        let Some(note) = table.rows.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        note.title = changes.title;
        note.text = changes.text;
        note.slug = changes.slug;
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteRepositoryError> {
        let mut table = lock(&self.table, NoteRepositoryError::query)?;
        let before = table.rows.len();
        table.rows.retain(|note| note.id != id);
        Ok(table.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryNoteRepository {
        InMemoryNoteRepository::default()
    }

    fn new_note(slug: &str, author: &UserId) -> NewNote {
        NewNote {
            title: "Заголовок".to_owned(),
            text: "Текст".to_owned(),
            slug: slug.to_owned(),
            author: author.clone(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_increasing_ids(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let first = repo.insert(new_note("a", &author)).await.expect("first");
        let second = repo.insert(new_note("b", &author)).await.expect("second");
        assert!(first.id < second.id);
        assert_eq!(repo.count().expect("count"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_slug_is_rejected_without_writing(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        repo.insert(new_note("taken", &author)).await.expect("first");

        let err = repo
            .insert(new_note("taken", &UserId::random()))
            .await
            .expect_err("duplicate");

        assert_eq!(err, NoteRepositoryError::duplicate_slug("taken"));
        assert_eq!(repo.count().expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_may_keep_its_own_slug(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let note = repo.insert(new_note("mine", &author)).await.expect("insert");
        repo.insert(new_note("other", &author)).await.expect("insert");

        let kept = repo
            .update(
                note.id,
                NoteChanges {
                    title: "Новый".to_owned(),
                    text: "Новый текст".to_owned(),
                    slug: "mine".to_owned(),
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(kept.title, "Новый");
        assert_eq!(kept.author, author);

        let clash = repo
            .update(
                note.id,
                NoteChanges {
                    title: "Новый".to_owned(),
                    text: "Новый текст".to_owned(),
                    slug: "other".to_owned(),
                },
            )
            .await
            .expect_err("clash");
        assert!(matches!(clash, NoteRepositoryError::DuplicateSlug { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_scoped_to_author(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let stranger = UserId::random();
        repo.insert(new_note("one", &author)).await.expect("insert");
        repo.insert(new_note("two", &stranger)).await.expect("insert");
        repo.insert(new_note("three", &author)).await.expect("insert");

        let slugs: Vec<String> = repo
            .list_by_author(&author)
            .await
            .expect("list")
            .into_iter()
            .map(|note| note.slug)
            .collect();

        assert_eq!(slugs, vec!["one", "three"]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_went(repo: InMemoryNoteRepository) {
        let note = repo
            .insert(new_note("gone", &UserId::random()))
            .await
            .expect("insert");
        assert!(repo.delete(note.id).await.expect("delete"));
        assert!(!repo.delete(note.id).await.expect("second delete"));
        assert!(repo.find_by_slug("gone").await.expect("find").is_none());
    }
}
