//! In-memory `CommentRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewComment, NewsId, comment_order};

use super::{Table, lock};

/// Comments held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    table: Mutex<Table<Comment>>,
}

impl InMemoryCommentRepository {
    /// Number of stored comments.
    ///
    /// # Errors
    /// Fails only when the table lock is poisoned.
    pub fn count(&self) -> Result<usize, CommentRepositoryError> {
        Ok(lock(&self.table, CommentRepositoryError::query)?.rows.len())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let table = lock(&self.table, CommentRepositoryError::query)?;
        Ok(table.rows.iter().find(|comment| comment.id == id).cloned())
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let table = lock(&self.table, CommentRepositoryError::query)?;
        let mut comments: Vec<Comment> = table
            .rows
            .iter()
            .filter(|comment| comment.news == news)
            .cloned()
            .collect();
        comments.sort_by(comment_order);
        Ok(comments)
    }

    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        let stored = Comment {
            id: CommentId::new(table.allocate_id()),
            news: comment.news,
            text: comment.text,
            author: comment.author,
            created: comment.created,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: String,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        Ok(table
            .rows
            .iter_mut()
            .find(|comment| comment.id == id)
            .map(|comment| {
                comment.text = text;
                comment.clone()
            }))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut table = lock(&self.table, CommentRepositoryError::query)?;
        let before = table.rows.len();
        table.rows.retain(|comment| comment.id != id);
        Ok(table.rows.len() < before)
    }
}
