//! Driven port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
    }
}

/// Port for comment storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch a comment by id.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// List the comments on `news`, oldest first.
    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Store a new comment.
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Replace a comment's text, leaving every other field untouched.
    ///
    /// Returns `Ok(None)` when the comment no longer exists.
    async fn update_text(
        &self,
        id: CommentId,
        text: String,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Delete a comment, returning whether a row was removed.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;
}
