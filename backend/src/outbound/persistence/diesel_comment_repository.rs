//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewComment, NewsId};

use super::error_mapping::map_basic_diesel_error;
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Comment::from))
    }

    async fn list_for_news(&self, news: NewsId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::news_id.eq(news.get()))
            .order((comments::created.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            news_id: comment.news.get(),
            text: &comment.text,
            author: *comment.author.as_uuid(),
            created: comment.created,
        };
        let stored = diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: String,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(comments::table.find(id.get()))
            .set(comments::text.eq(text))
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(updated.map(Comment::from))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
