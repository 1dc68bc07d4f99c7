//! PostgreSQL-backed `NewsRepository`.
//!
//! Pages use keyset pagination on `(date, id)`, both descending, matching
//! the in-memory ordering rules.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewsRepository, NewsRepositoryError};
use crate::domain::{NewNews, News, NewsCursorKey, NewsId};

use super::error_mapping::map_basic_diesel_error;
use super::models::{NewNewsRow, NewsRow};
use super::pool::{DbPool, PoolError};
use super::schema::news;

/// Diesel implementation of the news repository port.
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NewsRepositoryError {
    NewsRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> NewsRepositoryError {
    map_basic_diesel_error(
        error,
        NewsRepositoryError::query,
        NewsRepositoryError::connection,
    )
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = news::table
            .find(id.get())
            .select(NewsRow::as_select())
            .first::<NewsRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(News::from))
    }

    async fn list_page(
        &self,
        after: Option<NewsCursorKey>,
        limit: usize,
    ) -> Result<Vec<News>, NewsRepositoryError> {
        let limit = i64::try_from(limit)
            .map_err(|_| NewsRepositoryError::query("page limit out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = news::table
            .select(NewsRow::as_select())
            .order((news::date.desc(), news::id.desc()))
            .limit(limit)
            .into_boxed();
        if let Some(cursor) = after {
            query = query.filter(
                news::date
                    .lt(cursor.date)
                    .or(news::date.eq(cursor.date).and(news::id.lt(cursor.id.get()))),
            );
        }

        let rows: Vec<NewsRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    async fn insert(&self, item: NewNews) -> Result<News, NewsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNewsRow {
            title: &item.title,
            text: &item.text,
            date: item.date,
        };
        let stored = diesel::insert_into(news::table)
            .values(&row)
            .returning(NewsRow::as_returning())
            .get_result::<NewsRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }
}
