//! In-memory `NewsRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{NewsRepository, NewsRepositoryError};
use crate::domain::{NewNews, News, NewsCursorKey, NewsId, is_after_cursor, news_order};

use super::{Table, lock};

/// News items held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryNewsRepository {
    table: Mutex<Table<News>>,
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError> {
        let table = lock(&self.table, NewsRepositoryError::query)?;
        Ok(table.rows.iter().find(|news| news.id == id).cloned())
    }

    async fn list_page(
        &self,
        after: Option<NewsCursorKey>,
        limit: usize,
    ) -> Result<Vec<News>, NewsRepositoryError> {
        let table = lock(&self.table, NewsRepositoryError::query)?;
        let mut items: Vec<News> = table
            .rows
            .iter()
            .filter(|news| after.as_ref().is_none_or(|cursor| is_after_cursor(news, cursor)))
            .cloned()
            .collect();
        items.sort_by(news_order);
        items.truncate(limit);
        Ok(items)
    }

    async fn insert(&self, news: NewNews) -> Result<News, NewsRepositoryError> {
        let mut table = lock(&self.table, NewsRepositoryError::query)?;
        let stored = News {
            id: NewsId::new(table.allocate_id()),
            title: news.title,
            text: news.text,
            date: news.date,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }
}
