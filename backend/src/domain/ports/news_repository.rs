//! Driven port for news persistence.

use async_trait::async_trait;

use crate::domain::{NewNews, News, NewsCursorKey, NewsId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by news repository adapters.
    pub enum NewsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "news repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "news repository query failed: {message}",
    }
}

/// Port for news storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Fetch a news item by id.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsRepositoryError>;

    /// List up to `limit` items newest first, starting after `after`.
    async fn list_page(
        &self,
        after: Option<NewsCursorKey>,
        limit: usize,
    ) -> Result<Vec<News>, NewsRepositoryError>;

    /// Store a news item.
    async fn insert(&self, news: NewNews) -> Result<News, NewsRepositoryError>;
}
