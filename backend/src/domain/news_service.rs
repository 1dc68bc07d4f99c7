//! News domain service: the public feed and comment moderation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, NewsDetail, NewsQuery,
    NewsRepository, NewsRepositoryError,
};
use crate::domain::{
    Action, Comment, CommentDraft, CommentId, ContentFilter, Error, NEWS_COUNT_ON_HOME_PAGE,
    NewComment, News, NewsCursorKey, NewsId, Principal, acting_user, authorize,
};

const COMMENT: &str = "comment";

/// News service backed by news and comment repositories.
#[derive(Clone)]
pub struct NewsService<N, C> {
    news_repo: Arc<N>,
    comment_repo: Arc<C>,
    filter: ContentFilter,
    clock: Arc<dyn Clock>,
}

impl<N, C> NewsService<N, C> {
    /// Create a service using the default forbidden-word list.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use noticeboard::domain::NewsService;
    /// # use noticeboard::outbound::memory::{InMemoryCommentRepository, InMemoryNewsRepository};
    /// let service = NewsService::new(
    ///     Arc::new(InMemoryNewsRepository::default()),
    ///     Arc::new(InMemoryCommentRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(news_repo: Arc<N>, comment_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            news_repo,
            comment_repo,
            filter: ContentFilter::default(),
            clock,
        }
    }

    /// Replace the content filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ContentFilter) -> Self {
        self.filter = filter;
        self
    }
}

fn map_news_error(error: NewsRepositoryError) -> Error {
    match error {
        NewsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("news repository unavailable: {message}"))
        }
        NewsRepositoryError::Query { message } => {
            Error::internal(format!("news repository error: {message}"))
        }
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

fn comment_not_found() -> Error {
    Error::not_found(format!("{COMMENT} not found"))
}

impl<N, C> NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn existing_news(&self, id: NewsId) -> Result<News, Error> {
        self.news_repo
            .find_by_id(id)
            .await
            .map_err(map_news_error)?
            .ok_or_else(|| Error::not_found("news not found"))
    }

    async fn owned_comment(&self, principal: &Principal, id: CommentId, action: Action) -> Result<Comment, Error> {
        let comment = self
            .comment_repo
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?;
        authorize(principal, comment.as_ref().map(|comment| &comment.author), action)
            .into_result(COMMENT)?;
        comment.ok_or_else(comment_not_found)
    }

    /// Validate and filter comment text, leaving the store untouched on failure.
    fn check_draft(&self, draft: &CommentDraft) -> Result<(), Error> {
        let form = json!({ "text": draft.text });
        if let Err(err) = draft.validate() {
            return Err(Error::field("text", "empty_text", err.to_string(), form));
        }
        if let Err(rejected) = self.filter.check(&draft.text) {
            return Err(Error::field(
                "text",
                "forbidden_words",
                rejected.to_string(),
                form,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<N, C> NewsQuery for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn home_page(
        &self,
        after: Option<NewsCursorKey>,
    ) -> Result<Page<News, NewsCursorKey>, Error> {
        let items = self
            .news_repo
            .list_page(after, NEWS_COUNT_ON_HOME_PAGE + 1)
            .await
            .map_err(map_news_error)?;
        Ok(Page::from_overfetch(
            items,
            NEWS_COUNT_ON_HOME_PAGE,
            |news: &News| NewsCursorKey::from(news),
        ))
    }

    async fn news_detail(&self, id: NewsId) -> Result<NewsDetail, Error> {
        let news = self.existing_news(id).await?;
        let comments = self
            .comment_repo
            .list_for_news(id)
            .await
            .map_err(map_comment_error)?;
        Ok(NewsDetail { news, comments })
    }

    async fn comment(
        &self,
        principal: &Principal,
        id: CommentId,
        action: Action,
    ) -> Result<Comment, Error> {
        let action = match action {
            Action::Delete => Action::Delete,
            _ => Action::Edit,
        };
        self.owned_comment(principal, id, action).await
    }
}

#[async_trait]
impl<N, C> CommentsCommand for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn create(
        &self,
        principal: &Principal,
        news: NewsId,
        draft: CommentDraft,
    ) -> Result<Comment, Error> {
        let author = acting_user(principal, Action::Create)?;
        self.existing_news(news).await?;
        self.check_draft(&draft)?;

        let comment = self
            .comment_repo
            .insert(NewComment {
                news,
                text: draft.text,
                author: author.clone(),
                created: self.clock.utc(),
            })
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, news_id = %news, "comment created");
        Ok(comment)
    }

    async fn edit(
        &self,
        principal: &Principal,
        id: CommentId,
        draft: CommentDraft,
    ) -> Result<Comment, Error> {
        self.owned_comment(principal, id, Action::Edit).await?;
        self.check_draft(&draft)?;

        let comment = self
            .comment_repo
            .update_text(id, draft.text)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)?;
        info!(comment_id = %comment.id, "comment updated");
        Ok(comment)
    }

    async fn delete(&self, principal: &Principal, id: CommentId) -> Result<Comment, Error> {
        let comment = self.owned_comment(principal, id, Action::Delete).await?;
        let removed = self
            .comment_repo
            .delete(id)
            .await
            .map_err(map_comment_error)?;
        if !removed {
            return Err(comment_not_found());
        }
        info!(comment_id = %comment.id, news_id = %comment.news, "comment deleted");
        Ok(comment)
    }
}

#[cfg(test)]
#[path = "news_service_tests.rs"]
mod tests;
