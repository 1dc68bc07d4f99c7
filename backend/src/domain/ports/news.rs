//! Driving ports for the news feed and its comments.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Action, Comment, CommentDraft, CommentId, Error, News, NewsCursorKey, NewsId, Principal,
};

/// A news item together with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDetail {
    /// The news item.
    pub news: News,
    /// Comments in display order.
    pub comments: Vec<Comment>,
}

/// Public news reads plus owned-comment lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// One page of the home listing, newest first.
    async fn home_page(
        &self,
        after: Option<NewsCursorKey>,
    ) -> Result<Page<News, NewsCursorKey>, Error>;

    /// A single news item with its comments.
    async fn news_detail(&self, id: NewsId) -> Result<NewsDetail, Error>;

    /// Fetch an owned comment for `action` (edit form or delete confirmation).
    async fn comment(
        &self,
        principal: &Principal,
        id: CommentId,
        action: Action,
    ) -> Result<Comment, Error>;
}

/// Comment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Attach a comment to an existing news item.
    async fn create(
        &self,
        principal: &Principal,
        news: NewsId,
        draft: CommentDraft,
    ) -> Result<Comment, Error>;

    /// Replace the text of an owned comment.
    async fn edit(
        &self,
        principal: &Principal,
        id: CommentId,
        draft: CommentDraft,
    ) -> Result<Comment, Error>;

    /// Delete an owned comment and return it.
    async fn delete(&self, principal: &Principal, id: CommentId) -> Result<Comment, Error>;
}
