//! News and comment handlers.
//!
//! ```text
//! GET  /                            home page, newest first
//! GET  /news/{id}/  POST            detail with comments / add comment
//! GET  /edit_comment/{id}/  POST    edit form / submit
//! GET  /delete_comment/{id}/  POST  confirm / submit
//! ```
//!
//! Comment writes redirect to the news item's `#comments` anchor.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use pagination::{CURSOR_PARAM, Cursor, Paginated, PaginationLinks};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::NewsDetail;
use crate::domain::{
    Action, Comment, CommentDraft, CommentId, Error, NEWS_COUNT_ON_HOME_PAGE, News, NewsCursorKey,
    NewsId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::form::Submission;
use crate::inbound::http::redirect::{comments_url, found};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// News item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub title: String,
    pub text: String,
    #[schema(value_type = String, format = Date, example = "2026-10-19")]
    pub date: NaiveDate,
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        Self {
            id: news.id.get(),
            title: news.title,
            text: news.text,
            date: news.date,
        }
    }
}

/// Comment attached to a news item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub news: i64,
    pub text: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author: String,
    #[schema(value_type = String, format = DateTime)]
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.get(),
            news: comment.news.get(),
            text: comment.text,
            author: comment.author.to_string(),
            created: comment.created,
        }
    }
}

/// News detail page.
///
/// `commentForm` is `true` only for logged-in visitors.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetailResponse {
    pub news: NewsResponse,
    /// Oldest first.
    pub comments: Vec<CommentResponse>,
    pub comment_form: bool,
}

/// Submitted or prefilled comment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    pub text: String,
}

/// Comment edit page: the comment plus its prefilled form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentFormPage {
    pub comment: CommentResponse,
    pub form: CommentForm,
}

/// Home page JSON envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub data: Vec<NewsResponse>,
    #[schema(example = 10)]
    pub limit: usize,
    #[schema(value_type = Object)]
    pub links: PaginationLinks,
}

impl From<Paginated<NewsResponse>> for NewsPage {
    fn from(page: Paginated<NewsResponse>) -> Self {
        Self {
            data: page.data,
            limit: page.limit,
            links: page.links,
        }
    }
}

/// Query parameters of the home page.
#[derive(Debug, Deserialize, IntoParams)]
pub struct HomeQuery {
    /// Opaque cursor from `links.next` of the previous page.
    pub cursor: Option<String>,
}

fn decode_cursor(raw: Option<&str>) -> Result<Option<NewsCursorKey>, Error> {
    raw.map(|value| {
        Cursor::<NewsCursorKey>::decode(value)
            .map(Cursor::into_inner)
            .map_err(|err| {
                Error::invalid_request("invalid cursor").with_details(json!({
                    "field": CURSOR_PARAM,
                    "code": "invalid_cursor",
                    "message": err.to_string(),
                }))
            })
    })
    .transpose()
}

/// Public home page: up to ten news items, newest first.
#[utoipa::path(
    get,
    path = "/",
    params(HomeQuery),
    responses(
        (status = 200, description = "Page of news", body = NewsPage),
        (status = 400, description = "Malformed cursor", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "newsHome",
    security([])
)]
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    request: HttpRequest,
    query: web::Query<HomeQuery>,
) -> ApiResult<web::Json<NewsPage>> {
    let after = decode_cursor(query.cursor.as_deref())?;
    let page = state.news.home_page(after).await?;
    let next = page
        .next
        .map(|cursor| cursor.encode())
        .transpose()
        .map_err(|err| Error::internal(format!("failed to encode cursor: {err}")))?;
    let links = PaginationLinks::from_request(&request.full_url(), next.as_deref());
    let body = Paginated {
        data: page.items.into_iter().map(NewsResponse::from).collect(),
        limit: NEWS_COUNT_ON_HOME_PAGE,
        links,
    };
    Ok(web::Json(body.into()))
}

/// Public news detail with comments oldest first.
#[utoipa::path(
    get,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News id")),
    responses(
        (status = 200, description = "News with comments", body = NewsDetailResponse),
        (status = 404, description = "No such news", body = ErrorSchema)
    ),
    tags = ["news"],
    operation_id = "newsDetail",
    security([])
)]
#[get("/news/{id}/")]
pub async fn news_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<web::Json<NewsDetailResponse>> {
    let principal = session.principal()?;
    let NewsDetail { news, comments } = state.news.news_detail(NewsId::new(*id)).await?;
    Ok(web::Json(NewsDetailResponse {
        news: news.into(),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
        comment_form: principal.is_authenticated(),
    }))
}

/// Add a comment to a news item.
#[utoipa::path(
    post,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News id")),
    request_body = CommentForm,
    responses(
        (status = 302, description = "Created; redirects to the comments anchor, or to login when anonymous"),
        (status = 400, description = "Empty text or forbidden words", body = ErrorSchema),
        (status = 404, description = "No such news", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/news/{id}/")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    submission: Submission<CommentForm>,
) -> ApiResult<HttpResponse> {
    let Submission { principal, form } = submission;
    let news = NewsId::new(*id);
    let draft = CommentDraft { text: form.text };
    state.comments.create(&principal, news, draft).await?;
    Ok(found(&comments_url(news)))
}

/// Comment edit form prefilled with the current text.
#[utoipa::path(
    get,
    path = "/edit_comment/{id}/",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Prefilled comment form", body = CommentFormPage),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or written by someone else", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editCommentForm"
)]
#[get("/edit_comment/{id}/")]
pub async fn edit_comment_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<web::Json<CommentFormPage>> {
    let principal = session.principal()?;
    let comment = state
        .news
        .comment(&principal, CommentId::new(*id), Action::Edit)
        .await?;
    let form = CommentForm {
        text: CommentDraft::from_comment(&comment).text,
    };
    Ok(web::Json(CommentFormPage {
        comment: comment.into(),
        form,
    }))
}

/// Replace a comment's text.
#[utoipa::path(
    post,
    path = "/edit_comment/{id}/",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = CommentForm,
    responses(
        (status = 302, description = "Updated; redirects to the comments anchor, or to login when anonymous"),
        (status = 400, description = "Empty text or forbidden words", body = ErrorSchema),
        (status = 404, description = "Missing or written by someone else", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[post("/edit_comment/{id}/")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    submission: Submission<CommentForm>,
) -> ApiResult<HttpResponse> {
    let Submission { principal, form } = submission;
    let draft = CommentDraft { text: form.text };
    let comment = state
        .comments
        .edit(&principal, CommentId::new(*id), draft)
        .await?;
    Ok(found(&comments_url(comment.news)))
}

/// Comment delete confirmation page.
#[utoipa::path(
    get,
    path = "/delete_comment/{id}/",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment about to be deleted", body = CommentResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or written by someone else", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteCommentConfirm"
)]
#[get("/delete_comment/{id}/")]
pub async fn delete_comment_confirm(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<web::Json<CommentResponse>> {
    let principal = session.principal()?;
    let comment = state
        .news
        .comment(&principal, CommentId::new(*id), Action::Delete)
        .await?;
    Ok(web::Json(comment.into()))
}

/// Delete a comment.
#[utoipa::path(
    post,
    path = "/delete_comment/{id}/",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 302, description = "Deleted; redirects to the comments anchor, or to login when anonymous"),
        (status = 404, description = "Missing or written by someone else", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[post("/delete_comment/{id}/")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let comment = state
        .comments
        .delete(&principal, CommentId::new(*id))
        .await?;
    Ok(found(&comments_url(comment.news)))
}

#[cfg(test)]
#[path = "news_tests.rs"]
mod tests;
