//! Tests for the news service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCommentRepository, MockNewsRepository};
use crate::domain::{ErrorCode, UserId, WARNING};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn author() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id")
}

#[fixture]
fn reader() -> UserId {
    UserId::new("9b2c1a5e-0f51-4d6c-8f1a-6c2a8e1d4b7f").expect("fixture id")
}

type Service = NewsService<MockNewsRepository, MockCommentRepository>;

fn make_service(news: MockNewsRepository, comments: MockCommentRepository) -> Service {
    NewsService::new(
        Arc::new(news),
        Arc::new(comments),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn news_item(id: i64, date: NaiveDate) -> News {
    News {
        id: NewsId::new(id),
        title: format!("Новость {id}"),
        text: "Просто текст.".to_owned(),
        date,
    }
}

fn today() -> NaiveDate {
    fixture_timestamp().date_naive()
}

fn stored_comment(author: &UserId) -> Comment {
    Comment {
        id: CommentId::new(5),
        news: NewsId::new(1),
        text: "Текст комментария".to_owned(),
        author: author.clone(),
        created: fixture_timestamp() - Duration::days(1),
    }
}

fn news_exists(repo: &mut MockNewsRepository) {
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(news_item(id.get(), today()))));
}

fn text(value: &str) -> CommentDraft {
    CommentDraft {
        text: value.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn home_page_overfetches_one_item_to_detect_more() {
    let mut news = MockNewsRepository::new();
    news.expect_list_page()
        .withf(|after, limit| after.is_none() && *limit == NEWS_COUNT_ON_HOME_PAGE + 1)
        .times(1)
        .return_once(|_, limit| {
            Ok((0..limit)
                .map(|index| {
                    let offset = i64::try_from(index).expect("small index");
                    news_item(100 - offset, today() - Duration::days(offset))
                })
                .collect())
        });

    let page = make_service(news, MockCommentRepository::new())
        .home_page(None)
        .await
        .expect("page");

    assert_eq!(page.items.len(), NEWS_COUNT_ON_HOME_PAGE);
    let next = page.next.expect("more pages").into_inner();
    assert_eq!(next.id, NewsId::new(91));
    assert_eq!(next.date, today() - Duration::days(9));
}

#[rstest]
#[tokio::test]
async fn home_page_without_extra_item_has_no_cursor() {
    let mut news = MockNewsRepository::new();
    news.expect_list_page()
        .return_once(|_, _| Ok(vec![news_item(1, today())]));

    let page = make_service(news, MockCommentRepository::new())
        .home_page(None)
        .await
        .expect("page");

    assert_eq!(page.items.len(), 1);
    assert!(page.next.is_none());
}

#[rstest]
#[tokio::test]
async fn detail_of_missing_news_is_not_found() {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().return_once(|_| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_list_for_news().never();

    let err = make_service(news, comments)
        .news_detail(NewsId::new(404))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_stamps_author_and_clock(author: UserId) {
    let mut news = MockNewsRepository::new();
    news_exists(&mut news);
    let expected_author = author.clone();
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .withf(move |comment| {
            comment.author == expected_author
                && comment.created == fixture_timestamp()
                && comment.news == NewsId::new(1)
                && comment.text == "Текст комментария"
        })
        .times(1)
        .returning(|comment| {
            Ok(Comment {
                id: CommentId::new(1),
                news: comment.news,
                text: comment.text,
                author: comment.author,
                created: comment.created,
            })
        });

    let comment = make_service(news, comments)
        .create(
            &Principal::Authenticated(author.clone()),
            NewsId::new(1),
            text("Текст комментария"),
        )
        .await
        .expect("comment created");

    assert_eq!(comment.author, author);
}

#[rstest]
#[tokio::test]
async fn forbidden_words_are_rejected_every_time(author: UserId) {
    let mut news = MockNewsRepository::new();
    news_exists(&mut news);
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().never();
    let service = make_service(news, comments);
    let principal = Principal::Authenticated(author);

    for _ in 0..2 {
        let err = service
            .create(
                &principal,
                NewsId::new(1),
                text("Какой-то текст, редиска, еще текст"),
            )
            .await
            .expect_err("bad words");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), WARNING);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "text");
        assert_eq!(details["form"]["text"], "Какой-то текст, редиска, еще текст");
    }
}

#[rstest]
#[tokio::test]
async fn create_on_missing_news_is_not_found(author: UserId) {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().return_once(|_| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().never();

    let err = make_service(news, comments)
        .create(&Principal::Authenticated(author), NewsId::new(9), text("Текст"))
        .await
        .expect_err("missing news");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn anonymous_create_requires_login() {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().never();
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().never();

    let err = make_service(news, comments)
        .create(&Principal::Anonymous, NewsId::new(1), text("Текст"))
        .await
        .expect_err("anonymous");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn edit_of_foreign_comment_looks_missing(author: UserId, reader: UserId) {
    let comment = stored_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(comment)));
    comments.expect_update_text().never();

    let err = make_service(MockNewsRepository::new(), comments)
        .edit(
            &Principal::Authenticated(reader),
            CommentId::new(5),
            text("Обновлённый комментарий"),
        )
        .await
        .expect_err("foreign comment");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "comment not found");
}

#[rstest]
#[tokio::test]
async fn edit_replaces_only_the_text(author: UserId) {
    let comment = stored_comment(&author);
    let original = comment.clone();
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(comment)));
    comments
        .expect_update_text()
        .withf(|id, new_text| *id == CommentId::new(5) && new_text == "Обновлённый комментарий")
        .times(1)
        .return_once(move |_, new_text| {
            Ok(Some(Comment {
                text: new_text,
                ..original
            }))
        });

    let updated = make_service(MockNewsRepository::new(), comments)
        .edit(
            &Principal::Authenticated(author.clone()),
            CommentId::new(5),
            text("Обновлённый комментарий"),
        )
        .await
        .expect("edit succeeds");

    assert_eq!(updated.text, "Обновлённый комментарий");
    assert_eq!(updated.author, author);
    assert_eq!(updated.news, NewsId::new(1));
}

#[rstest]
#[tokio::test]
async fn edit_with_bad_words_leaves_comment_unchanged(author: UserId) {
    let comment = stored_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(comment)));
    comments.expect_update_text().never();

    let err = make_service(MockNewsRepository::new(), comments)
        .edit(
            &Principal::Authenticated(author),
            CommentId::new(5),
            text("негодяй"),
        )
        .await
        .expect_err("bad words");

    assert_eq!(err.message(), WARNING);
}

#[rstest]
#[tokio::test]
async fn delete_returns_the_removed_comment(author: UserId) {
    let comment = stored_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(comment)));
    comments
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(true));

    let removed = make_service(MockNewsRepository::new(), comments)
        .delete(&Principal::Authenticated(author), CommentId::new(5))
        .await
        .expect("deleted");

    assert_eq!(removed.news, NewsId::new(1));
}
