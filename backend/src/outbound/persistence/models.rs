//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Comment, CommentId, News, NewsId, Note, NoteId, UserId};

use super::schema::{comments, news, notes};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: Uuid,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: NoteId::new(row.id),
            title: row.title,
            text: row.text,
            slug: row.slug,
            author: UserId::from_uuid(row.author),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub slug: &'a str,
    pub author: Uuid,
}

/// Editable note columns. `author` never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = notes)]
pub(crate) struct NoteUpdate<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub slug: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewsRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        Self {
            id: NewsId::new(row.id),
            title: row.title,
            text: row.text,
            date: row.date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = news)]
pub(crate) struct NewNewsRow<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub news_id: i64,
    pub text: String,
    pub author: Uuid,
    pub created: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            news: NewsId::new(row.news_id),
            text: row.text,
            author: UserId::from_uuid(row.author),
            created: row.created,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub news_id: i64,
    pub text: &'a str,
    pub author: Uuid,
    pub created: DateTime<Utc>,
}
