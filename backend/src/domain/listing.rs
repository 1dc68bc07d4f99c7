//! Ordering and scoping rules for collections.
//!
//! Storage adapters apply these rules when answering list queries: the
//! in-memory adapter uses the comparators directly and the SQL adapter mirrors
//! them in `ORDER BY` clauses.

use std::cmp::Ordering;

use super::{Comment, News, NewsCursorKey, Note, UserId};

/// Number of news items on each page of the home listing.
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

/// News order: newest date first, then highest id first.
#[must_use]
pub fn news_order(a: &News, b: &News) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

/// Whether `news` sorts strictly after the cursor position.
#[must_use]
pub fn is_after_cursor(news: &News, cursor: &NewsCursorKey) -> bool {
    (news.date, news.id) < (cursor.date, cursor.id)
}

/// Comment order: oldest first, then lowest id first.
#[must_use]
pub fn comment_order(a: &Comment, b: &Comment) -> Ordering {
    a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id))
}

/// Note order within an author's list: by id.
#[must_use]
pub fn note_order(a: &Note, b: &Note) -> Ordering {
    a.id.cmp(&b.id)
}

/// Whether `note` belongs in `author`'s list.
#[must_use]
pub fn is_visible_to(note: &Note, author: &UserId) -> bool {
    &note.author == author
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommentId, NewsId, NoteId};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    fn news(id: i64, date: NaiveDate) -> News {
        News {
            id: NewsId::new(id),
            title: format!("Новость {id}"),
            text: "Просто текст.".to_owned(),
            date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[rstest]
    fn news_is_sorted_newest_first_with_id_tiebreak() {
        let mut items = vec![
            news(1, today() - Duration::days(1)),
            news(2, today()),
            news(3, today()),
        ];
        items.sort_by(news_order);
        let ids: Vec<i64> = items.iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[rstest]
    fn cursor_excludes_seen_items() {
        let cursor = NewsCursorKey {
            date: today(),
            id: NewsId::new(2),
        };
        assert!(!is_after_cursor(&news(3, today()), &cursor));
        assert!(!is_after_cursor(&news(2, today()), &cursor));
        assert!(is_after_cursor(&news(1, today()), &cursor));
        assert!(is_after_cursor(&news(9, today() - Duration::days(1)), &cursor));
    }

    #[rstest]
    fn comments_are_sorted_oldest_first() {
        let base = Utc
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let author = UserId::random();
        let comment = |id: i64, offset: i64| Comment {
            id: CommentId::new(id),
            news: NewsId::new(1),
            text: format!("Текст {id}"),
            author: author.clone(),
            created: base + Duration::days(offset),
        };
        let mut items = vec![comment(1, 2), comment(2, 0), comment(3, 1), comment(4, 0)];
        items.sort_by(comment_order);
        let ids: Vec<i64> = items.iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[rstest]
    fn notes_are_scoped_to_author() {
        let author = UserId::random();
        let note = Note {
            id: NoteId::new(1),
            title: "Заголовок".to_owned(),
            text: "Текст".to_owned(),
            slug: "zagolovok".to_owned(),
            author: author.clone(),
        };
        assert!(is_visible_to(&note, &author));
        assert!(!is_visible_to(&note, &UserId::random()));
    }
}
