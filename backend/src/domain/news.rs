//! Public news items.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Database identifier of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(i64);

impl NewsId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    /// Storage identifier.
    pub id: NewsId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication day.
    pub date: NaiveDate,
}

/// A news item to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication day.
    pub date: NaiveDate,
}

/// Keyset position in the news listing.
///
/// News is listed newest first; the key of the last item on a page marks
/// where the next page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCursorKey {
    /// Publication day of the last item seen.
    pub date: NaiveDate,
    /// Identifier of the last item seen.
    pub id: NewsId,
}

impl From<&News> for NewsCursorKey {
    fn from(news: &News) -> Self {
        Self {
            date: news.date,
            id: news.id,
        }
    }
}
