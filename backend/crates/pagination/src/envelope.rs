//! Page splitting and the JSON envelope returned by listing endpoints.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Cursor;

/// Query parameter carrying the continuation cursor.
pub const CURSOR_PARAM: &str = "cursor";

/// One page of items plus the cursor for the following page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, K> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Cursor positioned after the last item when more items exist.
    pub next: Option<Cursor<K>>,
}

impl<T, K> Page<T, K> {
    /// Split an over-fetched result into a page of at most `limit` items.
    ///
    /// Callers fetch `limit + 1` items; the presence of the extra item is what
    /// signals that a next page exists.
    ///
    /// # Examples
    /// ```
    /// use pagination::Page;
    ///
    /// let page = Page::from_overfetch(vec![5, 4, 3], 2, |item| *item);
    /// assert_eq!(page.items, vec![5, 4]);
    /// assert_eq!(page.next.map(|cursor| cursor.into_inner()), Some(4));
    /// ```
    #[must_use]
    pub fn from_overfetch(mut items: Vec<T>, limit: usize, key_of: impl Fn(&T) -> K) -> Self {
        if items.len() <= limit {
            return Self { items, next: None };
        }
        items.truncate(limit);
        let next = items.last().map(|last| Cursor::new(key_of(last)));
        Self { items, next }
    }
}

/// Hypermedia links attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    /// URL of the current page.
    #[serde(rename = "self")]
    pub self_: String,
    /// URL of the next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PaginationLinks {
    /// Build links from the request URL and an encoded next cursor.
    ///
    /// Existing query parameters are preserved; any previous cursor is
    /// replaced.
    ///
    /// # Examples
    /// ```
    /// use pagination::PaginationLinks;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://localhost/?cursor=old").expect("valid url");
    /// let links = PaginationLinks::from_request(&url, Some("new"));
    /// assert_eq!(links.next.as_deref(), Some("http://localhost/?cursor=new"));
    /// ```
    #[must_use]
    pub fn from_request(request_url: &Url, next_cursor: Option<&str>) -> Self {
        Self {
            self_: request_url.to_string(),
            next: next_cursor.map(|cursor| with_cursor(request_url, cursor).to_string()),
        }
    }
}

fn with_cursor(url: &Url, cursor: &str) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != CURSOR_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    let mut next = url.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(CURSOR_PARAM, cursor);
    next
}

/// JSON envelope for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Maximum number of items per page.
    pub limit: usize,
    /// Links to this and the following page.
    pub links: PaginationLinks,
}
