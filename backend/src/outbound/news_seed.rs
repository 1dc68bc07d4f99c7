//! Startup loading of news items from a JSON file.
//!
//! News has no authoring workflow, so a deployment fills the feed from a file
//! of `{ "title", "text", "date"? }` objects. A missing date means today.

use std::path::Path;

use chrono::NaiveDate;
use mockable::Clock;
use serde::Deserialize;
use tracing::info;

use crate::domain::NewNews;
use crate::domain::ports::{NewsRepository, NewsRepositoryError};

/// One news item as written in the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsSeed {
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewsSeed {
    /// Resolve the publication day against `today`.
    #[must_use]
    pub fn into_new_news(self, today: NaiveDate) -> NewNews {
        NewNews {
            title: self.title,
            text: self.text,
            date: self.date.unwrap_or(today),
        }
    }
}

/// Errors raised while seeding news.
#[derive(Debug, thiserror::Error)]
pub enum NewsSeedError {
    /// The seed file could not be read.
    #[error("failed to read news file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The seed file is not a JSON list of news items.
    #[error("failed to parse news file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// Storing an item failed.
    #[error(transparent)]
    Store(#[from] NewsRepositoryError),
}

/// Read seed items from a JSON file.
///
/// # Errors
/// Fails when the file is unreadable or malformed.
pub fn load_news_file(path: impl AsRef<Path>) -> Result<Vec<NewsSeed>, NewsSeedError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| NewsSeedError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| NewsSeedError::Parse {
        path: display,
        source,
    })
}

/// Insert seed items, dating undated ones with the clock's current day.
///
/// # Errors
/// Stops at the first repository failure.
pub async fn seed_news<R>(
    repo: &R,
    seeds: Vec<NewsSeed>,
    clock: &dyn Clock,
) -> Result<usize, NewsSeedError>
where
    R: NewsRepository + ?Sized,
{
    let today = clock.utc().date_naive();
    let count = seeds.len();
    for seed in seeds {
        repo.insert(seed.into_new_news(today)).await?;
    }
    info!(count, "news seeded");
    Ok(count)
}
