//! Comments attached to news items.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NewsId, UserId};

/// Database identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
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

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored comment.
///
/// ## Invariants
/// - `news`, `author` and `created` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Storage identifier.
    pub id: CommentId,
    /// News item the comment belongs to.
    pub news: NewsId,
    /// Comment body.
    pub text: String,
    /// Owning user.
    pub author: UserId,
    /// Creation time; orders comments oldest first.
    pub created: DateTime<Utc>,
}

/// Text submitted through the comment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    /// Submitted text.
    pub text: String,
}

impl CommentDraft {
    /// Prefill a draft from an existing comment for the edit form.
    #[must_use]
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }

    /// Check that text was supplied.
    ///
    /// # Errors
    /// Returns [`CommentValidationError::EmptyText`] for blank text.
    pub fn validate(&self) -> Result<(), CommentValidationError> {
        if self.text.trim().is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Field-level validation failures for comment drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// Text missing or blank.
    #[error("text must not be empty")]
    EmptyText,
}

/// A validated comment ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Target news item.
    pub news: NewsId,
    /// Comment body.
    pub text: String,
    /// Owning user.
    pub author: UserId,
    /// Creation time.
    pub created: DateTime<Utc>,
}
