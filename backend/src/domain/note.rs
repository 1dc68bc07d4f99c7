//! Personal notes addressed by slug.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MAX_SLUG_LENGTH, UserId, is_valid_slug};

/// Maximum note title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Database identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
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

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored note.
///
/// ## Invariants
/// - `slug` is unique across all notes.
/// - `author` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Storage identifier.
    pub id: NoteId,
    /// Title, 1 to [`MAX_TITLE_LENGTH`] characters.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Unique URL identifier.
    pub slug: String,
    /// Owning user.
    pub author: UserId,
}

/// Values submitted through the add or edit form.
///
/// The draft is echoed back unmodified when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    /// Submitted title.
    pub title: String,
    /// Submitted text.
    pub text: String,
    /// Submitted slug; blank means "derive from the title".
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteDraft {
    /// Prefill a draft from an existing note for the edit form.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: Some(note.slug.clone()),
        }
    }

    /// The explicitly requested slug, if one was supplied.
    #[must_use]
    pub fn requested_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    /// Check field limits.
    ///
    /// # Errors
    /// Returns the first failing field as a [`NoteValidationError`].
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(NoteValidationError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
            });
        }
        if self.text.trim().is_empty() {
            return Err(NoteValidationError::EmptyText);
        }
        if self.requested_slug().is_some_and(|slug| !is_valid_slug(slug)) {
            return Err(NoteValidationError::InvalidSlug {
                max: MAX_SLUG_LENGTH,
            });
        }
        Ok(())
    }
}

/// Field-level validation failures for note drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    /// Title missing or blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeds the length limit.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Text missing or blank.
    #[error("text must not be empty")]
    EmptyText,
    /// Slug contains characters outside the slug alphabet or is too long.
    #[error(
        "slug may contain only latin letters, digits, hyphens and underscores, up to {max} characters"
    )]
    InvalidSlug {
        /// Maximum length.
        max: usize,
    },
    /// No slug was given and none could be derived from the title.
    #[error("slug could not be derived from the title; provide one explicitly")]
    UnderivableSlug,
}

impl NoteValidationError {
    /// Form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyText => "text",
            Self::InvalidSlug { .. } | Self::UnderivableSlug => "slug",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::EmptyText => "empty_text",
            Self::InvalidSlug { .. } => "invalid_slug",
            Self::UnderivableSlug => "underivable_slug",
        }
    }
}

/// A validated note ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// Title.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Resolved unique slug.
    pub slug: String,
    /// Owning user.
    pub author: UserId,
}

/// Replacement values for an existing note. The author is not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChanges {
    /// New title.
    pub title: String,
    /// New body text.
    pub text: String,
    /// New resolved slug.
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, text: &str, slug: Option<&str>) -> NoteDraft {
        NoteDraft {
            title: title.to_owned(),
            text: text.to_owned(),
            slug: slug.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(draft("", "text", None), NoteValidationError::EmptyTitle)]
    #[case(draft("   ", "text", None), NoteValidationError::EmptyTitle)]
    #[case(draft(&"t".repeat(101), "text", None), NoteValidationError::TitleTooLong { max: 100 })]
    #[case(draft("title", "", None), NoteValidationError::EmptyText)]
    #[case(draft("title", "text", Some("Bad Slug")), NoteValidationError::InvalidSlug { max: 100 })]
    fn rejects_invalid_drafts(#[case] draft: NoteDraft, #[case] expected: NoteValidationError) {
        assert_eq!(draft.validate(), Err(expected));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("  "), None)]
    #[case(Some("my-note"), Some("my-note"))]
    fn blank_slugs_are_treated_as_absent(
        #[case] slug: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(draft("t", "x", slug).requested_slug(), expected);
    }

    #[rstest]
    fn hundred_character_title_is_accepted() {
        assert!(draft(&"ж".repeat(100), "text", None).validate().is_ok());
    }

    #[rstest]
    fn errors_name_their_field() {
        assert_eq!(NoteValidationError::EmptyText.field(), "text");
        assert_eq!(NoteValidationError::UnderivableSlug.field(), "slug");
        assert_eq!(NoteValidationError::EmptyTitle.code(), "empty_title");
    }
}
