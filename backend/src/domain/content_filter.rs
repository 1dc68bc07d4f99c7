//! Forbidden-word filter applied to comment text.

/// Words that may not appear anywhere in a comment.
pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Warning surfaced on the `text` field when a comment is rejected.
pub const WARNING: &str = "Не ругайтесь!";

/// Reason attached to a rejected text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", WARNING)]
pub struct Rejected {
    word: String,
}

impl Rejected {
    /// The forbidden word that triggered the rejection.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }
}

/// Case-sensitive substring filter over a fixed word list.
///
/// # Examples
/// ```
/// use noticeboard::domain::ContentFilter;
///
/// let filter = ContentFilter::default();
/// assert!(filter.check("Какой-то текст").is_ok());
/// assert!(filter.check("Какой-то текст, редиска, еще текст").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ContentFilter {
    words: Vec<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(BAD_WORDS)
    }
}

impl ContentFilter {
    /// Build a filter over the given words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject `text` if any forbidden word occurs inside it.
    ///
    /// # Errors
    /// Returns [`Rejected`] naming the first forbidden word found.
    pub fn check(&self, text: &str) -> Result<(), Rejected> {
        match self.words.iter().find(|word| text.contains(word.as_str())) {
            Some(word) => Err(Rejected { word: word.clone() }),
            None => Ok(()),
        }
    }
}
