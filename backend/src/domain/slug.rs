//! Slug validation and derivation for notes.
//!
//! Slugs are trimmed, non-empty identifiers made of ASCII letters, digits,
//! hyphens and underscores. When an author leaves the slug blank one is
//! derived from the title by transliterating Cyrillic to Latin and
//! hyphenating whitespace. Derived slugs are always lowercase.

use std::sync::OnceLock;

use regex::Regex;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Suffix appended to a slug that is already taken.
pub const DUPLICATE_SLUG_SUFFIX: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Warning shown when `slug` collides with an existing note.
///
/// # Examples
/// ```
/// use noticeboard::domain::duplicate_slug_warning;
///
/// assert!(duplicate_slug_warning("note-slug").starts_with("note-slug - "));
/// ```
#[must_use]
pub fn duplicate_slug_warning(slug: &str) -> String {
    format!("{slug}{DUPLICATE_SLUG_SUFFIX}")
}

/// Return `true` when `value` is a valid note slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value)
        && value.chars().count() <= MAX_SLUG_LENGTH
        && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

static SEPARATORS: OnceLock<Regex> = OnceLock::new();

fn separators() -> &'static Regex {
    SEPARATORS.get_or_init(|| {
        Regex::new(r"[-\s]+")
            .unwrap_or_else(|error| panic!("slug separator regex failed to compile: {error}"))
    })
}

fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' | 'ї' => "yi",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        _ => return None,
    };
    Some(latin)
}

/// Derive a slug from a note title.
///
/// The title is lowercased, `&` becomes `and`, runs of whitespace and hyphens
/// collapse to one hyphen, Cyrillic is transliterated, and anything outside
/// the slug alphabet is dropped. The result is cut to [`MAX_SLUG_LENGTH`].
///
/// # Examples
/// ```
/// use noticeboard::domain::slugify;
///
/// assert_eq!(slugify("Новый заголовок"), "novyij-zagolovok");
/// assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");
    let hyphenated = separators().replace_all(&lowered, "-");

    let mut slug = String::with_capacity(hyphenated.len());
    for ch in hyphenated.chars() {
        if let Some(latin) = transliterate(ch) {
            slug.push_str(latin);
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            slug.push(ch);
        }
    }
    slug.chars().take(MAX_SLUG_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Новый заголовок", "novyij-zagolovok")]
    #[case("Заголовок", "zagolovok")]
    #[case("Щука и ёж", "schuka-i-yozh")]
    #[case("Hello,   World!", "hello-world")]
    #[case("multi -- dash", "multi-dash")]
    #[case("Подъезд", "podezd")]
    #[case("!!!", "")]
    fn derives_slugs(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[rstest]
    fn truncates_to_max_length() {
        let title = "я".repeat(80);
        let slug = slugify(&title);
        assert_eq!(slug.len(), MAX_SLUG_LENGTH);
        assert!(is_valid_slug(&slug));
    }

    #[rstest]
    #[case("note-slug", true)]
    #[case("note_slug_2", true)]
    #[case("", false)]
    #[case(" padded", false)]
    #[case("Upper", true)]
    #[case("Mixed-Case_2", true)]
    #[case("with space", false)]
    #[case("кириллица", false)]
    fn validates_slugs(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[rstest]
    fn warning_names_the_slug() {
        assert_eq!(
            duplicate_slug_warning("taken"),
            "taken - такой slug уже существует, придумайте уникальное значение!"
        );
    }
}
