//! Slug generation.

use std::sync::LazyLock;

use deunicode::deunicode;
use regex::Regex;

/// Width of the `slug` columns.
pub const MAX_SLUG_LEN: usize = 255;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Builds a URL-safe slug from a human-readable name.
///
/// Non-Latin scripts are transliterated to ASCII, the result is lowercased
/// and every run of other characters collapses to a single `-`. Leading and
/// trailing hyphens are trimmed. Transliteration can lengthen text several
/// times over, so the result is cut to [`MAX_SLUG_LEN`].
///
/// ```
/// use book_catalog::utils::slug::slugify;
///
/// assert_eq!(slugify("Thomas Shelby"), "thomas-shelby");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let slug = NON_ALPHANUMERIC.replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');

    // ASCII only, so any byte index is a char boundary
    let cut = &slug[..slug.len().min(MAX_SLUG_LEN)];
    cut.trim_end_matches('-').to_string()
}
