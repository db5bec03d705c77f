use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Used when a title has no ASCII letters or digits at all.
pub const FALLBACK_SLUG: &str = "rezept";

pub const MAX_SLUG_LEN: usize = 64;

/// Lower-case ASCII slug of a title. Accented letters fold to their base
/// letter, every other run of characters outside `[a-z0-9]` becomes a single
/// hyphen.
pub fn slugify(title: &str) -> String {
    let folded = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();

    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug: String = slug.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Record id: slug plus the creation timestamp in milliseconds. Two creates
/// of the same title within one millisecond produce the same id.
pub fn recipe_id(title: &str, created_at_ms: i64) -> String {
    format!("{}-{}", slugify(title), created_at_ms)
}
