//! Task identifiers and filename slugs.

use crate::markup::clean_inline;

/// Prefix used when the configured one sanitizes to nothing.
pub const DEFAULT_PREFIX: &str = "TASK";

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 64;

/// Keep only ASCII alphanumerics, `-` and `_`, upper-cased.
///
/// ```
/// use prd_split::task::sanitize_prefix;
///
/// assert_eq!(sanitize_prefix("auth api!"), "AUTHAPI");
/// assert_eq!(sanitize_prefix("***"), "TASK");
/// ```
#[must_use]
pub fn sanitize_prefix(prefix: &str) -> String {
    let safe: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_ascii_uppercase();
    if safe.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        safe
    }
}

/// `<prefix>-<sequence>` with the sequence zero-padded to three digits.
#[must_use]
pub fn format_task_id(prefix: &str, sequence: usize) -> String {
    format!("{prefix}-{sequence:03}")
}

/// Lower-case, hyphen-separated, at most [`MAX_SLUG_LEN`] characters.
///
/// Returns `"task"` when nothing alphanumeric survives.
///
/// ```
/// use prd_split::task::slugify;
///
/// assert_eq!(slugify("Reset **their** password!"), "reset-their-password");
/// assert_eq!(slugify("???"), "task");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = clean_inline(text).to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // Slug is pure ASCII here, so byte truncation is character truncation.
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "task".to_string()
    } else {
        slug.to_string()
    }
}

/// Filename of a rendered task document.
#[must_use]
pub fn task_filename(task_id: &str, title: &str) -> String {
    format!("{task_id}-{}.md", slugify(title))
}
