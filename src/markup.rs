//! Inline markdown cleanup.
//!
//! [`clean_inline`] strips the markup a PRD author typically puts inside a
//! requirement line (links, code spans, emphasis, raw tags) and normalizes
//! whitespace. It is an ordered chain of independent passes; each pass is a
//! plain `&str -> String` function so it can be exercised on its own.
//!
//! # Example
//!
//! ```
//! use prd_split::markup::clean_inline;
//!
//! let text = "Support **bulk** [export](https://example.com) via `csv`";
//! assert_eq!(clean_inline(text), "Support bulk export via csv");
//! ```

use regex::Regex;
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid link regex"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));
static BOLD_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));
static BOLD_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").expect("valid bold regex"));
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").expect("valid italic regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Named entity for a non-breaking space.
const NBSP_ENTITY: &str = "&nbsp;";

// ============================================================================
// Individual passes
// ============================================================================

/// Replace `[text](url)` with `text`.
#[must_use]
pub fn strip_links(text: &str) -> String {
    LINK_RE.replace_all(text, "${1}").into_owned()
}

/// Replace `` `code` `` with `code`.
#[must_use]
pub fn strip_inline_code(text: &str) -> String {
    CODE_RE.replace_all(text, "${1}").into_owned()
}

/// Remove `**`, `*`, `__` and `_` emphasis delimiters, double markers first.
#[must_use]
pub fn strip_emphasis(text: &str) -> String {
    let text = BOLD_STAR_RE.replace_all(text, "${1}");
    let text = ITALIC_STAR_RE.replace_all(&text, "${1}");
    let text = BOLD_UNDERSCORE_RE.replace_all(&text, "${1}");
    ITALIC_UNDERSCORE_RE
        .replace_all(&text, "${1}")
        .into_owned()
}

/// Replace HTML-like tags with a space.
#[must_use]
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, " ").into_owned()
}

/// Replace `&nbsp;` with a space.
#[must_use]
pub fn replace_entities(text: &str) -> String {
    text.replace(NBSP_ENTITY, " ")
}

/// Collapse whitespace runs into a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

// ============================================================================
// Composed helpers
// ============================================================================

/// Run every cleanup pass in order.
#[must_use]
pub fn clean_inline(text: &str) -> String {
    let text = strip_links(text);
    let text = strip_inline_code(&text);
    let text = strip_emphasis(&text);
    let text = strip_tags(&text);
    let text = replace_entities(&text);
    collapse_whitespace(&text)
}

/// Clean `text` and make sure it ends with terminal punctuation.
///
/// Leading and trailing spaces and hyphens are removed first. Returns an
/// empty string when nothing is left.
///
/// ```
/// use prd_split::markup::sentence;
///
/// assert_eq!(sentence("- export reports -"), "export reports.");
/// assert_eq!(sentence("Ready?"), "Ready?");
/// assert_eq!(sentence(" - "), "");
/// ```
#[must_use]
pub fn sentence(text: &str) -> String {
    let cleaned = clean_inline(text);
    let normalized = cleaned.trim_matches(|c| c == ' ' || c == '-');
    if normalized.is_empty() {
        return String::new();
    }
    if normalized.ends_with(['.', '!', '?']) {
        normalized.to_string()
    } else {
        format!("{normalized}.")
    }
}

/// Last component of a `" > "`-joined provenance path.
#[must_use]
pub fn last_path_component(source: &str) -> &str {
    source.rsplit(crate::prd::SOURCE_SEPARATOR).next().unwrap_or(source)
}
