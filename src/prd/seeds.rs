//! Requirement seed extraction from a section body.
//!
//! List items are preferred. Prose is only sentence-split when a section has
//! no list items at all, and a section with neither still contributes one
//! seed named after its heading.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{Section, TaskSeed};
use crate::markup::{clean_inline, last_path_component};

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*\S)\s*$").expect("valid bullet regex"));
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*\S)\s*$").expect("valid numbered regex"));
static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[ xX]\]\s*").expect("valid checkbox regex"));
static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code block regex"));
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

/// Maximum seeds taken from a single section.
pub const MAX_SEEDS_PER_SECTION: usize = 12;

/// Maximum prose sentences taken when a section has no list items.
pub const MAX_PROSE_SENTENCES: usize = 4;

/// Shortest prose sentence, in characters, that counts as a requirement.
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Line prefixes that never contribute prose: headings, quotes, tables.
const SKIPPED_PROSE_PREFIXES: [char; 3] = ['#', '>', '|'];

/// Return the item text of a bulleted or numbered list line.
#[must_use]
pub fn list_item(line: &str) -> Option<&str> {
    BULLET_RE
        .captures(line)
        .or_else(|| NUMBERED_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Clean a list item and drop a leading `[ ]` / `[x]` / `[X]` checkbox.
#[must_use]
pub fn clean_list_item(item: &str) -> String {
    let cleaned = clean_inline(item);
    CHECKBOX_RE.replace(&cleaned, "").into_owned()
}

/// Split prose into sentences of at least [`MIN_SENTENCE_CHARS`] characters.
///
/// Fenced code blocks, list items and lines starting with `#`, `>` or `|`
/// are discarded before the remaining lines are joined and split after
/// `.`, `!` or `?` followed by whitespace.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let scrubbed = CODE_BLOCK_RE.replace_all(text, " ");

    let lines: Vec<String> = scrubbed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(SKIPPED_PROSE_PREFIXES))
        .filter(|line| list_item(line).is_none())
        .map(clean_inline)
        .collect();

    let corpus = lines.join(" ");
    if corpus.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END_RE.find_iter(&corpus) {
        // Punctuation stays with the sentence it terminates.
        chunks.push(&corpus[start..=m.start()]);
        start = m.end();
    }
    chunks.push(&corpus[start..]);

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|chunk| chunk.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Extract requirement seeds from one section.
///
/// # Example
///
/// ```
/// use prd_split::prd::{extract_seeds, Section};
///
/// let section = Section::new("Goals", "- [x] Export **CSV** reports\n1. Import data");
/// let seeds = extract_seeds(&section);
/// let texts: Vec<_> = seeds.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(texts, vec!["Export CSV reports", "Import data"]);
/// ```
#[must_use]
pub fn extract_seeds(section: &Section) -> Vec<TaskSeed> {
    let mut candidates: Vec<String> = section
        .body
        .lines()
        .filter_map(list_item)
        .map(clean_list_item)
        .filter(|item| !item.is_empty())
        .collect();

    if candidates.is_empty() {
        candidates = split_sentences(&section.body)
            .into_iter()
            .take(MAX_PROSE_SENTENCES)
            .collect();
    }

    if candidates.is_empty() {
        debug!(source = %section.source, "No list items or prose; using heading as seed");
        candidates.push(last_path_component(&section.source).to_string());
    }

    let seeds: Vec<TaskSeed> = candidates
        .iter()
        .take(MAX_SEEDS_PER_SECTION)
        .map(|candidate| clean_inline(candidate))
        .filter(|text| !text.is_empty())
        .map(|text| TaskSeed::new(section.source.clone(), text))
        .collect();

    debug!(source = %section.source, count = seeds.len(), "Extracted seeds");
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(seeds: &[TaskSeed]) -> Vec<&str> {
        seeds.iter().map(|s| s.text.as_str()).collect()
    }

    // ========================================================================
    // List items
    // ========================================================================

    #[test]
    fn test_list_item_forms() {
        assert_eq!(list_item("- dash item"), Some("dash item"));
        assert_eq!(list_item("  * star item  "), Some("star item"));
        assert_eq!(list_item("1. numbered"), Some("numbered"));
        assert_eq!(list_item("12) paren"), Some("paren"));
        assert_eq!(list_item("**bold** line"), None);
        assert_eq!(list_item("-nospace"), None);
        assert_eq!(list_item("plain"), None);
    }

    #[test]
    fn test_clean_list_item_checkboxes() {
        assert_eq!(clean_list_item("[ ] Open item"), "Open item");
        assert_eq!(clean_list_item("[x] Done item"), "Done item");
        assert_eq!(clean_list_item("[X] Done item"), "Done item");
        assert_eq!(clean_list_item("[ ]"), "");
    }

    #[test]
    fn test_seed_from_bullet() {
        let section = Section::new("Goals", "- Users must be able to reset their password.");
        let seeds = extract_seeds(&section);
        assert_eq!(
            seeds,
            vec![TaskSeed::new(
                "Goals",
                "Users must be able to reset their password."
            )]
        );
    }

    #[test]
    fn test_list_items_preferred_over_prose() {
        let body = "This paragraph is long enough to be a sentence.\n- Only the bullet";
        let seeds = extract_seeds(&Section::new("S", body));
        assert_eq!(texts(&seeds), vec!["Only the bullet"]);
    }

    #[test]
    fn test_cap_at_twelve_preserves_order() {
        let body: String = (1..=20).map(|i| format!("- Requirement {i}\n")).collect();
        let seeds = extract_seeds(&Section::new("Big", body));
        assert_eq!(seeds.len(), MAX_SEEDS_PER_SECTION);
        assert_eq!(seeds[0].text, "Requirement 1");
        assert_eq!(seeds[11].text, "Requirement 12");
    }

    #[test]
    fn test_markup_removed_from_items() {
        let body = "- Support [SSO](https://sso.example) via `SAML` <br> **today**";
        let seeds = extract_seeds(&Section::new("S", body));
        assert_eq!(texts(&seeds), vec!["Support SSO via SAML today"]);
    }

    // ========================================================================
    // Prose fallback
    // ========================================================================

    #[test]
    fn test_split_sentences_basic() {
        let text = "The system should log all errors. Short one. Reports must export to PDF!";
        assert_eq!(
            split_sentences(text),
            vec![
                "The system should log all errors.",
                "Reports must export to PDF!"
            ]
        );
    }

    #[test]
    fn test_split_sentences_skips_code_quotes_tables() {
        let text = "\
```
let x = this_is_code_and_long_enough();
```
> A quoted line that is long enough to count.
| table | row that is long enough |
Actual prose sentence that should survive.";
        assert_eq!(
            split_sentences(text),
            vec!["Actual prose sentence that should survive."]
        );
    }

    #[test]
    fn test_split_sentences_joins_wrapped_lines() {
        let text = "The dashboard must refresh\nevery five seconds. Done.";
        assert_eq!(
            split_sentences(text),
            vec!["The dashboard must refresh every five seconds."]
        );
    }

    #[test]
    fn test_prose_capped_at_four() {
        let body = (1..=6)
            .map(|i| format!("This is requirement sentence number {i}."))
            .collect::<Vec<_>>()
            .join(" ");
        let seeds = extract_seeds(&Section::new("Prose", body));
        assert_eq!(seeds.len(), MAX_PROSE_SENTENCES);
        assert_eq!(seeds[3].text, "This is requirement sentence number 4.");
    }

    #[test]
    fn test_general_fallback_sentence() {
        let seeds = extract_seeds(&Section::new("General", "The system should log all errors."));
        assert_eq!(texts(&seeds), vec!["The system should log all errors."]);
    }

    // ========================================================================
    // Terminal fallback
    // ========================================================================

    #[test]
    fn test_heading_used_when_nothing_else() {
        let seeds = extract_seeds(&Section::new("Goals > Performance", "Too short."));
        assert_eq!(seeds, vec![TaskSeed::new("Goals > Performance", "Performance")]);
    }

    #[test]
    fn test_source_copied_to_every_seed() {
        let seeds = extract_seeds(&Section::new("A > B", "- one\n- two"));
        assert!(seeds.iter().all(|s| s.source == "A > B"));
    }
}
