//! Heading-based section extraction.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{Section, FALLBACK_SOURCE, SOURCE_SEPARATOR};
use crate::markup::clean_inline;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("valid heading regex"));

/// Shallowest heading level that opens a section. Level 1 is the document title.
pub const MIN_SECTION_LEVEL: usize = 2;

/// A recognized markdown heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` markers (1-6).
    pub level: usize,
    /// Cleaned title; `"Untitled"` when the heading text is only markup.
    pub title: String,
}

/// Parse a line as an ATX heading.
///
/// Trailing `#` markers are dropped from the title.
#[must_use]
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps[1].len();
    let title = clean_inline(caps[2].trim_end_matches('#').trim());
    Some(Heading {
        level,
        title: if title.is_empty() {
            "Untitled".to_string()
        } else {
            title
        },
    })
}

/// Accumulates the body of the section currently being read.
struct OpenSection {
    source: String,
    lines: Vec<String>,
}

impl OpenSection {
    fn close(self) -> Option<Section> {
        let body = self.lines.join("\n");
        if body.trim().is_empty() {
            None
        } else {
            Some(Section::new(self.source, body))
        }
    }
}

/// Split a PRD into heading-delimited sections.
///
/// Headings at level 2 and deeper open a section whose source is the heading
/// path joined with `" > "`. Level 1 headings are skipped and text before the
/// first section heading is ignored. Sections with a blank body are dropped.
///
/// When no section survives, the whole cleaned document becomes a single
/// `"General"` section; an empty document yields an empty vector.
///
/// # Example
///
/// ```
/// use prd_split::prd::extract_sections;
///
/// let prd = "# Product\n## Goals\n### Non-functional\n- Fast startup\n";
/// let sections = extract_sections(prd);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].source, "Goals > Non-functional");
/// ```
#[must_use]
pub fn extract_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<OpenSection> = None;

    for line in markdown.lines() {
        if let Some(heading) = parse_heading(line) {
            if heading.level >= MIN_SECTION_LEVEL {
                if let Some(section) = current.take().and_then(OpenSection::close) {
                    sections.push(section);
                }
                path.truncate(heading.level - MIN_SECTION_LEVEL);
                path.push(heading.title);
                current = Some(OpenSection {
                    source: path.join(SOURCE_SEPARATOR),
                    lines: Vec::new(),
                });
            }
            continue;
        }

        if let Some(open) = current.as_mut() {
            open.lines.push(line.to_string());
        }
    }

    if let Some(section) = current.and_then(OpenSection::close) {
        sections.push(section);
    }

    if !sections.is_empty() {
        debug!(count = sections.len(), "Extracted PRD sections");
        return sections;
    }

    let fallback = clean_inline(markdown);
    if fallback.is_empty() {
        return Vec::new();
    }
    debug!("No section headings found; using a single fallback section");
    vec![Section::new(FALLBACK_SOURCE, fallback)]
}
