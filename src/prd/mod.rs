//! PRD parsing: sections, requirement seeds and deduplication.
//!
//! The stages run leaf first and never call back into each other:
//!
//! - [`sections::extract_sections`] - document text to heading-delimited [`Section`]s
//! - [`seeds::extract_seeds`] - one section body to at most [`seeds::MAX_SEEDS_PER_SECTION`] [`TaskSeed`]s
//! - [`dedup::deduplicate`] - drop seeds whose normalized text was already seen

pub mod dedup;
pub mod sections;
pub mod seeds;

pub use dedup::{dedup_key, deduplicate};
pub use sections::extract_sections;
pub use seeds::extract_seeds;

/// Separator between heading titles in a provenance path.
pub const SOURCE_SEPARATOR: &str = " > ";

/// Source label of the synthetic section used when a PRD has no usable headings.
pub const FALLBACK_SOURCE: &str = "General";

/// One heading-delimited region of the PRD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading path from the document root, e.g. `"Goals > Non-functional"`.
    pub source: String,
    /// Raw lines under the heading, before any deeper heading.
    pub body: String,
}

impl Section {
    /// Create a new section.
    pub fn new(source: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: body.into(),
        }
    }
}

/// A single cleaned requirement candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSeed {
    /// Provenance copied from the originating section.
    pub source: String,
    /// Markup-free, whitespace-normalized requirement text. Never empty.
    pub text: String,
}

impl TaskSeed {
    /// Create a new seed.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}
