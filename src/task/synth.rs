//! Seed to task synthesis.
//!
//! Every step is a deterministic template with a fallback, so synthesis
//! never fails. The template wording is relied on by tooling that greps the
//! generated files; keep it stable.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::ids::{format_task_id, task_filename};
use super::{Task, TaskState};
use crate::markup::{clean_inline, last_path_component, sentence};
use crate::prd::TaskSeed;

static MODAL_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(must|should|shall|needs\s+to)\s+").expect("valid modal regex")
});
static SUBJECT_MODAL_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(the\s+system|system|platform|application|app)\s+(must|should|shall|needs\s+to)\s+",
    )
    .expect("valid subject regex")
});
static EMBEDDED_STORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(as\s+an?.+?so\s+that.+?)(?:[.?!]|$)").expect("valid story regex")
});

/// Role nouns in priority order. The first whole-word match wins.
pub const ACTORS: [&str; 8] = [
    "administrator",
    "admin",
    "customer",
    "operator",
    "manager",
    "analyst",
    "developer",
    "user",
];

/// Actor used when no role noun appears in the seed.
pub const DEFAULT_ACTOR: &str = "user";

/// Actors that always take "a", whatever their first letter.
const ARTICLE_A_EXCEPTIONS: [&str; 3] = ["user", "unicorn", "university"];

/// Maximum words kept in a title.
pub const MAX_TITLE_WORDS: usize = 10;

/// Title used when neither the seed nor its source has any text.
pub const UNTITLED: &str = "Untitled Task";

/// Capability used when stripping leaves nothing.
pub const DEFAULT_CAPABILITY: &str = "deliver the required behavior";

static ACTOR_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ACTORS
        .iter()
        .map(|actor| {
            let pattern = format!(r"\b{}\b", regex::escape(actor));
            (*actor, Regex::new(&pattern).expect("valid actor regex"))
        })
        .collect()
});

// ============================================================================
// Title
// ============================================================================

/// Short title: modal stripped, at most [`MAX_TITLE_WORDS`] words, first letter upper-cased.
///
/// ```
/// use prd_split::task::synth::build_title;
///
/// assert_eq!(build_title("must export: CSV files.", "Goals"), "Export: CSV files");
/// assert_eq!(build_title("...", "Goals > Reporting"), "Reporting");
/// ```
#[must_use]
pub fn build_title(seed_text: &str, source: &str) -> String {
    let stripped = MODAL_PREFIX_RE.replace(seed_text, "");
    let cleaned = clean_inline(&stripped);
    let mut candidate = cleaned
        .trim_matches(|c| matches!(c, ' ' | '.' | ':' | '-'))
        .to_string();
    if candidate.is_empty() {
        candidate = last_path_component(source).to_string();
    }

    let words: Vec<&str> = candidate.split_whitespace().collect();
    let short = if words.is_empty() {
        candidate
    } else {
        words[..words.len().min(MAX_TITLE_WORDS)].join(" ")
    };
    if short.is_empty() {
        return UNTITLED.to_string();
    }
    capitalize_first(&short)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Story
// ============================================================================

/// First role noun from [`ACTORS`] that appears as a whole word.
#[must_use]
pub fn infer_actor(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    ACTOR_RES
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
        .map_or(DEFAULT_ACTOR, |(actor, _)| *actor)
}

/// Prefix an actor with "a" or "an".
///
/// ```
/// use prd_split::task::synth::with_article;
///
/// assert_eq!(with_article("admin"), "an admin");
/// assert_eq!(with_article("manager"), "a manager");
/// assert_eq!(with_article("user"), "a user");
/// assert_eq!(with_article("the operator"), "the operator");
/// ```
#[must_use]
pub fn with_article(actor: &str) -> String {
    if ["a ", "an ", "the "]
        .iter()
        .any(|article| actor.starts_with(*article))
    {
        return actor.to_string();
    }
    if ARTICLE_A_EXCEPTIONS.contains(&actor.to_lowercase().as_str()) {
        return format!("a {actor}");
    }
    let starts_with_vowel = actor
        .chars()
        .next()
        .is_none_or(|c| "aeiou".contains(c.to_ascii_lowercase()));
    if starts_with_vowel {
        format!("an {actor}")
    } else {
        format!("a {actor}")
    }
}

/// Turn a requirement into an infinitive clause starting with "to ".
///
/// ```
/// use prd_split::task::synth::to_capability;
///
/// assert_eq!(to_capability("The system should log all errors."), "to log all errors");
/// assert_eq!(to_capability("Must Export data"), "to export data");
/// assert_eq!(to_capability("To sync nightly"), "To sync nightly");
/// ```
#[must_use]
pub fn to_capability(text: &str) -> String {
    let value = SUBJECT_MODAL_PREFIX_RE.replace(text, "");
    let value = MODAL_PREFIX_RE.replace(&value, "");
    let mut value = value.trim().trim_end_matches('.').to_string();
    if value.is_empty() {
        value = DEFAULT_CAPABILITY.to_string();
    }
    if value.to_lowercase().starts_with("to ") {
        return value;
    }
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => format!("to {}{}", first.to_lowercase(), chars.as_str()),
        None => "to ".to_string(),
    }
}

/// User story for a seed, reusing one already written into the seed.
///
/// ```
/// use prd_split::prd::TaskSeed;
/// use prd_split::task::synth::build_story;
///
/// let seed = TaskSeed::new("Goals", "Must let the admin approve refunds");
/// assert_eq!(
///     build_story(&seed),
///     "As an admin, I want to let the admin approve refunds, so that the PRD requirement is delivered successfully."
/// );
/// ```
#[must_use]
pub fn build_story(seed: &TaskSeed) -> String {
    if let Some(existing) = EMBEDDED_STORY_RE
        .captures(&seed.text)
        .and_then(|caps| caps.get(1))
    {
        return sentence(existing.as_str());
    }

    let actor = with_article(infer_actor(&seed.text));
    let capability = to_capability(&seed.text);
    sentence(&format!(
        "As {actor}, I want {capability}, so that the PRD requirement is delivered successfully"
    ))
}

// ============================================================================
// Acceptance criteria and test cases
// ============================================================================

/// Three acceptance criteria: the requirement itself, then success and failure templates.
#[must_use]
pub fn build_acceptance_criteria(seed: &TaskSeed, title: &str) -> Vec<String> {
    let label = title.to_lowercase();
    vec![
        sentence(&seed.text),
        sentence(&format!(
            "The {label} workflow succeeds with valid input and expected prerequisites"
        )),
        sentence(&format!(
            "The {label} workflow handles validation errors and dependency failures with actionable feedback"
        )),
    ]
}

/// Three Given/When/Then test cases: success, invalid input, downstream failure.
#[must_use]
pub fn build_test_cases(title: &str) -> Vec<String> {
    let label = title.to_lowercase();
    vec![
        sentence(&format!(
            "Given valid prerequisites for {label}, when the workflow runs, then it completes successfully with expected output"
        )),
        sentence(&format!(
            "Given invalid or missing input for {label}, when the workflow runs, then validation blocks completion and explains how to fix it"
        )),
        sentence(&format!(
            "Given a downstream failure during {label}, when the workflow runs, then the failure is reported and data remains consistent"
        )),
    ]
}

// ============================================================================
// Task
// ============================================================================

/// Build the task for one seed.
///
/// `prefix` must already be sanitized (see [`super::sanitize_prefix`]) and
/// `sequence` starts at 1.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use prd_split::prd::TaskSeed;
/// use prd_split::task::{synthesize, TaskState};
///
/// let seed = TaskSeed::new("General", "The system should log all errors.");
/// let task = synthesize(&seed, 1, "TASK", TaskState::Open, Path::new("tasks"));
/// assert_eq!(task.task_id, "TASK-001");
/// assert_eq!(task.title, "The system should log all errors");
/// assert_eq!(task.path, Path::new("tasks/TASK-001-the-system-should-log-all-errors.md"));
/// ```
#[must_use]
pub fn synthesize(
    seed: &TaskSeed,
    sequence: usize,
    prefix: &str,
    state: TaskState,
    out_dir: &Path,
) -> Task {
    let task_id = format_task_id(prefix, sequence);
    let title = build_title(&seed.text, &seed.source);
    let story = build_story(seed);
    let acceptance_criteria = build_acceptance_criteria(seed, &title);
    let test_cases = build_test_cases(&title);
    let path = out_dir.join(task_filename(&task_id, &title));

    Task {
        task_id,
        title,
        state,
        source: seed.source.clone(),
        story,
        acceptance_criteria,
        test_cases,
        path,
    }
}
