//! Task records and their synthesis from seeds.
//!
//! - [`TaskState`] - lifecycle label carried by every generated task
//! - [`Task`] - a fully synthesized unit of work
//! - [`ids`] - task id, prefix and filename slug helpers
//! - [`synth`] - seed to task synthesis

pub mod ids;
pub mod synth;

pub use ids::{format_task_id, sanitize_prefix, slugify, DEFAULT_PREFIX};
pub use synth::synthesize;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SplitError;

// ============================================================================
// Task State
// ============================================================================

/// Lifecycle state of a task.
///
/// Generated tasks all start in the configured initial state. Nothing in
/// this crate moves a task between states; that is left to whoever edits
/// the generated files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum TaskState {
    /// Not started
    #[default]
    #[serde(rename = "open")]
    #[value(name = "open")]
    Open,
    /// Being worked on
    #[serde(rename = "in_progress")]
    #[value(name = "in_progress")]
    InProgress,
    /// Waiting for review
    #[serde(rename = "ready4review")]
    #[value(name = "ready4review")]
    ReadyForReview,
    /// Finished
    #[serde(rename = "done")]
    #[value(name = "done")]
    Done,
}

impl TaskState {
    /// All states in lifecycle order.
    pub const ALL: [TaskState; 4] = [
        TaskState::Open,
        TaskState::InProgress,
        TaskState::ReadyForReview,
        TaskState::Done,
    ];

    /// Label written into task documents and the index.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Open => "open",
            TaskState::InProgress => "in_progress",
            TaskState::ReadyForReview => "ready4review",
            TaskState::Done => "done",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| SplitError::invalid_state(s))
    }
}

// ============================================================================
// Task
// ============================================================================

/// A synthesized unit of work, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// `<PREFIX>-<NNN>` identifier, unique and gapless within a run.
    pub task_id: String,
    /// Short label of at most ten words.
    pub title: String,
    /// Initial lifecycle state.
    pub state: TaskState,
    /// Heading path of the section the seed came from.
    pub source: String,
    /// "As a ..., I want ..., so that ..." sentence.
    pub story: String,
    /// Ordered, non-empty acceptance criteria.
    pub acceptance_criteria: Vec<String>,
    /// Ordered, non-empty Given/When/Then test cases.
    pub test_cases: Vec<String>,
    /// Output location of the rendered task document.
    pub path: PathBuf,
}
