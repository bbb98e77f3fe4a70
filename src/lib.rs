//! prd-split - break a PRD into atomic task documents
//!
//! Reads a markdown Product Requirements Document and produces one markdown
//! document per atomic requirement, each with a user story, acceptance
//! criteria and test cases, plus a `TASKLIST.md` index linking them.
//!
//! # Architecture
//!
//! The pipeline is linear and single-pass:
//!
//! - [`prd`] - section extraction, seed extraction and deduplication
//! - [`task`] - task records, identifiers and synthesis from seeds
//! - [`render`] - markdown rendering of tasks and the index
//! - [`split`] - driver that runs the stages and writes the output
//! - [`markup`] - inline markdown cleanup shared by every stage
//! - [`config`] - run configuration and the optional TOML defaults file
//! - [`error`] - error types
//!
//! # Example
//!
//! ```
//! use prd_split::{plan_tasks, render_task, SplitConfig, TaskState};
//!
//! let prd = "# Product\n## Goals\n- Users must be able to reset their password.\n";
//! let config = SplitConfig::new("tasks").with_initial_state(TaskState::Open);
//! let plan = plan_tasks(prd, &config)?;
//!
//! assert_eq!(plan.tasks.len(), 1);
//! assert!(render_task(&plan.tasks[0]).starts_with("# TASK-001 - Users must be able"));
//! # Ok::<(), prd_split::SplitError>(())
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod prd;
pub mod render;
pub mod split;
pub mod task;

// Re-export commonly used types
pub use error::{IntoSplitError, Result, SplitError};

pub use config::{ConfigOverrides, FileConfig, SplitConfig};
pub use prd::{Section, TaskSeed};
pub use render::{render_index, render_task};
pub use split::{plan_tasks, read_prd, split_prd_file, write_plan, SplitPlan, SplitSummary};
pub use task::{Task, TaskState};
