//! Pipeline driver.
//!
//! [`plan_tasks`] runs every stage in memory and checks the fatal
//! conditions. Nothing touches the filesystem until a complete
//! [`SplitPlan`] exists, so a failing PRD never leaves partial output
//! behind. [`write_plan`] then writes the task documents and the index.

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::prd::{deduplicate, extract_seeds, extract_sections, TaskSeed};
use crate::render::{render_index, render_task};
use crate::task::{synthesize, Task, TaskState};

/// Every task of a run plus where the index goes. Not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// Directory receiving the task documents.
    pub out_dir: PathBuf,
    /// Index document path.
    pub tasklist_path: PathBuf,
    /// Tasks in synthesis order.
    pub tasks: Vec<Task>,
}

impl SplitPlan {
    /// Rendered index document.
    #[must_use]
    pub fn index_document(&self) -> String {
        render_index(&self.tasks, &self.tasklist_path)
    }

    /// Machine-readable summary of this plan.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> SplitSummary {
        SplitSummary {
            task_count: self.tasks.len(),
            out_dir: self.out_dir.clone(),
            tasklist: self.tasklist_path.clone(),
            dry_run,
            tasks: self
                .tasks
                .iter()
                .map(|task| TaskSummary {
                    task_id: task.task_id.clone(),
                    title: task.title.clone(),
                    state: task.state,
                    path: task.path.clone(),
                })
                .collect(),
        }
    }
}

/// Outcome of a run, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    /// Number of task documents planned or written.
    pub task_count: usize,
    /// Directory holding the task documents.
    pub out_dir: PathBuf,
    /// Index document path.
    pub tasklist: PathBuf,
    /// True when nothing was written.
    pub dry_run: bool,
    /// One entry per task, in id order.
    pub tasks: Vec<TaskSummary>,
}

/// One row of a [`SplitSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Initial state written to the document.
    pub state: TaskState,
    /// Absolute path of the task document.
    pub path: PathBuf,
}

/// Make `path` absolute against the working directory, following symlinks
/// for every component that exists.
///
/// A `..` applies to the resolved parent, so `link/../t` lands next to the
/// symlink's target. Components past the last existing one are appended
/// as written, with `.` and `..` applied lexically. The path does not need
/// to exist.
///
/// # Errors
///
/// [`SplitError::Io`] when the working directory cannot be determined.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = std::fs::canonicalize(&resolved) {
                    resolved = real;
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

/// Read a PRD from disk.
///
/// # Errors
///
/// [`SplitError::PrdNotFound`] when the file does not exist, [`SplitError::Io`]
/// for any other read failure.
pub fn read_prd(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SplitError::PrdNotFound {
            path: path.to_path_buf(),
        },
        _ => SplitError::Io(e),
    })
}

/// Run sections, seeds, deduplication and synthesis over a PRD.
///
/// # Errors
///
/// Fails with [`SplitError::EmptyPrd`], [`SplitError::NoSections`] or
/// [`SplitError::NoTaskCandidates`]. Nothing is written either way.
///
/// # Example
///
/// ```
/// use prd_split::{plan_tasks, SplitConfig};
///
/// let prd = "## Goals\n- Export reports\n- export reports!\n- Import data\n";
/// let plan = plan_tasks(prd, &SplitConfig::new("/tasks")).unwrap();
/// let ids: Vec<_> = plan.tasks.iter().map(|t| t.task_id.as_str()).collect();
/// assert_eq!(ids, vec!["TASK-001", "TASK-002"]);
/// ```
pub fn plan_tasks(markdown: &str, config: &SplitConfig) -> Result<SplitPlan> {
    if markdown.trim().is_empty() {
        return Err(SplitError::EmptyPrd);
    }

    let sections = extract_sections(markdown);
    if sections.is_empty() {
        return Err(SplitError::NoSections);
    }

    let all_seeds: Vec<TaskSeed> = sections.iter().flat_map(extract_seeds).collect();
    let seed_count = all_seeds.len();
    let seeds = deduplicate(all_seeds);
    if seeds.is_empty() {
        return Err(SplitError::NoTaskCandidates);
    }
    debug!(
        sections = sections.len(),
        seeds = seed_count,
        unique = seeds.len(),
        "Planned PRD split"
    );

    let prefix = config.prefix();
    let tasks = seeds
        .iter()
        .enumerate()
        .map(|(idx, seed)| {
            synthesize(
                seed,
                idx + 1,
                &prefix,
                config.initial_state,
                &config.out_dir,
            )
        })
        .collect();

    Ok(SplitPlan {
        out_dir: config.out_dir.clone(),
        tasklist_path: config.tasklist_path(),
        tasks,
    })
}

/// Write every task document and then the index, creating directories as needed.
///
/// Existing files at the same paths are overwritten. A failure part-way
/// through leaves already written files in place.
///
/// # Errors
///
/// Returns [`SplitError::Io`] on the first failed directory creation or write.
pub fn write_plan(plan: &SplitPlan) -> Result<()> {
    for task in &plan.tasks {
        write_document(&task.path, &render_task(task))?;
    }
    write_document(&plan.tasklist_path, &plan.index_document())?;
    Ok(())
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    info!(path = %path.display(), "Wrote document");
    Ok(())
}

/// Read, plan and (unless `dry_run`) write a PRD split.
///
/// # Errors
///
/// Any fatal condition from [`read_prd`], [`plan_tasks`] or [`write_plan`].
pub fn split_prd_file(prd_path: &Path, config: &SplitConfig, dry_run: bool) -> Result<SplitSummary> {
    let markdown = read_prd(prd_path)?;
    let plan = plan_tasks(&markdown, config)?;
    if !dry_run {
        write_plan(&plan)?;
    }
    Ok(plan.summary(dry_run))
}
