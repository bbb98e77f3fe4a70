//! Markdown rendering of tasks and the task list index.
//!
//! Both renderers are pure: the same input always produces byte-identical
//! output. Writing the documents is done by [`crate::split::write_plan`].

use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use crate::task::Task;

/// Title line of the index document.
pub const INDEX_TITLE: &str = "# Task List";

/// Render one task document.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use prd_split::prd::TaskSeed;
/// use prd_split::render::render_task;
/// use prd_split::task::{synthesize, TaskState};
///
/// let seed = TaskSeed::new("Goals", "Export reports");
/// let task = synthesize(&seed, 1, "TASK", TaskState::Open, Path::new("out"));
/// let doc = render_task(&task);
/// assert!(doc.starts_with("# TASK-001 - Export reports\n\n- State: open\n- Source: Goals\n"));
/// ```
#[must_use]
pub fn render_task(task: &Task) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "# {} - {}", task.task_id, task.title);
    doc.push('\n');
    let _ = writeln!(doc, "- State: {}", task.state);
    let _ = writeln!(doc, "- Source: {}", task.source);
    doc.push('\n');
    doc.push_str("## Story\n");
    let _ = writeln!(doc, "{}", task.story);
    doc.push('\n');
    doc.push_str("## Acceptance Criteria\n");
    push_numbered(&mut doc, &task.acceptance_criteria);
    doc.push('\n');
    doc.push_str("## Test Cases\n");
    push_numbered(&mut doc, &task.test_cases);
    doc
}

fn push_numbered(doc: &mut String, items: &[String]) {
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(doc, "{}. {}", idx + 1, item);
    }
}

/// Render the task list index with one linked row per task.
///
/// Links are relative to the directory containing `index_path` and always
/// use `/` as separator.
#[must_use]
pub fn render_index(tasks: &[Task], index_path: &Path) -> String {
    let base = index_path.parent().unwrap_or_else(|| Path::new(""));

    let mut doc = String::new();
    doc.push_str(INDEX_TITLE);
    doc.push_str("\n\n");
    doc.push_str("| Task | State |\n");
    doc.push_str("| --- | --- |\n");
    for task in tasks {
        let link = link_target(&relative_path(base, &task.path));
        let _ = writeln!(
            doc,
            "| [{} - {}]({}) | {} |",
            task.task_id, task.title, link, task.state
        );
    }
    doc
}

/// Path of `target` relative to the directory `base`.
///
/// Both paths are compared component by component, so they should be
/// either both absolute or both relative to the same directory.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use prd_split::render::relative_path;
///
/// assert_eq!(
///     relative_path(Path::new("/work/docs"), Path::new("/work/tasks/T-001.md")),
///     PathBuf::from("../tasks/T-001.md")
/// );
/// ```
#[must_use]
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

fn link_target(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskState;

    fn sample_task(id: &str, title: &str, path: &str) -> Task {
        Task {
            task_id: id.to_string(),
            title: title.to_string(),
            state: TaskState::Open,
            source: "Goals > Auth".to_string(),
            story: "As a user, I want to log in, so that the PRD requirement is delivered successfully."
                .to_string(),
            acceptance_criteria: vec!["A.".into(), "B.".into(), "C.".into()],
            test_cases: vec!["X.".into(), "Y.".into(), "Z.".into()],
            path: PathBuf::from(path),
        }
    }

    // ========================================================================
    // Task document
    // ========================================================================

    #[test]
    fn test_render_task_exact() {
        let task = sample_task("TASK-001", "Log in", "/out/TASK-001-log-in.md");
        let expected = "\
# TASK-001 - Log in

- State: open
- Source: Goals > Auth

## Story
As a user, I want to log in, so that the PRD requirement is delivered successfully.

## Acceptance Criteria
1. A.
2. B.
3. C.

## Test Cases
1. X.
2. Y.
3. Z.
";
        assert_eq!(render_task(&task), expected);
    }

    #[test]
    fn test_render_task_is_deterministic() {
        let task = sample_task("TASK-001", "Log in", "/out/TASK-001-log-in.md");
        assert_eq!(render_task(&task), render_task(&task.clone()));
    }

    #[test]
    fn test_render_task_shows_state() {
        let mut task = sample_task("TASK-001", "Log in", "/out/a.md");
        task.state = TaskState::ReadyForReview;
        assert!(render_task(&task).contains("- State: ready4review\n"));
    }

    // ========================================================================
    // Index document
    // ========================================================================

    #[test]
    fn test_render_index_same_directory() {
        let tasks = vec![
            sample_task("TASK-001", "Log in", "/out/TASK-001-log-in.md"),
            sample_task("TASK-002", "Log out", "/out/TASK-002-log-out.md"),
        ];
        let expected = "\
# Task List

| Task | State |
| --- | --- |
| [TASK-001 - Log in](TASK-001-log-in.md) | open |
| [TASK-002 - Log out](TASK-002-log-out.md) | open |
";
        assert_eq!(render_index(&tasks, Path::new("/out/TASKLIST.md")), expected);
    }

    #[test]
    fn test_render_index_sibling_directory() {
        let tasks = vec![sample_task("T-001", "Log in", "/repo/tasks/T-001-log-in.md")];
        let doc = render_index(&tasks, Path::new("/repo/docs/INDEX.md"));
        assert!(doc.contains("| [T-001 - Log in](../tasks/T-001-log-in.md) | open |"));
    }

    #[test]
    fn test_render_index_empty() {
        let doc = render_index(&[], Path::new("/out/TASKLIST.md"));
        assert_eq!(doc, "# Task List\n\n| Task | State |\n| --- | --- |\n");
    }

    // ========================================================================
    // Relative paths
    // ========================================================================

    #[test]
    fn test_relative_path_nested() {
        assert_eq!(
            relative_path(Path::new("/a"), Path::new("/a/b/c.md")),
            PathBuf::from("b/c.md")
        );
        assert_eq!(
            relative_path(Path::new("/a/b/c"), Path::new("/a/x.md")),
            PathBuf::from("../../x.md")
        );
    }

    #[test]
    fn test_relative_path_ignores_cur_dir() {
        assert_eq!(
            relative_path(Path::new("./out"), Path::new("out/t.md")),
            PathBuf::from("t.md")
        );
    }

    #[test]
    fn test_relative_path_same() {
        assert_eq!(relative_path(Path::new("/a"), Path::new("/a")), PathBuf::from("."));
    }

    #[test]
    fn test_link_target_uses_forward_slashes() {
        let path: PathBuf = ["..", "tasks", "T-001.md"].iter().collect();
        assert_eq!(link_target(&path), "../tasks/T-001.md");
    }
}
