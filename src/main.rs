//! prd-split - split a PRD markdown file into task files plus a linked task list.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use prd_split::split::{absolute_path, split_prd_file, SplitSummary};
use prd_split::{ConfigOverrides, FileConfig, SplitConfig, TaskState};

#[derive(Parser)]
#[command(name = "prd-split")]
#[command(version = "0.1.0")]
#[command(about = "Split a PRD markdown file into task files plus a linked tasklist", long_about = None)]
struct Cli {
    /// Input PRD markdown file path
    #[arg(long, value_name = "PATH")]
    prd: PathBuf,

    /// Directory where individual task markdown files are written
    #[arg(long, value_name = "DIR")]
    out_dir: PathBuf,

    /// Output path for the TASKLIST markdown (default: <out-dir>/TASKLIST.md)
    #[arg(long, value_name = "PATH")]
    tasklist: Option<PathBuf>,

    /// Task ID prefix (default: TASK)
    #[arg(long, env = "PRD_SPLIT_TASK_PREFIX", value_name = "PREFIX")]
    task_prefix: Option<String>,

    /// Initial state for every generated task (default: open)
    #[arg(long, value_enum, env = "PRD_SPLIT_INITIAL_STATE", value_name = "STATE")]
    initial_state: Option<TaskState>,

    /// TOML file with default prefix, state and tasklist path
    #[arg(long, env = "PRD_SPLIT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Plan the tasks and print their paths without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the summary.
    let filter = if cli.verbose {
        "prd_split=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> prd_split::Result<()> {
    let mut file = match cli.config.as_deref() {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    file.tasklist = file.tasklist.as_deref().map(absolute_path).transpose()?;

    let overrides = ConfigOverrides {
        tasklist: cli.tasklist.as_deref().map(absolute_path).transpose()?,
        task_prefix: cli.task_prefix,
        initial_state: cli.initial_state,
    };
    let config = SplitConfig::resolve(absolute_path(&cli.out_dir)?, overrides, &file);
    let prd_path = absolute_path(&cli.prd)?;

    let summary = split_prd_file(&prd_path, &config, cli.dry_run)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SplitSummary) {
    if summary.dry_run {
        println!(
            "{} Planned {} task files in {}",
            "Dry run:".yellow().bold(),
            summary.task_count,
            summary.out_dir.display()
        );
        for task in &summary.tasks {
            println!("  {}", task.path.display());
        }
        println!("Task list would be written to {}", summary.tasklist.display());
        return;
    }

    println!(
        "Generated {} task files in {}",
        summary.task_count.to_string().green().bold(),
        summary.out_dir.display()
    );
    println!("Task list written to {}", summary.tasklist.display());
}
