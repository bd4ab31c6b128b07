//! CLI entry point for taskdeck.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use taskdeck_app::{AppConfig, TaskBoard};
use taskdeck_store::LocalStore;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod tui;
mod view;

/// Local task list with filters, sorting, statistics, and a terminal UI.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: local task list with filters, sorting, and a terminal UI"
)]
struct Cli {
    /// Override the state directory (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

/// Output layout for `ls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    /// One task per line plus a statistics footer.
    Text,
    /// The wire-layout task records as pretty-printed JSON.
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        desc: String,
        /// high, medium, or low.
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks, optionally filtered and re-sorted.
    Ls {
        /// Case-insensitive substring of title or description.
        #[arg(long)]
        search: Option<String>,
        /// high, medium, or low.
        #[arg(long)]
        priority: Option<String>,
        /// Exact due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// pending or completed.
        #[arg(long)]
        status: Option<String>,
        /// priority or due_date; defaults to the configured sort.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, value_enum, default_value_t = LsFormat::Text)]
        format: LsFormat,
    },

    /// Flip a task between pending and completed.
    Toggle {
        /// Task id as printed by `ls`.
        id: u64,
    },

    /// Delete a task after confirmation.
    Rm {
        /// Task id as printed by `ls`.
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Flip the active sort key and print the re-sorted list.
    Sort,

    /// Flip the persisted dark-mode flag.
    Dark,

    /// Print collection statistics.
    Stats,

    /// Launch the interactive terminal UI.
    Tui,
}

fn main() -> Result<()> {
    let Cli { data_dir, cmd } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    let config = AppConfig::load_from(config_dir())?;
    let store = LocalStore::open(state_dir(data_dir, &config))?;
    let board = TaskBoard::open(store, config.default_sort);

    match cmd {
        Command::Tui => tui::run(board),
        other => commands::run(board, other),
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskdeck")
}

fn state_dir(cli_override: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli_override.unwrap_or_else(|| {
        config.data_dir_or(
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskdeck"),
        )
    })
}

const fn should_install_tracing(cmd: &Command) -> bool {
    // The TUI owns the terminal; log lines would tear the screen.
    !matches!(cmd, Command::Tui)
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "taskdeck",
            "add",
            "--title",
            "Write report",
            "--desc",
            "Q3 numbers",
            "--priority",
            "high",
            "--due",
            "2026-09-01",
        ]);

        match cli.cmd {
            Command::Add {
                title,
                desc,
                priority,
                due,
            } => {
                assert_eq!(title, "Write report");
                assert_eq!(desc, "Q3 numbers");
                assert_eq!(priority, "high");
                assert_eq!(due.as_deref(), Some("2026-09-01"));
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_ls_filters() {
        let cli = Cli::parse_from([
            "taskdeck",
            "ls",
            "--search",
            "report",
            "--status",
            "pending",
            "--format",
            "json",
        ]);

        match cli.cmd {
            Command::Ls {
                search,
                status,
                format,
                priority,
                ..
            } => {
                assert_eq!(search.as_deref(), Some("report"));
                assert_eq!(status.as_deref(), Some("pending"));
                assert_eq!(format, LsFormat::Json);
                assert_eq!(priority, None);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn parse_rm_with_confirmation_skip() {
        let cli = Cli::parse_from(["taskdeck", "rm", "1712345678901", "--yes"]);
        match cli.cmd {
            Command::Rm { id, yes } => {
                assert_eq!(id, 1_712_345_678_901);
                assert!(yes);
            }
            _ => panic!("expected rm command"),
        }
    }

    #[test]
    fn parse_data_dir_override() {
        let cli = Cli::parse_from(["taskdeck", "--data-dir", "/tmp/deck", "stats"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/deck")));
    }

    #[test]
    fn skips_tracing_in_tui_mode() {
        assert!(!should_install_tracing(&Command::Tui));
        assert!(should_install_tracing(&Command::Stats));
    }

    #[test]
    fn cli_override_wins_over_config_data_dir() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/from-config")),
            ..AppConfig::default()
        };
        assert_eq!(
            state_dir(Some(PathBuf::from("/from-flag")), &config),
            PathBuf::from("/from-flag")
        );
        assert_eq!(state_dir(None, &config), PathBuf::from("/from-config"));
    }
}
