use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use tasklist_core::{Filter, MAX_BATCH_SIZE};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "Edit the task list from the command line",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// JSON file holding the stored list.
    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// TOML config file.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add an item to the top of the list.
    Add { title: String },
    /// Print the items of one view.
    List {
        #[arg(short, long, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Change the title of an unchecked item.
    Edit { id: u64, title: String },
    /// Mark an item completed.
    Check { id: u64 },
    /// Mark an item not completed.
    Uncheck { id: u64 },
    /// Move an item to the trash.
    Delete { id: u64 },
    /// Take an item back out of the trash.
    Restore { id: u64 },
    /// Add placeholder items.
    Seed {
        #[arg(
            short,
            long,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_BATCH_SIZE as u64)
        )]
        count: Option<usize>,
    },
    /// Permanently remove everything in the trash.
    Purge,
    /// Show how many items each view holds.
    Counts,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

pub fn resolve_data_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::data_dir().context("no data directory on this platform; pass --data")?;
    Ok(base.join("tasklist").join("store.json"))
}

/// The explicit config path, or the default one when that file exists.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("tasklist").join("config.toml"))
            .filter(|path| path.exists())
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tasklist_core::Filter;

    use super::{Command, GlobalCli};

    #[test]
    fn parses_subcommands_and_global_flags() {
        let cli = GlobalCli::parse_from(["tasklist", "list", "--filter", "trash", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Some(Command::List {
                filter: Filter::Trash
            })
        );

        let cli = GlobalCli::parse_from(["tasklist", "--data", "/tmp/x.json", "edit", "3", "new title"]);
        assert_eq!(cli.data.as_deref(), Some(std::path::Path::new("/tmp/x.json")));
        assert_eq!(
            cli.command,
            Some(Command::Edit {
                id: 3,
                title: "new title".to_string()
            })
        );
    }

    #[test]
    fn seed_count_is_bounded() {
        let cli = GlobalCli::parse_from(["tasklist", "seed", "--count", "1000"]);
        assert_eq!(cli.command, Some(Command::Seed { count: Some(1000) }));

        for count in ["0", "1001", "18446744073709551615"] {
            assert!(
                GlobalCli::try_parse_from(["tasklist", "seed", "--count", count]).is_err(),
                "{count}"
            );
        }
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(GlobalCli::try_parse_from(["tasklist", "list", "--filter", "archived"]).is_err());
    }
}
