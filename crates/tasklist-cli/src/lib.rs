pub mod cli;
pub mod commands;
pub mod file_store;
pub mod render;

use std::ffi::OsString;
use std::fs;
use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tasklist_core::{Config, Persistence, SaveOutcome, Session};
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::file_store::FileStore;

#[tracing::instrument(skip_all)]
pub fn run<W: Write>(raw_args: Vec<OsString>, out: &mut W) -> anyhow::Result<()> {
    let cli = match cli::GlobalCli::try_parse_from(raw_args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            write!(out, "{err}")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    cli::init_tracing(cli.verbose, cli.quiet)?;
    info!(verbose = cli.verbose, quiet = cli.quiet, "starting tasklist CLI");

    let cfg = load_config(cli.config)?;
    let data_path = cli::resolve_data_path(cli.data)?;
    debug!(data = %data_path.display(), key = %cfg.storage_key, "resolved storage");

    let persistence = Persistence::new(FileStore::new(&data_path), cfg.storage_key.clone());
    let command = cli.command.unwrap_or(Command::List {
        filter: Default::default(),
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        // Unlike the browser, a store that cannot be read is fatal here:
        // starting empty would overwrite it on the next save.
        let loaded = persistence
            .load()
            .await
            .with_context(|| format!("failed to load {}", data_path.display()))?;
        let mut session = Session::new(&cfg);
        session.finish_load(Ok(loaded));

        let report = commands::dispatch(&mut session, command, out)?;

        if session.revision() > 0 {
            let outcome = persistence
                .save_with_retry(&session.snapshot(), &cfg.retry, tokio::time::sleep)
                .await
                .with_context(|| format!("failed to save {}", data_path.display()))?;
            if outcome == SaveOutcome::Stale {
                warn!("snapshot was not written");
            }
        }

        commands::print_report(&mut session, report, out)
    })?;

    info!("done");
    Ok(())
}

fn load_config(explicit: Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = cli::resolve_config_path(explicit) else {
        debug!("no config file; using defaults");
        return Ok(Config::default());
    };

    info!(config = %path.display(), "loading config");
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Config::from_toml_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
