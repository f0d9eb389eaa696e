use std::io::Write;

use anyhow::bail;
use tasklist_core::{Filter, ItemPatch, Session};
use tracing::info;

use crate::cli::Command;
use crate::render;

/// What to print once the command has run and the list is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Items(Filter),
    Counts,
}

#[tracing::instrument(skip(session, out))]
pub fn dispatch<W: Write>(
    session: &mut Session,
    command: Command,
    out: &mut W,
) -> anyhow::Result<Report> {
    let report = match command {
        Command::Add { title } => {
            let item = session.create_titled(title)?;
            writeln!(out, "added item {}", item.id)?;
            Report::Items(Filter::All)
        }
        Command::List { filter } => Report::Items(filter),
        Command::Edit { id, title } => {
            patch(session, id, ItemPatch::Title(title))?;
            writeln!(out, "renamed item {id}")?;
            Report::Items(Filter::All)
        }
        Command::Check { id } => {
            patch(session, id, ItemPatch::Completed(true))?;
            writeln!(out, "checked item {id}")?;
            Report::Items(Filter::All)
        }
        Command::Uncheck { id } => {
            patch(session, id, ItemPatch::Completed(false))?;
            writeln!(out, "unchecked item {id}")?;
            Report::Items(Filter::All)
        }
        Command::Delete { id } => {
            patch(session, id, ItemPatch::Deleted(true))?;
            writeln!(out, "moved item {id} to the trash")?;
            Report::Items(Filter::All)
        }
        Command::Restore { id } => {
            patch(session, id, ItemPatch::Deleted(false))?;
            writeln!(out, "restored item {id}")?;
            Report::Items(Filter::Trash)
        }
        Command::Seed { count } => {
            let count = count.unwrap_or(session.batch_size());
            let ids = session.create_batch_of(count)?;
            writeln!(out, "added {} placeholder items", ids.len())?;
            Report::Items(Filter::All)
        }
        Command::Purge => {
            let removed = session.purge_deleted()?;
            info!(removed, "purged trash");
            writeln!(out, "purged {removed} items")?;
            Report::Items(Filter::Trash)
        }
        Command::Counts => Report::Counts,
    };

    Ok(report)
}

pub fn print_report<W: Write>(session: &mut Session, report: Report, out: &mut W) -> anyhow::Result<()> {
    match report {
        Report::Items(filter) => {
            session.set_filter(filter);
            render::print_items(out, filter, &session.visible())
        }
        Report::Counts => render::print_counts(out, &session.counts()),
    }
}

fn patch(session: &mut Session, id: u64, patch: ItemPatch) -> anyhow::Result<()> {
    if !session.update(id, patch)? {
        bail!("no item with id {id}");
    }
    Ok(())
}
