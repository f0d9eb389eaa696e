use std::io::Write;
use std::rc::Rc;

use tasklist_core::{Filter, FilterCounts, Item};
use unicode_width::UnicodeWidthStr;

#[tracing::instrument(skip(out, items))]
pub fn print_items<W: Write>(out: &mut W, filter: Filter, items: &[Rc<Item>]) -> anyhow::Result<()> {
    if items.is_empty() {
        writeln!(out, "no items in {filter}")?;
        return Ok(());
    }

    let headers = vec!["ID".to_string(), "Done".to_string(), "Title".to_string()];
    let rows = items
        .iter()
        .map(|item| {
            let state = if item.delete_flag {
                "trash"
            } else if item.completed_flag {
                "[x]"
            } else {
                "[ ]"
            };
            vec![item.id.to_string(), state.to_string(), item.title.clone()]
        })
        .collect();

    write_table(out, headers, rows)
}

pub fn print_counts<W: Write>(out: &mut W, counts: &FilterCounts) -> anyhow::Result<()> {
    let headers = vec!["View".to_string(), "Items".to_string()];
    let rows = Filter::ALL
        .iter()
        .map(|filter| vec![filter.to_string(), counts.get(*filter).to_string()])
        .collect();
    write_table(out, headers, rows)
}

fn write_table<W: Write>(
    writer: &mut W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let last = column_count.saturating_sub(1);
    write_row(writer, &headers, &widths, last)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$}", "", width = widths[idx])?;
        if idx != last {
            write!(writer, " ")?;
        }
    }
    writeln!(writer)?;

    for row in &rows {
        write_row(writer, row, &widths, last)?;
    }

    Ok(())
}

fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String],
    widths: &[usize],
    last: usize,
) -> anyhow::Result<()> {
    for (idx, cell) in cells.iter().enumerate() {
        if idx == last {
            write!(writer, "{cell}")?;
        } else {
            let padding = widths[idx].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
    }
    writeln!(writer)?;
    Ok(())
}
