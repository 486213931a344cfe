//! Line-oriented terminal front end over [`AppState`].

use std::io::{BufRead, Write};

use anyhow::Context;

use kebab_inventory::{LedgerSnapshot, TableKind};

use crate::commands::AppState;
use crate::types::ActionOutcome;

pub const HELP: &str = "\
commands:
  show [--json]                          full report (all tables and final stock)
  edit <table> <product>=<count> ...     set counts; table is initial|production|shipment|returns
                                         (use quotes for names with spaces: \"kebab koobideh\"=4)
  save                                   write the data file
  export                                 write the HTML report
  recover                                reload the data file
  help                                   this text
  quit                                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show { json: bool },
    Edit { table: TableKind, edits: Vec<(String, String)> },
    Save,
    Export,
    Recover,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let words = split_words(line)?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match head.to_lowercase().as_str() {
        "show" | "report" => ShellCommand::Show {
            json: rest.iter().any(|w| w == "--json"),
        },
        "edit" => {
            let (table, pairs) = rest
                .split_first()
                .ok_or_else(|| "usage: edit <table> <product>=<count> ...".to_string())?;
            let table: TableKind = table.parse()?;
            let edits = pairs
                .iter()
                .map(|pair| {
                    pair.rsplit_once('=')
                        .map(|(p, v)| (p.to_string(), v.to_string()))
                        .ok_or_else(|| format!("expected <product>=<count>, got {pair:?}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            ShellCommand::Edit { table, edits }
        }
        "save" => ShellCommand::Save,
        "export" => ShellCommand::Export,
        "recover" => ShellCommand::Recover,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command {other:?} (try `help`)")),
    };
    Ok(Some(command))
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if pending {
        words.push(current);
    }
    Ok(words)
}

/// Plain-text report: each input table, then final stock with a status mark
/// and the total.
pub fn render_text(snapshot: &LedgerSnapshot) -> String {
    let mut out = format!("date: {}\n", snapshot.date);
    let sections: [(&str, fn(&kebab_inventory::StockRow) -> i64); 4] = [
        ("initial", |r| r.initial),
        ("production", |r| r.production),
        ("shipment", |r| r.shipment),
        ("returns", |r| r.returns),
    ];
    for (title, value) in sections {
        out.push_str(&format!("\n{title}\n"));
        for row in &snapshot.rows {
            out.push_str(&format!("  {}: {}\n", row.product, value(row)));
        }
    }

    out.push_str("\nfinal\n");
    for row in &snapshot.rows {
        let mark = if row.is_negative() { "!!" } else { "ok" };
        out.push_str(&format!("  [{mark}] {}: {}\n", row.product, row.final_stock));
    }
    out.push_str(&format!("total: {}\n", snapshot.totals.final_stock));
    out
}

/// Read commands until `quit` or end of input, printing each action's outcome.
pub fn run<R: BufRead, W: Write>(state: &mut AppState, input: R, mut out: W) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{}", ActionOutcome::failed(msg))?;
                continue;
            }
        };
        tracing::debug!(?command, "shell command");

        let outcome = match command {
            ShellCommand::Show { json: true } => {
                writeln!(out, "{}", serde_json::to_string_pretty(&state.snapshot())?)?;
                continue;
            }
            ShellCommand::Show { json: false } => {
                write!(out, "{}", render_text(&state.snapshot()))?;
                continue;
            }
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellCommand::Quit => break,
            ShellCommand::Edit { table, edits } => state.apply_edits(table, edits),
            ShellCommand::Save => state.save(),
            ShellCommand::Export => state.export_html(),
            ShellCommand::Recover => state.recover(),
        };
        writeln!(out, "{outcome}")?;
    }
    out.flush()?;
    Ok(())
}
