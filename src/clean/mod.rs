// src/clean/mod.rs
use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::config::{RETAINED_COLUMNS, SHORT_TALK_THRESHOLD};
use crate::inspect::report::thousands;
use crate::table::{self, cell, is_blank, word_count, Table, TRANSCRIPT, URL};

/// Per-stage removal counts. Each count is relative to the table left by the
/// previous stage, so the stages add up to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub original_rows: usize,
    pub empty_removed: usize,
    pub short_removed: usize,
    /// `None` when the table has no `url` column and deduplication was skipped.
    pub duplicates_removed: Option<usize>,
    pub final_rows: usize,
}

impl CleanStats {
    pub fn total_removed(&self) -> usize {
        self.original_rows - self.final_rows
    }
}

/// Outcome of a full cleaning run.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub stats: CleanStats,
    pub output: PathBuf,
    /// Columns written, in output order.
    pub columns: Vec<String>,
}

/// Drop rows with a missing or whitespace-only transcript.
pub fn drop_empty_transcripts(table: &mut Table) -> usize {
    let idx = table.column_index(TRANSCRIPT);
    table.retain_rows(|row| !is_blank(idx.and_then(|i| cell(row, i))))
}

/// Drop rows whose transcript has fewer than `SHORT_TALK_THRESHOLD` words.
pub fn drop_short_talks(table: &mut Table) -> usize {
    let idx = table.column_index(TRANSCRIPT);
    table.retain_rows(|row| word_count(idx.and_then(|i| cell(row, i))) >= SHORT_TALK_THRESHOLD)
}

/// Keep the first row for each `url`. `None` if there is no `url` column.
pub fn dedupe_by_url(table: &mut Table) -> Option<usize> {
    let idx = table.column_index(URL)?;
    let mut repeats = table.repeat_flags(idx).into_iter();
    Some(table.retain_rows(|_| !repeats.next().unwrap_or(false)))
}

/// Run the fixed filter sequence (empty, short, duplicate) and project onto
/// the retained columns.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.len()))]
pub fn clean(mut table: Table) -> (Table, CleanStats) {
    let original_rows = table.len();

    let empty_removed = drop_empty_transcripts(&mut table);
    info!(removed = empty_removed, "removed empty transcripts");

    let short_removed = drop_short_talks(&mut table);
    info!(
        removed = short_removed,
        threshold = SHORT_TALK_THRESHOLD,
        "removed short talks"
    );

    let duplicates_removed = dedupe_by_url(&mut table);
    match duplicates_removed {
        Some(removed) => info!(removed, "removed duplicate urls"),
        None => warn!("no 'url' column; skipping deduplication"),
    }

    let projected = table.project(&RETAINED_COLUMNS);
    let stats = CleanStats {
        original_rows,
        empty_removed,
        short_removed,
        duplicates_removed,
        final_rows: projected.len(),
    };
    (projected, stats)
}

/// Load `input`, clean it and write the result to `output`.
/// Nothing is written if loading fails.
pub fn run_clean(input: &Path, output: &Path) -> Result<CleanReport> {
    info!(input = %input.display(), "starting cleaning pipeline");
    let raw = table::load_table(input)?;

    let (cleaned, stats) = clean(raw);
    table::write_table(&cleaned, output)
        .with_context(|| format!("writing cleaned table to {}", output.display()))?;

    info!(
        output = %output.display(),
        rows = stats.final_rows,
        removed = stats.total_removed(),
        "cleaning complete"
    );
    Ok(CleanReport {
        stats,
        output: output.to_path_buf(),
        columns: cleaned.headers,
    })
}

impl CleanReport {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = &self.stats;
        writeln!(out, "   Original rows: {}", thousands(s.original_rows))?;
        writeln!(out, "   Removed {} empty transcripts.", s.empty_removed)?;
        writeln!(
            out,
            "   Removed {} short talks (<{} words).",
            s.short_removed, SHORT_TALK_THRESHOLD
        )?;
        match s.duplicates_removed {
            Some(n) => writeln!(out, "   Removed {} duplicates.", n)?,
            None => writeln!(out, "   Skipped deduplication ('url' column missing).")?,
        }
        writeln!(out, "{}", "-".repeat(30))?;
        writeln!(out, " Cleaning complete!")?;
        writeln!(out, "   Output file: {}", self.output.display())?;
        writeln!(out, "   Columns: {}", self.columns.join(", "))?;
        writeln!(
            out,
            "   Final row count: {} (removed {} rows total)",
            thousands(s.final_rows),
            s.total_removed()
        )?;
        Ok(())
    }
}
