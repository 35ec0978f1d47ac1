// src/table/mod.rs
pub mod load;
pub mod write;

use std::collections::HashSet;

pub use load::load_table;
pub use write::write_table;

pub const TALK_ID: &str = "talk_id";
pub const TITLE: &str = "title";
pub const URL: &str = "url";
pub const TRANSCRIPT: &str = "transcript";

/// Field values that dataframe readers conventionally load as missing.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One talk. Cells are aligned with `Table::headers`; `None` is a missing value.
pub type Row = Vec<Option<String>>;

/// A fully memory-resident talk table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// Rows in file order.
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    /// Returns how many rows were dropped.
    pub fn retain_rows<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(keep);
        before - self.rows.len()
    }

    /// For each row, whether its value in column `idx` already appeared in an
    /// earlier row. Missing values compare equal to each other.
    pub fn repeat_flags(&self, idx: usize) -> Vec<bool> {
        let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(self.rows.len());
        self.rows
            .iter()
            .map(|row| !seen.insert(cell(row, idx)))
            .collect()
    }

    /// Restrict to the listed columns that exist, in the order given.
    /// Unknown names are skipped.
    pub fn project(&self, columns: &[&str]) -> Table {
        let picks: Vec<(usize, &str)> = columns
            .iter()
            .filter_map(|&name| self.column_index(name).map(|idx| (idx, name)))
            .collect();

        let headers = picks.iter().map(|(_, name)| name.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                picks
                    .iter()
                    .map(|&(idx, _)| row.get(idx).cloned().flatten())
                    .collect()
            })
            .collect();

        Table::new(headers, rows)
    }
}

/// Value of column `idx` in `row`, or `None` if missing.
pub fn cell(row: &Row, idx: usize) -> Option<&str> {
    row.get(idx).and_then(|c| c.as_deref())
}

/// Convert a raw CSV field into a cell, mapping missing-value markers to `None`.
pub fn parse_cell(raw: &str) -> Option<String> {
    if NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Whitespace-separated token count; a missing transcript counts as empty.
pub fn word_count(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.split_whitespace().count())
}

/// True when the transcript is missing or only whitespace.
pub fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}
