// src/inspect/mod.rs
pub mod report;
pub mod stats;

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{
    COST_PER_MILLION_TOKENS, MAX_SHORT_EXAMPLES, PERCENTILE, PREVIEW_CHARS, SHORT_TALK_THRESHOLD,
    TOKENS_PER_WORD,
};
use crate::table::{
    self, cell, is_blank, word_count, Row, Table, TALK_ID, TITLE, TRANSCRIPT, URL,
};

pub use stats::LengthStats;

/// Column used to detect repeated talks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKey {
    Url,
    /// `url` is absent; titles were compared instead.
    Title,
    /// Neither column exists.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortTalk {
    pub talk_id: String,
    pub title: String,
    pub word_count: usize,
    /// Leading characters of the transcript, line breaks flattened to spaces.
    pub preview: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub total_words: usize,
    pub estimated_tokens: f64,
    /// USD to embed every usable transcript.
    pub estimated_cost: f64,
}

impl CostEstimate {
    pub fn from_words(total_words: usize) -> Self {
        let estimated_tokens = total_words as f64 * TOKENS_PER_WORD;
        Self {
            total_words,
            estimated_tokens,
            estimated_cost: estimated_tokens / 1_000_000.0 * COST_PER_MILLION_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FilterMissingTranscripts,
    FilterShortTalks,
    DeduplicateByUrl,
}

impl Action {
    pub fn describe(self) -> String {
        match self {
            Action::FilterMissingTranscripts => {
                "Filter rows with missing/blank transcript".to_string()
            }
            Action::FilterShortTalks => format!(
                "Filter rows where word count < {} (removes musical performances)",
                SHORT_TALK_THRESHOLD
            ),
            Action::DeduplicateByUrl => "Deduplicate by url".to_string(),
        }
    }
}

/// Everything the exploratory pass measures. Read-only with respect to the
/// table it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct EdaReport {
    pub total_rows: usize,
    pub missing_transcripts: usize,
    /// `None` when the table has no `title` column.
    pub missing_titles: Option<usize>,
    pub duplicate_key: DuplicateKey,
    pub duplicates: usize,
    /// `None` when no row has a usable transcript.
    pub length: Option<LengthStats>,
    pub short_talks: usize,
    /// First few short talks, in table order.
    pub short_examples: Vec<ShortTalk>,
    pub cost: CostEstimate,
    /// Empty means the data is clean.
    pub actions: Vec<Action>,
}

impl EdaReport {
    pub fn missing_transcript_pct(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.missing_transcripts as f64 / self.total_rows as f64 * 100.0
        }
    }

    pub fn is_clean(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Load the table at `input` and measure it.
pub fn run_eda(input: &Path) -> Result<EdaReport> {
    info!(path = %input.display(), "starting EDA");
    let table = table::load_table(input)?;
    Ok(inspect(&table))
}

#[tracing::instrument(level = "debug", skip(table), fields(rows = table.len()))]
pub fn inspect(table: &Table) -> EdaReport {
    let transcript = table.column_index(TRANSCRIPT);
    let title = table.column_index(TITLE);
    let talk_id = table.column_index(TALK_ID);

    let missing_transcripts = table
        .rows
        .iter()
        .filter(|row| is_blank(field(row, transcript)))
        .count();
    let missing_titles =
        title.map(|idx| table.rows.iter().filter(|row| cell(row, idx).is_none()).count());

    let (duplicate_key, duplicates) = match (table.column_index(URL), title) {
        (Some(idx), _) => (DuplicateKey::Url, count_repeats(table, idx)),
        (None, Some(idx)) => (DuplicateKey::Title, count_repeats(table, idx)),
        (None, None) => (DuplicateKey::None, 0),
    };
    debug!(?duplicate_key, duplicates, "duplicate check");

    // Length, junk and cost figures only look at usable transcripts.
    let usable: Vec<(&Row, usize)> = table
        .rows
        .iter()
        .filter(|row| !is_blank(field(row, transcript)))
        .map(|row| (row, word_count(field(row, transcript))))
        .collect();
    let counts: Vec<usize> = usable.iter().map(|&(_, n)| n).collect();

    let short: Vec<&(&Row, usize)> = usable
        .iter()
        .filter(|(_, n)| *n < SHORT_TALK_THRESHOLD)
        .collect();
    let short_examples = short
        .iter()
        .take(MAX_SHORT_EXAMPLES)
        .map(|&&(row, n)| ShortTalk {
            talk_id: field(row, talk_id).unwrap_or("N/A").to_string(),
            title: field(row, title).unwrap_or("Untitled").to_string(),
            word_count: n,
            preview: preview(field(row, transcript).unwrap_or_default()),
        })
        .collect();

    let mut actions = Vec::new();
    if missing_transcripts > 0 {
        actions.push(Action::FilterMissingTranscripts);
    }
    if !short.is_empty() {
        actions.push(Action::FilterShortTalks);
    }
    if duplicates > 0 {
        actions.push(Action::DeduplicateByUrl);
    }

    EdaReport {
        total_rows: table.len(),
        missing_transcripts,
        missing_titles,
        duplicate_key,
        duplicates,
        length: LengthStats::from_counts(&counts, PERCENTILE),
        short_talks: short.len(),
        short_examples,
        cost: CostEstimate::from_words(counts.iter().sum()),
        actions,
    }
}

fn field(row: &Row, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|idx| cell(row, idx))
}

fn count_repeats(table: &Table, idx: usize) -> usize {
    table.repeat_flags(idx).into_iter().filter(|&dup| dup).count()
}

fn preview(transcript: &str) -> String {
    transcript
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
