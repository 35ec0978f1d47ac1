// src/config.rs

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory (relative to the working directory) holding the talk tables.
pub const DATA_DIR: &str = "data";
/// Raw export consumed by both jobs.
pub const INPUT_FILE: &str = "ted_talks_en.csv";
/// Cleaned table handed to the indexing pipeline.
pub const OUTPUT_FILE: &str = "ted_talks_cleaned.csv";

/// Talks below this many words are treated as placeholders (music, applause).
pub const SHORT_TALK_THRESHOLD: usize = 50;

/// Rough sub-word tokens per word for the embedding model.
pub const TOKENS_PER_WORD: f64 = 1.33;
/// USD per one million embedding tokens (text-embedding-3-small).
pub const COST_PER_MILLION_TOKENS: f64 = 0.02;

pub const PERCENTILE: f64 = 0.95;
pub const PREVIEW_CHARS: usize = 60;
pub const MAX_SHORT_EXAMPLES: usize = 5;

/// Columns kept by the cleaning job, in output order.
pub const RETAINED_COLUMNS: [&str; 6] = [
    "talk_id",
    "title",
    "speaker_1",
    "published_date",
    "url",
    "transcript",
];

/// Input and output locations for one job invocation.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl DataPaths {
    /// Resolve the conventional file names under `<base>/data`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let data_dir = base.as_ref().join(DATA_DIR);
        Self {
            input: data_dir.join(INPUT_FILE),
            output: data_dir.join(OUTPUT_FILE),
        }
    }

    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().context("resolving current working directory")?;
        Ok(Self::under(cwd))
    }
}
