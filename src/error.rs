use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while reading the talk table. Everything past loading
/// degrades instead of failing.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {} as CSV: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "{} record {record} has {found} fields, header has {expected}",
        .path.display()
    )]
    TooManyFields {
        path: PathBuf,
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("{} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}
