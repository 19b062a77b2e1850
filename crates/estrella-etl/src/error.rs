use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("{context} line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        context: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("seed table has no rows to sample from")]
    EmptySeed,

    #[error("invalid sample year {0}")]
    InvalidYear(i32),
}
