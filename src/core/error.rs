//! Error types raised while checking a FASTQ stream. Every variant is fatal.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Where in the input a decode error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Line number where the error occurred (starting with 1)
    pub line: u64,
    /// ID of the record if its header was already read
    pub id: Option<String>,
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = self.id.as_ref() {
            write!(f, "record '{id}' at ")?;
        }
        write!(f, "line {}", self.line)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{position}: invalid sequence character '{found}'")]
    InvalidSymbol {
        position: ErrorPosition,
        found: String,
    },

    #[error("{position}: sequence length {seq_len} != quality length {qual_len}")]
    LengthMismatch {
        position: ErrorPosition,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("{position}: quality character '{found}' is below phred offset {offset}")]
    QualityOutOfRange {
        position: ErrorPosition,
        found: String,
        offset: u8,
    },

    #[error("{position}: {msg}")]
    Malformed { position: ErrorPosition, msg: String },

    #[error("read failed at line {line}")]
    Io {
        line: u64,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("read {id} length = {length} longer than max length = {max}; rerun with a larger --max-length")]
    RecordTooLong { id: String, length: usize, max: usize },

    #[error("failed to open fastq file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
