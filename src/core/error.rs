use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid file type or glob: {0}")]
    FileType(String),

    #[error("Error walking the file tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidPattern { .. } => "INVALID_PATTERN",
            Error::FileType(_) => "FILE_TYPE_ERROR",
            Error::Walk(_) => "WALK_ERROR",
            Error::Read { .. } => "READ_ERROR",
            Error::Write { .. } => "WRITE_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// Process exit code for a fatal occurrence of this error.
    ///
    /// User input mistakes (bad pattern, bad file type) exit 1;
    /// filesystem failures exit 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPattern { .. } | Error::FileType(_) => 1,
            Error::Walk(_) | Error::Read { .. } | Error::Write { .. } | Error::Json(_) => 2,
        }
    }
}
