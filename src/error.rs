use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MagicError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Input is empty: {0}")]
    EmptyInput(String),

    #[error("No recognizable image signature found")]
    NoSignatureFound,

    #[error("No hidden image found after offset {after}")]
    NoHiddenSegment { after: usize },

    #[error("Invalid range {start}..{end} for buffer of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, MagicError>;

impl MagicError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path);
        }
        Self::Io { path, source }
    }
}
