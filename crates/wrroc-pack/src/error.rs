use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive entry escapes the extraction directory: {name}")]
    UnsafeEntry { name: String },

    #[error("document not found: {}", path.display())]
    MissingDocument { path: PathBuf },

    #[error("invalid document {}: {reason}", path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("extraction directory is not empty: {}", path.display())]
    TargetNotEmpty { path: PathBuf },

    #[error("refusing to overwrite the original document {}", path.display())]
    WouldOverwrite { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PackResult<T> = Result<T, PackError>;
