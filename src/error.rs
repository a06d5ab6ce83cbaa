//! Error types for cdetect.
//!
//! Only opening and parsing an image can fail from a caller's point of view.
//! Errors raised while a probe reads section content are absorbed by the
//! detection chain and never reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cdetect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The file is not an ELF object (bad magic or another container format)
    #[error("{}: not an ELF", path.display())]
    NotAnElf { path: PathBuf },

    /// ELF magic is present but the container could not be parsed
    #[error("{}: malformed ELF: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("File size of {found} bytes exceeds the maximum allowed size of {limit} bytes.")]
    FileTooLarge { limit: u64, found: u64 },

    /// Section content could not be materialised
    #[error("Cannot read section {section}: {reason}")]
    SectionRead { section: String, reason: String },

    #[error("Window size must be even and non-zero, got {0}")]
    InvalidWindowSize(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file name could neither be found as given nor on `$PATH`
    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cdetect operations
pub type Result<T> = std::result::Result<T, Error>;
