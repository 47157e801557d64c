use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RdosError {
    /// The directory record is not exactly `RECORD_SIZE` bytes long.
    #[error("Malformed directory record: expected 32 bytes, got {len}")]
    MalformedRecord { len: usize },
    /// The block store returned fewer bytes than the entry requires.
    #[error("Truncated read: needed {needed} bytes, block store returned {got}")]
    TruncatedRead { needed: usize, got: usize },
    /// Content was requested from a deleted or end-of-directory record.
    #[error("Invalid entry: {0}")]
    InvalidEntry(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RdosError>;
