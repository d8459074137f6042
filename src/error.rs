//! Error types for encoding and decoding containers.

use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a container.
#[derive(Error, Debug)]
pub enum Error {
    /// A symbol in the input has no codeword in the derived table.
    ///
    /// Only reachable if the code table was built from a different input
    /// than the one being encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The container is malformed.
    ///
    /// This covers missing section markers, bad header entries, invalid
    /// escapes, a padding value outside 0..=7, and payload bits that do not
    /// decode to a complete symbol sequence.
    #[error("format error: {0}")]
    Format(String),

    /// I/O failure from the surrounding file layer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// True for errors caused by a corrupt or foreign container.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}
