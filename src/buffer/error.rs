use std::io;

/// Errors produced by the stock [`SymbolSource`](super::SymbolSource) implementations that read from I/O.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying reader failed
    #[error("failed to read symbol source: {0}")]
    Io(#[from] io::Error),
    /// The input is not valid UTF-8
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Offset of the first byte of the offending sequence
        offset: u32,
    },
}
