//! Rewindable lookahead over forward-only symbol sources.
//!
//! A [`LookaheadBuffer`] sits between a lexer or parser and a [`SymbolSource`] that can only be read once, front to
//! back. It lets the consumer look an arbitrary number of symbols ahead, and it lets the consumer take checkpoints
//! ([`mark`](LookaheadBuffer::mark)) that it can later return to ([`rewind`](LookaheadBuffer::rewind)) after trying
//! to match something speculatively. Symbols that a checkpoint may still need are kept in the buffer, so rewinding
//! never reads from the source again.
//!
//! # Examples
//! ```
//! use synrt::{LookaheadBuffer, StrSource};
//!
//! let mut input = LookaheadBuffer::new(StrSource::new("hello"));
//! let marker = input.mark();
//! for _ in 0..3 {
//!     input.consume();
//! }
//! assert_eq!(input.la(1).unwrap(), Some('l'));
//! input.rewind(marker);
//! assert_eq!(input.la(1).unwrap(), Some('h'));
//! ```

mod error;
mod lookahead;
mod queue;
mod source;

pub use self::{
    error::SourceError,
    lookahead::{LookaheadBuffer, Marker},
    queue::SymbolQueue,
    source::{IterSource, ReadSource, StrSource, SymbolSource},
};
