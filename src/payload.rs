//! Per-node payloads and the token-like values they can be initialized from.
//!
//! The tree and its matching algorithms only ever look at a payload's [`SyntaxKind`] and text. Everything else a
//! payload wants to carry is its own business.

#[cfg(feature = "interning")]
mod interned;
#[cfg(feature = "interning")]
pub use self::interned::{new_interner, InternedPayload, TextInterner};

use std::fmt;

use text_size::{TextRange, TextSize};

/// `SyntaxKind` is the integer type code of a tree node or token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SyntaxKind(pub u32);

impl From<u32> for SyntaxKind {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<u16> for SyntaxKind {
    #[inline]
    fn from(raw: u16) -> Self {
        Self(u32::from(raw))
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token-like value, as produced by a lexer, that a [`Payload`] can be initialized from.
pub trait Token {
    fn kind(&self) -> SyntaxKind;

    fn text(&self) -> &str;

    /// The range of source text this token was lexed from.
    fn text_range(&self) -> TextRange;
}

/// The data owned by a single tree node.
///
/// A payload is owned by exactly one [`Ast`](crate::Ast) node and is dropped together with it.
pub trait Payload {
    fn kind(&self) -> SyntaxKind;

    fn set_kind(&mut self, kind: SyntaxKind);

    fn text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    /// Overwrites both the type code and the text of this payload.
    #[inline]
    fn initialize(&mut self, kind: SyntaxKind, text: &str) {
        self.set_kind(kind);
        self.set_text(text);
    }

    /// Copies type code and text from another payload.
    #[inline]
    fn initialize_from<Q>(&mut self, other: &Q)
    where
        Q: Payload + ?Sized,
    {
        self.initialize(other.kind(), other.text());
    }

    /// Copies type code and text from a token.
    #[inline]
    fn initialize_from_token<T>(&mut self, token: &T)
    where
        T: Token + ?Sized,
    {
        self.initialize(token.kind(), token.text());
    }
}

/// The default [`Payload`]: a type code and an owned string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CommonPayload {
    kind: SyntaxKind,
    text: String,
}

impl CommonPayload {
    pub fn new(kind: impl Into<SyntaxKind>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub fn from_token<T: Token + ?Sized>(token: &T) -> Self {
        Self::new(token.kind(), token.text())
    }
}

impl Payload for CommonPayload {
    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    fn set_kind(&mut self, kind: SyntaxKind) {
        self.kind = kind;
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

/// The default [`Token`]: type code, owned text and the source range it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonToken {
    kind:  SyntaxKind,
    text:  String,
    range: TextRange,
}

impl CommonToken {
    pub fn new(kind: impl Into<SyntaxKind>, text: impl Into<String>, start: TextSize) -> Self {
        let text = text.into();
        let range = TextRange::at(start, TextSize::of(text.as_str()));
        Self {
            kind: kind.into(),
            text,
            range,
        }
    }
}

impl Token for CommonToken {
    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    fn text_range(&self) -> TextRange {
        self.range
    }
}
