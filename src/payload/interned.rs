//! A [`Payload`] that stores its text in a shared interner, based on `lasso`.

use std::{fmt, sync::Arc};

use lasso::{Spur, ThreadedRodeo};

use super::{Payload, SyntaxKind, Token};

/// Interner shared by all [`InternedPayload`]s of one or more trees.
pub type TextInterner = Arc<ThreadedRodeo<Spur>>;

/// Constructs a new, empty [`TextInterner`].
#[inline]
pub fn new_interner() -> TextInterner {
    Arc::new(ThreadedRodeo::new())
}

/// A payload that deduplicates its text.
///
/// Identifiers and keywords tend to repeat a lot in a parse tree. Every `InternedPayload` created from the same
/// [`TextInterner`] stores a key into that interner instead of its own copy of the string.
#[derive(Clone)]
pub struct InternedPayload {
    kind:     SyntaxKind,
    key:      Spur,
    interner: TextInterner,
}

impl InternedPayload {
    pub fn new(interner: &TextInterner, kind: impl Into<SyntaxKind>, text: &str) -> Self {
        Self {
            kind:     kind.into(),
            key:      interner.get_or_intern(text),
            interner: Arc::clone(interner),
        }
    }

    pub fn from_token<T: Token + ?Sized>(interner: &TextInterner, token: &T) -> Self {
        Self::new(interner, token.kind(), token.text())
    }

    /// The interned key of this payload's text.
    #[inline]
    pub fn key(&self) -> Spur {
        self.key
    }

    #[inline]
    pub fn interner(&self) -> &TextInterner {
        &self.interner
    }
}

impl Payload for InternedPayload {
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
        self.interner.resolve(&self.key)
    }

    #[inline]
    fn set_text(&mut self, text: &str) {
        self.key = self.interner.get_or_intern(text);
    }
}

impl fmt::Debug for InternedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternedPayload")
            .field("kind", &self.kind)
            .field("text", &self.text())
            .finish()
    }
}
