//! `synrt` is the runtime layer underneath a generated lexer and parser.
//!
//! It provides two independent building blocks that the generated code composes:
//! - [`Ast`], a syntax tree of reference-counted nodes in first-child / next-sibling form, together with structural
//!   comparison and search. Comparisons look at node type codes only, and come in an exact and a partial (subset)
//!   flavour. See [`ast::matching`] for the rules.
//! - [`LookaheadBuffer`], a buffer over a forward-only [`SymbolSource`] with deferred consumption, arbitrary lookahead
//!   and nested checkpoints that a parser can [`mark`](LookaheadBuffer::mark) before trying a rule speculatively and
//!   [`rewind`](LookaheadBuffer::rewind) to if the attempt fails.
//!
//! The text and type code of a tree node live in its [`Payload`]. [`CommonPayload`] stores them directly; with the
//! `interning` feature (enabled by default), [`InternedPayload`](payload::InternedPayload) deduplicates node text
//! across trees.
//!
//! # Examples
//! ```
//! use synrt::{Ast, AstBuilder, CommonPayload};
//!
//! let mut builder = AstBuilder::new();
//! builder.start_node(CommonPayload::new(0u32, "call"));
//! builder.token(CommonPayload::new(1u32, "f"));
//! builder.token(CommonPayload::new(2u32, "x"));
//! builder.finish_node();
//! let tree: Ast = builder.finish().unwrap();
//!
//! // the pattern `call(f)` is a partial, but not an exact match of `call(f x)`
//! let pattern: Ast = Ast::create(0u32, "");
//! pattern.add_child(Ast::create(1u32, ""));
//! assert!(!tree.equals_tree(Some(&pattern)));
//! assert!(tree.equals_tree_partial(Some(&pattern)));
//! assert_eq!(tree.find_all_partial(Some(&pattern)).len(), 1);
//! ```
#![forbid(
    // missing_debug_implementations,
    unconditional_recursion,
    future_incompatible,
    // missing_docs,
)]
#![deny(unsafe_code)]

pub mod ast;
pub mod buffer;
pub mod payload;
mod utility_types;

// Reexport types for working with text positions.
pub use text_size::{TextLen, TextRange, TextSize};

pub use crate::{
    ast::{Ast, AstBuilder, Checkpoint, Preorder, Siblings, WeakAst},
    buffer::{IterSource, LookaheadBuffer, Marker, ReadSource, SourceError, StrSource, SymbolQueue, SymbolSource},
    payload::{CommonPayload, CommonToken, Payload, SyntaxKind, Token},
    utility_types::WalkEvent,
};
