//! Sibling-linked syntax trees.
//!
//! Every [`Ast`] node owns one [`Payload`](crate::Payload) and holds two shared links: one to the head of its list of
//! children and one to its next sibling. A node's children are therefore not an array, but a linked list that is
//! reached through [`first_child`](Ast::first_child) and continued through [`next_sibling`](Ast::next_sibling).
//!
//! Nodes are reference counted. The same node may be linked into a tree and held by any number of external handles at
//! the same time, and is dropped when the last of them goes away. Links are _not_ checked for cycles: linking a node
//! below itself is a logic error that leaks the cycle.
//!
//! Tree comparison only ever looks at the [`SyntaxKind`](crate::SyntaxKind) of nodes, never at their text. See the
//! [`matching`] module for the exact and partial comparison rules and for searching a tree with a pattern.

pub(super) mod builder;
mod iter;
pub mod matching;
mod node;

pub use self::{
    builder::{AstBuilder, Checkpoint},
    iter::{Preorder, Siblings},
    node::{Ast, WeakAst},
};
