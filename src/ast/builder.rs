use std::fmt;

use super::Ast;
use crate::payload::CommonPayload;

/// A checkpoint for maybe wrapping a node. See [`AstBuilder::checkpoint`] for details.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint(usize);

/// A builder for [`Ast`] trees.
///
/// To add tree nodes, start them with [`start_node`](AstBuilder::start_node), add leaves with
/// [`token`](AstBuilder::token) (or attach existing subtrees with [`push`](AstBuilder::push)) and then
/// [`finish_node`](AstBuilder::finish_node). When the whole tree is constructed, call [`finish`](AstBuilder::finish)
/// to obtain the head of the top-level sibling list.
///
/// # Examples
/// ```
/// # use synrt::{Ast, AstBuilder, CommonPayload};
/// let mut builder = AstBuilder::new();
/// builder.start_node(CommonPayload::new(0u32, "+"));
/// builder.token(CommonPayload::new(1u32, "1"));
/// builder.token(CommonPayload::new(1u32, "2"));
/// builder.finish_node();
/// let tree: Ast = builder.finish().unwrap();
/// assert_eq!(tree.to_string_list(), " ( + 1 2 )");
/// ```
pub struct AstBuilder<P = CommonPayload> {
    parents:  Vec<(P, usize)>,
    children: Vec<Ast<P>>,
}

impl<P> AstBuilder<P> {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self {
            parents:  Vec::with_capacity(8),
            children: Vec::with_capacity(8),
        }
    }

    /// Adds a new leaf with the given payload to the current branch.
    #[inline]
    pub fn token(&mut self, payload: P) {
        self.children.push(Ast::new(payload));
    }

    /// Adds an existing subtree to the current branch.
    ///
    /// If `node` has siblings, they are kept and the next node added to this branch follows the last of them.
    #[inline]
    pub fn push(&mut self, node: Ast<P>) {
        self.children.push(node);
    }

    /// Start new node with the given payload and make it current.
    #[inline]
    pub fn start_node(&mut self, payload: P) {
        let len = self.children.len();
        self.parents.push((payload, len));
    }

    /// Finish the current branch and restore the previous branch as current.
    ///
    /// ## Panics
    /// If there is no started node to finish.
    pub fn finish_node(&mut self) {
        let (payload, first_child) = match self.parents.pop() {
            Some(parent) => parent,
            None => panic!("called `finish_node` without a matching `start_node`"),
        };
        let node = Ast::new(payload);
        node.set_first_child(link(self.children.drain(first_child..)));
        self.children.push(node);
    }

    /// Prepare for maybe wrapping the next node with a surrounding node.
    ///
    /// The way wrapping works is that you first get a checkpoint, then you add nodes and tokens as
    /// normal, and then you *maybe* call [`start_node_at`](AstBuilder::start_node_at).
    ///
    /// # Examples
    /// ```
    /// # use synrt::{Ast, AstBuilder, CommonPayload};
    /// let mut builder = AstBuilder::new();
    /// let checkpoint = builder.checkpoint();
    /// builder.token(CommonPayload::new(1u32, "1"));
    /// // we only learn that `1` is an operand once we see the operator
    /// builder.start_node_at(checkpoint, CommonPayload::new(0u32, "+"));
    /// builder.token(CommonPayload::new(1u32, "2"));
    /// builder.finish_node();
    /// let tree: Ast = builder.finish().unwrap();
    /// assert_eq!(tree.to_string_list(), " ( + 1 2 )");
    /// ```
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Wrap the previous branch marked by [`checkpoint`](AstBuilder::checkpoint) in a new
    /// branch and make it current.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, payload: P) {
        let Checkpoint(checkpoint) = checkpoint;
        assert!(
            checkpoint <= self.children.len(),
            "checkpoint no longer valid, was finish_node called early?"
        );

        if let Some(&(_, first_child)) = self.parents.last() {
            assert!(
                checkpoint >= first_child,
                "checkpoint no longer valid, was an unmatched start_node_at called?"
            );
        }

        self.parents.push((payload, checkpoint));
    }

    /// Complete building the tree.
    ///
    /// Returns the first top-level node, with all other top-level nodes linked as its siblings, or `None` if nothing
    /// was added. Make sure that calls to [`start_node`](AstBuilder::start_node) /
    /// [`start_node_at`](AstBuilder::start_node_at) and [`finish_node`](AstBuilder::finish_node) are balanced.
    pub fn finish(mut self) -> Option<Ast<P>> {
        assert!(self.parents.is_empty(), "called `finish` with unfinished nodes");
        link(self.children.drain(..))
    }
}

impl<P> Default for AstBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for AstBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstBuilder")
            .field("open_nodes", &self.parents.len())
            .field("pending_children", &self.children.len())
            .finish()
    }
}

/// Links `nodes` into a single sibling list and returns its head.
fn link<P>(nodes: impl DoubleEndedIterator<Item = Ast<P>>) -> Option<Ast<P>> {
    let mut head: Option<Ast<P>> = None;
    for node in nodes.rev() {
        if let Some(next) = head.take() {
            node.last_sibling().set_next_sibling(next);
        }
        head = Some(node);
    }
    head
}
