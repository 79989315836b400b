//! Tree iterators.

use std::iter::FusedIterator;

use super::Ast;
use crate::WalkEvent;

/// An iterator along a sibling list, starting at a given node.
#[derive(Clone, Debug)]
pub struct Siblings<P> {
    next: Option<Ast<P>>,
}

impl<P> Siblings<P> {
    #[inline]
    pub(super) fn new(start: Option<Ast<P>>) -> Self {
        Self { next: start }
    }
}

impl<P> Iterator for Siblings<P> {
    type Item = Ast<P>;

    #[inline]
    fn next(&mut self) -> Option<Ast<P>> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

impl<P> FusedIterator for Siblings<P> {}

/// A preorder traversal of the tree rooted at a node, reporting when each node is entered and left.
///
/// The root's own siblings are not visited. The traversal keeps its own stack of ancestors, so deep trees and long
/// sibling lists are walked without recursion.
#[derive(Debug)]
pub struct Preorder<P> {
    // the nodes that have been entered, but not yet left
    stack:   Vec<Ast<P>>,
    next:    Option<WalkEvent<Ast<P>>>,
    entered: bool,
}

impl<P> Preorder<P> {
    pub(super) fn new(root: Ast<P>) -> Self {
        Self {
            stack:   Vec::new(),
            next:    Some(WalkEvent::Enter(root)),
            entered: false,
        }
    }

    /// Skips the descendants of the node that was just entered, continuing with its [`WalkEvent::Leave`].
    /// Does nothing if the last event was not an [`WalkEvent::Enter`].
    pub fn skip_subtree(&mut self) {
        if !self.entered {
            return;
        }
        if let Some(node) = self.stack.last() {
            self.next = Some(WalkEvent::Leave(node.clone()));
        }
    }
}

impl<P> Iterator for Preorder<P> {
    type Item = WalkEvent<Ast<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.next.take()?;
        self.next = match &event {
            WalkEvent::Enter(node) => {
                self.stack.push(node.clone());
                Some(match node.first_child() {
                    Some(child) => WalkEvent::Enter(child),
                    None => WalkEvent::Leave(node.clone()),
                })
            }
            WalkEvent::Leave(node) => {
                self.stack.pop();
                // an empty stack means we just left the root
                self.stack.last().map(|parent| match node.next_sibling() {
                    Some(sibling) => WalkEvent::Enter(sibling),
                    None => WalkEvent::Leave(parent.clone()),
                })
            }
        };
        self.entered = matches!(event, WalkEvent::Enter(_));
        Some(event)
    }
}

impl<P> FusedIterator for Preorder<P> {}
