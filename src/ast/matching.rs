//! Structural comparison and search.
//!
//! All comparisons are built on [`Ast::equals`], which looks at node type codes only. On top of that there are two
//! flavours of structural matching:
//!  - _exact_: both trees have the same shape and the same type code at every position.
//!  - _partial_: the second tree (the "pattern") is a subset of the first. Every node of the pattern must have a
//!    matching node in the same position, but the first tree may have additional trailing siblings at any level.
//!
//! Each flavour comes in a "tree" variant, which compares two roots and their descendants but ignores the roots' own
//! siblings, and a "list" variant, which treats both arguments as the heads of sibling lists.
//!
//! An empty argument (`None`) never matches exactly, but is a partial match of everything.
//!
//! Sibling lists are walked iteratively. Descending into children recurses, so the recursion depth is bounded by the
//! depth of the trees being compared.

use super::{Ast, WeakAst};
use crate::payload::Payload;

impl<P: Payload> Ast<P> {
    /// Whether `other` has the same type code as this node. Text is not compared.
    #[inline]
    pub fn equals(&self, other: Option<&Ast<P>>) -> bool {
        match other {
            Some(other) => self.ptr_eq(other) || self.kind() == other.kind(),
            None => false,
        }
    }

    /// Whether the sibling list starting at `other` is an exact match of the one starting at `self`.
    ///
    /// Both lists must have the same length, and each pair of nodes must be [`equal`](Ast::equals) and have
    /// exactly matching children. As a special case, an empty `other` never matches.
    pub fn equals_list(&self, other: Option<&Ast<P>>) -> bool {
        let other = match other {
            Some(other) => other,
            None => return false,
        };

        let mut left = Some(self.clone());
        let mut right = Some(other.clone());
        loop {
            match (left.take(), right.take()) {
                (Some(l), Some(r)) => {
                    if !l.equals(Some(&r)) {
                        return false;
                    }
                    if let Some(child) = l.first_child() {
                        if !child.equals_list(r.first_child().as_ref()) {
                            return false;
                        }
                    }
                    left = l.next_sibling();
                    right = r.next_sibling();
                }
                (None, None) => return true,
                // one list is longer than the other
                _ => return false,
            }
        }
    }

    /// Whether the sibling list starting at `sub` is a partial match of the one starting at `self`.
    ///
    /// `self`'s list may be longer than `sub`'s, but not the other way around. Children are compared with the same
    /// partial rules. An empty `sub` always matches.
    pub fn equals_list_partial(&self, sub: Option<&Ast<P>>) -> bool {
        let sub = match sub {
            Some(sub) => sub,
            None => return true,
        };

        let mut left = Some(self.clone());
        let mut right = Some(sub.clone());
        loop {
            match (left.take(), right.take()) {
                (Some(l), Some(r)) => {
                    if !l.equals(Some(&r)) {
                        return false;
                    }
                    if let Some(child) = l.first_child() {
                        if !child.equals_list_partial(r.first_child().as_ref()) {
                            return false;
                        }
                    }
                    left = l.next_sibling();
                    right = r.next_sibling();
                }
                // nothing left in this list, but `sub` has more
                (None, Some(_)) => return false,
                _ => return true,
            }
        }
    }

    /// Whether the tree rooted at `other` is an exact match of the tree rooted at `self`.
    /// The siblings of both roots are ignored.
    ///
    /// Note that if `self` has no children, the children of `other` are not looked at: a leaf matches any node with
    /// the same type code.
    pub fn equals_tree(&self, other: Option<&Ast<P>>) -> bool {
        let other = match other {
            Some(other) if self.equals(Some(other)) => other,
            _ => return false,
        };
        match self.first_child() {
            Some(child) => child.equals_list(other.first_child().as_ref()),
            None => true,
        }
    }

    /// Whether the tree rooted at `sub` is a partial match of the tree rooted at `self`.
    /// The siblings of both roots are ignored. An empty `sub` always matches.
    pub fn equals_tree_partial(&self, sub: Option<&Ast<P>>) -> bool {
        let sub = match sub {
            Some(sub) => sub,
            None => return true,
        };
        if !self.equals(Some(sub)) {
            return false;
        }
        match self.first_child() {
            Some(child) => child.equals_list_partial(sub.first_child().as_ref()),
            None => true,
        }
    }

    /// Finds all subtrees that are an exact match of `target`, see [`equals_tree`](Ast::equals_tree).
    ///
    /// The search starts at `self`, continues along `self`'s siblings and descends into the children of every node
    /// it visits, whether or not that node matched. Matches are reported in preorder, where a node's children come
    /// before its next sibling. An empty `target` finds nothing.
    pub fn find_all(&self, target: Option<&Ast<P>>) -> Vec<WeakAst<P>> {
        match target {
            Some(target) => self.find_matches(|node| node.equals_tree(Some(target))),
            None => Vec::new(),
        }
    }

    /// Finds all subtrees of which `target` is a partial match, see [`equals_tree_partial`](Ast::equals_tree_partial).
    ///
    /// Traversal and result order are the same as for [`find_all`](Ast::find_all). An empty `target` finds nothing.
    pub fn find_all_partial(&self, target: Option<&Ast<P>>) -> Vec<WeakAst<P>> {
        match target {
            Some(target) => self.find_matches(|node| node.equals_tree_partial(Some(target))),
            None => Vec::new(),
        }
    }

    fn find_matches(&self, is_match: impl Fn(&Ast<P>) -> bool) -> Vec<WeakAst<P>> {
        let mut matches = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if is_match(&node) {
                matches.push(node.downgrade());
            }
            // the first child must be visited before the next sibling, so push it last
            stack.extend(node.next_sibling());
            stack.extend(node.first_child());
        }
        matches
    }
}
