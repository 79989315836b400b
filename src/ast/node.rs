use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Weak},
};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::iter::{Preorder, Siblings};
use crate::payload::{CommonPayload, Payload, SyntaxKind, Token};

struct AstData<P> {
    payload: RwLock<P>,
    down:    RwLock<Option<Ast<P>>>,
    right:   RwLock<Option<Ast<P>>>,
}

impl<P> Drop for AstData<P> {
    fn drop(&mut self) {
        // Sibling lists can be arbitrarily long, so tear them down with a work stack instead of letting every node
        // drop its successor recursively. Nodes that are still referenced elsewhere only lose one strong count.
        let mut stack: Vec<Ast<P>> = Vec::new();
        stack.extend(self.down.get_mut().take());
        stack.extend(self.right.get_mut().take());
        while let Some(node) = stack.pop() {
            if let Ok(mut data) = Arc::try_unwrap(node.data) {
                stack.extend(data.down.get_mut().take());
                stack.extend(data.right.get_mut().take());
            }
        }
    }
}

/// A shared handle to a tree node.
///
/// Cloning an `Ast` is cheap and yields another handle to the _same_ node. Accordingly, `==` and hashing use node
/// identity. To compare trees structurally, use [`equals_tree`](Ast::equals_tree) and friends.
///
/// Nodes can be shared between threads if their payload can.
pub struct Ast<P = CommonPayload> {
    data: Arc<AstData<P>>,
}

/// A non-owning view of a tree node, as returned by [`find_all`](Ast::find_all).
///
/// A `WeakAst` does not keep its node alive. It can be turned back into an [`Ast`] as long as the node is still owned
/// by some tree or handle.
pub struct WeakAst<P = CommonPayload> {
    data: Weak<AstData<P>>,
}

impl<P> Ast<P> {
    /// Creates a new node that owns `payload` and is not linked to any other node.
    pub fn new(payload: P) -> Self {
        Self {
            data: Arc::new(AstData {
                payload: RwLock::new(payload),
                down:    RwLock::new(None),
                right:   RwLock::new(None),
            }),
        }
    }

    /// The head of this node's list of children.
    #[inline]
    pub fn first_child(&self) -> Option<Ast<P>> {
        self.data.down.read().clone()
    }

    /// The node following this one in its sibling list.
    #[inline]
    pub fn next_sibling(&self) -> Option<Ast<P>> {
        self.data.right.read().clone()
    }

    /// Replaces this node's list of children. The previous children are unlinked, but not otherwise modified.
    pub fn set_first_child(&self, child: impl Into<Option<Ast<P>>>) {
        let child = child.into();
        let old = std::mem::replace(&mut *self.data.down.write(), child);
        drop(old);
    }

    /// Replaces the rest of the sibling list following this node.
    pub fn set_next_sibling(&self, sibling: impl Into<Option<Ast<P>>>) {
        let sibling = sibling.into();
        let old = std::mem::replace(&mut *self.data.right.write(), sibling);
        drop(old);
    }

    /// Appends `child` to the end of this node's children.
    ///
    /// If `child` has siblings of its own, they are appended with it, in order. Passing `None` does nothing.
    pub fn add_child(&self, child: impl Into<Option<Ast<P>>>) {
        let child = match child.into() {
            Some(child) => child,
            None => return,
        };
        match self.first_child() {
            Some(first) => first.last_sibling().set_next_sibling(child),
            None => self.set_first_child(child),
        }
    }

    /// The last node of the sibling list starting at `self` (possibly `self`).
    pub fn last_sibling(&self) -> Ast<P> {
        let mut current = self.clone();
        while let Some(next) = current.next_sibling() {
            current = next;
        }
        current
    }

    /// Iterates over `self` and all of its following siblings.
    #[inline]
    pub fn siblings(&self) -> Siblings<P> {
        Siblings::new(Some(self.clone()))
    }

    /// Iterates over this node's children.
    #[inline]
    pub fn children(&self) -> Siblings<P> {
        Siblings::new(self.first_child())
    }

    #[inline]
    pub fn number_of_children(&self) -> usize {
        self.children().count()
    }

    /// Traverses the tree rooted at this node in preorder.
    /// The siblings of `self` are not part of the traversal.
    #[inline]
    pub fn preorder(&self) -> Preorder<P> {
        Preorder::new(self.clone())
    }

    /// Read access to this node's payload.
    ///
    /// The payload stays locked for reading while the guard is alive.
    #[inline]
    pub fn payload(&self) -> RwLockReadGuard<'_, P> {
        self.data.payload.read()
    }

    /// Write access to this node's payload.
    ///
    /// The payload stays locked while the guard is alive, so don't hold on to it while reading the same node through
    /// another handle.
    #[inline]
    pub fn payload_mut(&self) -> RwLockWriteGuard<'_, P> {
        self.data.payload.write()
    }

    /// Creates a non-owning view of this node.
    #[inline]
    pub fn downgrade(&self) -> WeakAst<P> {
        WeakAst {
            data: Arc::downgrade(&self.data),
        }
    }

    /// Whether `self` and `other` are handles to the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Ast<P>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<P: Payload> Ast<P> {
    /// Creates a node with a default payload initialized from `kind` and `text`.
    pub fn create(kind: impl Into<SyntaxKind>, text: &str) -> Self
    where
        P: Default,
    {
        let mut payload = P::default();
        payload.initialize(kind.into(), text);
        Self::new(payload)
    }

    /// Creates a node with a default payload initialized from `token`.
    pub fn from_token<T>(token: &T) -> Self
    where
        P: Default,
        T: Token + ?Sized,
    {
        let mut payload = P::default();
        payload.initialize_from_token(token);
        Self::new(payload)
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.payload().kind()
    }

    #[inline]
    pub fn set_kind(&self, kind: impl Into<SyntaxKind>) {
        self.payload_mut().set_kind(kind.into());
    }

    /// A copy of this node's text.
    /// Use [`payload`](Ast::payload) to look at the text without copying it.
    #[inline]
    pub fn text(&self) -> String {
        self.payload().text().to_owned()
    }

    #[inline]
    pub fn set_text(&self, text: &str) {
        self.payload_mut().set_text(text);
    }

    #[inline]
    pub fn initialize(&self, kind: impl Into<SyntaxKind>, text: &str) {
        self.payload_mut().initialize(kind.into(), text);
    }

    /// Copies type code and text of `other`'s payload into this node's payload. `other` may be `self`.
    pub fn initialize_from(&self, other: &Ast<P>) {
        let (kind, text) = {
            let other = other.payload();
            (other.kind(), other.text().to_owned())
        };
        self.payload_mut().initialize(kind, &text);
    }

    #[inline]
    pub fn initialize_from_token<T>(&self, token: &T)
    where
        T: Token + ?Sized,
    {
        self.payload_mut().initialize_from_token(token);
    }

    /// Creates a new, unlinked node with a copy of this node's payload.
    pub fn dup(&self) -> Self
    where
        P: Clone,
    {
        Self::new(self.payload().clone())
    }

    /// Deep-copies the tree rooted at this node. The siblings of `self` are not copied.
    pub fn dup_tree(&self) -> Self
    where
        P: Clone,
    {
        let copy = self.dup();
        copy.set_first_child(self.first_child().map(|child| child.dup_list()));
        copy
    }

    /// Deep-copies the sibling list starting at this node, including all descendants.
    pub fn dup_list(&self) -> Self
    where
        P: Clone,
    {
        let head = self.dup_tree();
        let mut tail = head.clone();
        let mut current = self.next_sibling();
        while let Some(node) = current {
            let copy = node.dup_tree();
            tail.set_next_sibling(copy.clone());
            tail = copy;
            current = node.next_sibling();
        }
        head
    }

    /// Renders the sibling list starting at this node in LISP notation, e.g. ` ( a b c ) d`.
    pub fn to_string_list(&self) -> String {
        let mut res = String::new();
        self.write_list(&mut res);
        res
    }

    /// Renders the tree rooted at this node in LISP notation, e.g. ` ( a b c )`.
    /// Unlike [`to_string_list`](Ast::to_string_list), the siblings of `self` are left out.
    pub fn to_string_tree(&self) -> String {
        let mut res = String::new();
        self.write_tree(&mut res);
        res
    }

    fn write_list(&self, res: &mut String) {
        for node in self.siblings() {
            node.write_tree(res);
        }
    }

    fn write_tree(&self, res: &mut String) {
        match self.first_child() {
            Some(child) => {
                res.push_str(" ( ");
                res.push_str(self.payload().text());
                child.write_list(res);
                res.push_str(" )");
            }
            None => {
                res.push(' ');
                res.push_str(self.payload().text());
            }
        }
    }
}

impl<P> Clone for Ast<P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

// Identity semantics for hash & eq
impl<P> PartialEq for Ast<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<P> Eq for Ast<P> {}

impl<P> Hash for Ast<P> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.data).hash(state);
    }
}

impl<P: fmt::Debug> fmt::Debug for Ast<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ast")
            .field("payload", &*self.payload())
            .field("children", &self.number_of_children())
            .field("has_next_sibling", &self.data.right.read().is_some())
            .finish()
    }
}

/// Displays the node's text.
impl<P: Payload> fmt::Display for Ast<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload().text())
    }
}

impl<P> WeakAst<P> {
    /// Returns a handle to the node, unless it has been dropped already.
    #[inline]
    pub fn upgrade(&self) -> Option<Ast<P>> {
        self.data.upgrade().map(|data| Ast { data })
    }

    /// Whether this is a view of the node behind `node`.
    #[inline]
    pub fn is(&self, node: &Ast<P>) -> bool {
        std::ptr::eq(self.data.as_ptr(), Arc::as_ptr(&node.data))
    }
}

impl<P> Clone for WeakAst<P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: Weak::clone(&self.data),
        }
    }
}

impl<P> fmt::Debug for WeakAst<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakAst({:p})", self.data.as_ptr())
    }
}
