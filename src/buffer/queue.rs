use std::{collections::VecDeque, ops::Index};

/// A FIFO queue of symbols with access by offset from its head.
///
/// Appending and removing are amortized O(1), as is indexing. The queue has no idea what its symbols mean or which of
/// them have been consumed, that is left to the [`LookaheadBuffer`](super::LookaheadBuffer) using it.
#[derive(Debug, Clone)]
pub struct SymbolQueue<T> {
    storage: VecDeque<T>,
}

impl<T> SymbolQueue<T> {
    pub fn new() -> Self {
        Self {
            storage: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: VecDeque::with_capacity(capacity),
        }
    }

    /// The symbol `idx` positions behind the head of the queue.
    #[inline]
    pub fn element_at(&self, idx: usize) -> Option<&T> {
        self.storage.get(idx)
    }

    #[inline]
    pub fn append(&mut self, symbol: T) {
        self.storage.push_back(symbol);
    }

    #[inline]
    pub fn remove_first(&mut self) -> Option<T> {
        self.storage.pop_front()
    }

    /// Removes up to `n` symbols from the head of the queue and returns how many were removed.
    pub fn remove_first_n(&mut self, n: usize) -> usize {
        let n = n.min(self.storage.len());
        self.storage.drain(..n);
        n
    }

    /// The number of symbols in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Iterates over the queue from head to tail.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator + '_ {
        self.storage.iter()
    }
}

impl<T> Default for SymbolQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for SymbolQueue<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.storage[idx]
    }
}

impl<T> Extend<T> for SymbolQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.storage.extend(iter);
    }
}
