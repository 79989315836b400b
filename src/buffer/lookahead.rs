use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::trace;

use super::{SymbolQueue, SymbolSource};

// ids are unique across buffers, a marker only closes in the buffer that created it
static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(0);

/// A checkpoint in a [`LookaheadBuffer`], created by [`mark`](LookaheadBuffer::mark).
///
/// Markers are closed by either [`rewind`](LookaheadBuffer::rewind) or [`commit`](LookaheadBuffer::commit), in the
/// reverse order of their creation. Using a marker that has already been closed or that belongs to another buffer, or
/// closing an outer marker while an inner one is still open, is a bug in the caller and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    id:     u64,
    offset: usize,
}

/// A lookahead buffer with deferred consumption and nested checkpoints over a forward-only [`SymbolSource`].
///
/// Positions are counted from the buffer's current logical position: [`la(1)`](LookaheadBuffer::la) is the next
/// symbol that would be consumed. Once the source is exhausted, every position past its end reads as `None`.
///
/// [`consume`](LookaheadBuffer::consume) does not touch the buffered symbols. It only records that the position has
/// moved, and the buffer catches up the next time it needs to look at its symbols. While at least one checkpoint is
/// open, consumed symbols are retained instead of dropped, so that [`rewind`](LookaheadBuffer::rewind) can go back to
/// them without reading the source again. When the last checkpoint is closed, retained symbols behind the position are
/// dropped at the next opportunity.
pub struct LookaheadBuffer<S: SymbolSource> {
    source:         S,
    queue:          SymbolQueue<Option<S::Symbol>>,
    // ids of the open markers, innermost last
    open_markers:   Vec<u64>,
    // symbols before the logical position that are still held in (or not yet read into) the queue
    marker_offset:  usize,
    num_to_consume: usize,
    // symbols that have been removed from the head of the queue for good
    discarded:      usize,
    exhausted:      bool,
}

impl<S: SymbolSource> LookaheadBuffer<S> {
    /// Creates a buffer that reads from `source`.
    pub fn new(source: S) -> Self {
        Self::from_queue(source, SymbolQueue::new())
    }

    /// Creates a buffer that reads from `source`, with room for `capacity` symbols before it needs to reallocate.
    /// Size this to the lookahead depth the consumer typically needs.
    pub fn with_capacity(source: S, capacity: usize) -> Self {
        Self::from_queue(source, SymbolQueue::with_capacity(capacity))
    }

    fn from_queue(source: S, queue: SymbolQueue<Option<S::Symbol>>) -> Self {
        Self {
            source,
            queue,
            open_markers: Vec::new(),
            marker_offset: 0,
            num_to_consume: 0,
            discarded: 0,
            exhausted: false,
        }
    }

    /// Moves the position forward by one symbol. The symbol is not removed until the buffer next needs to sync up.
    #[inline]
    pub fn consume(&mut self) {
        self.num_to_consume += 1;
    }

    /// Returns the symbol `i` positions ahead without moving the position, where `la(1)` is the next symbol.
    /// Returns `Ok(None)` for positions past the end of the input.
    ///
    /// ## Panics
    /// If `i` is 0.
    pub fn la(&mut self, i: usize) -> Result<Option<S::Symbol>, S::Error> {
        assert!(i > 0, "lookahead positions start at 1");
        self.fill(i)?;
        Ok(self.queue[self.marker_offset + i - 1].clone())
    }

    /// Opens a checkpoint at the current position.
    pub fn mark(&mut self) -> Marker {
        self.sync_consume();
        let id = NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed);
        self.open_markers.push(id);
        trace!(depth = self.open_markers.len(), offset = self.marker_offset, "opened marker");
        Marker {
            id,
            offset: self.marker_offset,
        }
    }

    /// Returns to the position `marker` was created at and closes it.
    ///
    /// ## Panics
    /// If `marker` is not the innermost open marker of this buffer.
    pub fn rewind(&mut self, marker: Marker) {
        self.sync_consume();
        self.close(marker);
        trace!(
            depth = self.open_markers.len(),
            from = self.marker_offset,
            to = marker.offset,
            "rewound to marker"
        );
        self.marker_offset = marker.offset;
    }

    /// Closes `marker` without changing the current position.
    ///
    /// ## Panics
    /// If `marker` is not the innermost open marker of this buffer.
    pub fn commit(&mut self, marker: Marker) {
        self.sync_consume();
        self.close(marker);
        trace!(depth = self.open_markers.len(), "committed marker");
    }

    /// Drops all buffered symbols and open markers and starts counting positions from 0 again.
    /// The source is not rewound: symbols that were buffered but not consumed are lost.
    pub fn reset(&mut self) {
        trace!(dropped = self.queue.len(), "reset lookahead buffer");
        self.queue.clear();
        self.open_markers.clear();
        self.marker_offset = 0;
        self.num_to_consume = 0;
        self.discarded = 0;
    }

    /// Whether any checkpoint is open.
    #[inline]
    pub fn is_marked(&self) -> bool {
        !self.open_markers.is_empty()
    }

    /// The number of open checkpoints.
    #[inline]
    pub fn marker_count(&self) -> usize {
        self.open_markers.len()
    }

    /// The number of symbols consumed so far, i.e. the current position.
    #[inline]
    pub fn index(&self) -> usize {
        self.discarded + self.marker_offset + self.num_to_consume
    }

    /// The number of symbols physically held by the buffer, both retained and looked ahead at.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn close(&mut self, marker: Marker) {
        match self.open_markers.last() {
            Some(&innermost) if innermost == marker.id => {
                self.open_markers.pop();
            }
            _ => panic!(
                "{:?} is not the innermost open marker (open markers: {})",
                marker,
                self.open_markers.len()
            ),
        }
    }

    /// Ensures that at least `amount` symbols are buffered ahead of the position.
    fn fill(&mut self, amount: usize) -> Result<(), S::Error> {
        self.sync_consume();
        while self.queue.len() < amount + self.marker_offset {
            let symbol = if self.exhausted {
                None
            } else {
                let symbol = self.source.next_symbol()?;
                if symbol.is_none() {
                    trace!(read = self.discarded + self.queue.len(), "symbol source exhausted");
                    self.exhausted = true;
                }
                symbol
            };
            self.queue.append(symbol);
        }
        self.drop_consumed();
        Ok(())
    }

    /// Applies deferred consumption.
    fn sync_consume(&mut self) {
        // while a marker is open, consumed symbols stay in the queue so we can rewind to them
        self.marker_offset += self.num_to_consume;
        self.num_to_consume = 0;
        self.drop_consumed();
    }

    /// Drops consumed symbols from the queue, unless a marker still needs them.
    fn drop_consumed(&mut self) {
        if self.open_markers.is_empty() && self.marker_offset > 0 {
            // consumed symbols that were never read into the queue stay counted in `marker_offset` until `fill`
            // has read them
            let removed = self.queue.remove_first_n(self.marker_offset);
            self.marker_offset -= removed;
            self.discarded += removed;
            if removed > 0 {
                trace!(removed, "dropped consumed symbols");
            }
        }
    }
}

impl<S> fmt::Debug for LookaheadBuffer<S>
where
    S: SymbolSource,
    S::Symbol: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookaheadBuffer")
            .field("queue", &self.queue)
            .field("open_markers", &self.open_markers.len())
            .field("marker_offset", &self.marker_offset)
            .field("num_to_consume", &self.num_to_consume)
            .field("index", &self.index())
            .finish()
    }
}
