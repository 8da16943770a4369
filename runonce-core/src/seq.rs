//! Memoization for traversals on a single thread.

use crate::box_iter::Results;
use crate::buffer::{Buffer, Local};
use crate::cursor::Frontier;
use core::cell::{Cell, RefCell};

/// Buffer of elements pulled from a source that is only used on one thread.
///
/// Any number of traversals may be alive at the same time,
/// for example in nested loops.
/// A source that advances the cache it is wrapped by panics.
pub struct Cache<'a, T, E> {
    /// `None` once the source has returned `None`
    source: RefCell<Option<Results<'a, T, E>>>,
    buf: Buffer<T, Local>,
    produced: Cell<usize>,
    exhausted: Cell<bool>,
}

impl<'a, T, E> Cache<'a, T, E> {
    pub(crate) fn new(source: Results<'a, T, E>) -> Self {
        Self {
            source: RefCell::new(Some(source)),
            buf: Buffer::new(),
            produced: Cell::new(0),
            exhausted: Cell::new(false),
        }
    }

    /// Pull the next element from the source into the buffer.
    ///
    /// Returns `None` when the source is exhausted.
    fn pull(&self) -> Option<Result<(), E>> {
        let mut source = self.source.borrow_mut();
        match source.as_mut().and_then(|src| src.next()) {
            Some(Ok(x)) => {
                let n = self.produced.get();
                self.buf.put(n, x);
                self.produced.set(n + 1);
                log::trace!("pulled element {n}");
                Some(Ok(()))
            }
            Some(Err(e)) => Some(Err(e)),
            None => {
                *source = None;
                self.exhausted.set(true);
                log::debug!("source exhausted after {} elements", self.produced.get());
                None
            }
        }
    }
}

impl<'a, T, E> Frontier for Cache<'a, T, E> {
    type Item = T;
    type Error = E;

    fn produce_at(&self, i: usize) -> Option<Result<&T, E>> {
        while i >= self.produced.get() {
            if self.exhausted.get() {
                return None;
            }
            if let Err(e) = self.pull()? {
                return Some(Err(e));
            }
        }
        self.buf.get(i).map(Ok)
    }

    fn produced(&self) -> usize {
        self.produced.get()
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted.get()
    }
}
