//! Memoization for traversals on several threads.

use crate::box_iter::SendResults;
use crate::buffer::{Buffer, Shared};
use crate::cursor::Frontier;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::Mutex;

/// Buffer of elements pulled from a source that may be shared by threads.
///
/// Reading an element that was already produced never locks.
/// Producing a new element locks the source,
/// and only the thread holding the lock pulls from the source.
pub struct Cache<'a, T, E> {
    /// `None` once the source has returned `None`
    source: Mutex<Option<SendResults<'a, T, E>>>,
    buf: Buffer<T, Shared>,
    /// Number of elements in `buf`.
    ///
    /// This is only increased after the corresponding element was written,
    /// so a thread that sees `produced > i` also sees the `i`-th element.
    produced: AtomicUsize,
    exhausted: AtomicBool,
}

impl<'a, T, E> Cache<'a, T, E> {
    pub(crate) fn new(source: SendResults<'a, T, E>) -> Self {
        Self {
            source: Mutex::new(Some(source)),
            buf: Buffer::new(),
            produced: AtomicUsize::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Return the `i`-th element if it is already published.
    fn published(&self, i: usize) -> Option<&T> {
        if i < self.produced.load(Ordering::Acquire) {
            self.buf.get(i)
        } else {
            None
        }
    }
}

impl<'a, T, E> Frontier for Cache<'a, T, E> {
    type Item = T;
    type Error = E;

    fn produce_at(&self, i: usize) -> Option<Result<&T, E>> {
        loop {
            if let Some(x) = self.published(i) {
                return Some(Ok(x));
            }
            if self.exhausted.load(Ordering::Acquire) {
                // the source may have been exhausted right after we checked `produced`
                return self.published(i).map(Ok);
            }

            let mut source = self.source.lock();
            // another thread may have advanced the source while we were waiting
            if let Some(x) = self.published(i) {
                return Some(Ok(x));
            }
            if self.exhausted.load(Ordering::Acquire) {
                return None;
            }
            // while we hold the lock, nobody else changes `produced`
            let n = self.produced.load(Ordering::Acquire);
            match source.as_mut().and_then(|src| src.next()) {
                Some(Ok(x)) => {
                    self.buf.put(n, x);
                    self.produced.store(n + 1, Ordering::Release);
                    log::trace!("pulled element {n}");
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    *source = None;
                    self.exhausted.store(true, Ordering::Release);
                    log::debug!("source exhausted after {n} elements");
                    return None;
                }
            }
        }
    }

    fn produced(&self) -> usize {
        self.produced.load(Ordering::Acquire)
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Acquire)
    }
}

#[test]
fn send_sync() {
    fn assert_sync<S: Send + Sync>() {}
    assert_sync::<Cache<'static, alloc::string::String, core::convert::Infallible>>();
}
