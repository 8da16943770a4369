//! Append-only storage whose elements never move.
//!
//! A buffer consists of a fixed table of buckets,
//! where bucket `b` holds `FIRST << b` slots and is allocated on first use.
//! Because buckets are never reallocated,
//! a reference to a written slot stays valid as long as the buffer lives,
//! even while other slots are being written.
//! Every slot is a once-cell, so a written element can never be overwritten.

use alloc::boxed::Box;
#[cfg(feature = "std")]
use once_cell::sync;
use once_cell::unsync;

/// Number of slots in the first bucket.
const FIRST: usize = 32;
const SHIFT: u32 = FIRST.trailing_zeros();
/// Number of buckets needed to address every `usize` index.
const BUCKETS: usize = (usize::BITS - SHIFT) as usize;

/// A cell that can be written at most once.
pub(crate) trait OnceSlot<T>: Default {
    fn get(&self) -> Option<&T>;
    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T;
}

impl<T> OnceSlot<T> for unsync::OnceCell<T> {
    fn get(&self) -> Option<&T> {
        unsync::OnceCell::get(self)
    }

    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        unsync::OnceCell::get_or_init(self, f)
    }
}

#[cfg(feature = "std")]
impl<T> OnceSlot<T> for sync::OnceCell<T> {
    fn get(&self) -> Option<&T> {
        sync::OnceCell::get(self)
    }

    fn get_or_init<F: FnOnce() -> T>(&self, f: F) -> &T {
        sync::OnceCell::get_or_init(self, f)
    }
}

/// Family of once-cells that a buffer is built from.
pub(crate) trait Cells {
    type Cell<T>: OnceSlot<T>;
}

/// Cells for buffers that are confined to a single thread.
pub(crate) enum Local {}

/// Cells for buffers that are shared between threads.
#[cfg(feature = "std")]
pub(crate) enum Shared {}

impl Cells for Local {
    type Cell<T> = unsync::OnceCell<T>;
}

#[cfg(feature = "std")]
impl Cells for Shared {
    type Cell<T> = sync::OnceCell<T>;
}

type Bucket<T, C> = Box<[<C as Cells>::Cell<T>]>;

pub(crate) struct Buffer<T, C: Cells> {
    buckets: Box<[C::Cell<Bucket<T, C>>]>,
}

/// Return the bucket and the offset inside the bucket of the `i`-th element.
fn locate(i: usize) -> (usize, usize) {
    let j = i + FIRST;
    let bucket = (usize::BITS - 1 - j.leading_zeros() - SHIFT) as usize;
    (bucket, j - (FIRST << bucket))
}

impl<T, C: Cells> Buffer<T, C> {
    pub fn new() -> Self {
        let buckets = (0..BUCKETS).map(|_| Default::default()).collect();
        Self { buckets }
    }

    /// Return the `i`-th element if it has been written.
    pub fn get(&self, i: usize) -> Option<&T> {
        let (bucket, offset) = locate(i);
        self.buckets[bucket].get()?.get(offset)?.get()
    }

    /// Write the `i`-th element and return a reference to it.
    ///
    /// If the slot was already written, `x` is dropped and the old element is returned.
    pub fn put(&self, i: usize, x: T) -> &T {
        let (bucket, offset) = locate(i);
        let slots = self.buckets[bucket]
            .get_or_init(|| (0..FIRST << bucket).map(|_| Default::default()).collect());
        slots[offset].get_or_init(|| x)
    }
}

#[test]
fn locate_bucket_bounds() {
    assert_eq!(locate(0), (0, 0));
    assert_eq!(locate(FIRST - 1), (0, FIRST - 1));
    assert_eq!(locate(FIRST), (1, 0));
    assert_eq!(locate(3 * FIRST - 1), (1, 2 * FIRST - 1));
    assert_eq!(locate(3 * FIRST), (2, 0));
    assert_eq!(locate(usize::MAX - FIRST).0, BUCKETS - 1);
}

#[test]
fn put_is_write_once() {
    let buf = Buffer::<&str, Local>::new();
    assert_eq!(*buf.put(40, "a"), "a");
    assert_eq!(*buf.put(40, "b"), "a");
    assert_eq!(buf.get(40), Some(&"a"));
    assert_eq!(buf.get(39), None);
}

#[test]
fn put_then_get() {
    let buf = Buffer::<usize, Local>::new();
    assert_eq!(buf.get(0), None);
    for i in 0..1000 {
        assert_eq!(*buf.put(i, i * 2), i * 2);
    }
    assert_eq!(buf.get(999), Some(&1998));
    assert_eq!(buf.get(1000), None);
    assert!((0..1000).all(|i| buf.get(i) == Some(&(i * 2))));
}

#[cfg(feature = "std")]
#[test]
fn references_stay_valid() {
    let buf = Buffer::<alloc::string::String, Shared>::new();
    let first = buf.put(0, "first".into());
    // fill several buckets after taking the reference
    for i in 1..500 {
        buf.put(i, alloc::format!("{i}"));
    }
    assert_eq!(first, "first");
}
