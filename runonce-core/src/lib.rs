//! Replayable iterators that evaluate every element only once.
//!
//! An iterator can be traversed only once,
//! and recreating it runs the work that produces its elements again.
//! This crate wraps an iterator into a sequence that
//! can be traversed any number of times,
//! while pulling every element from the iterator at most once.
//!
//! There are two kinds of sequences:
//!
//! * [`Memo`] may be traversed from a single thread,
//!   possibly by several traversals at the same time (such as nested loops).
//! * `SyncMemo` may be traversed from several threads at the same time.
//!   Every element is still pulled only once, and
//!   all threads see the same elements in the same order.
//!   It is available with the `std` feature (enabled by default).
//!
//! ~~~
//! use core::cell::Cell;
//! use runonce_core::{Collection, RunOnce};
//!
//! let runs = Cell::new(0);
//! let squares = (0..10).map(|x| {
//!     runs.set(runs.get() + 1);
//!     x * x
//! });
//! let squares = squares.run_once();
//!
//! // take only the first three elements
//! assert_eq!(squares.iter().take(3).sum::<i32>(), 5);
//! assert_eq!(runs.get(), 3);
//!
//! // traverse everything twice
//! assert_eq!(squares.iter().sum::<i32>(), 285);
//! assert_eq!(squares.iter().max(), Some(&81));
//! assert_eq!(runs.get(), 10);
//!
//! assert_eq!(squares.len(), 10);
//! ~~~
//!
//! Containers that are already evaluated can be converted to sequences
//! without buffering their elements again:
//!
//! ~~~
//! use runonce_core::Memo;
//!
//! let v = vec![1, 2, 3];
//! let memo: Memo<_> = (&v).into();
//! assert!(memo.is_materialized());
//! assert!(memo.iter().eq(&v));
//! ~~~
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod box_iter;
mod buffer;
mod container;
mod cursor;
pub mod error;
mod replay;
pub mod seq;
#[cfg(feature = "std")]
pub mod sync;
mod view;

pub use box_iter::{BoxIter, Results, SendBoxIter, SendResults};
pub use cursor::{Frontier, Iter, TryIter};
pub use error::Error;
pub use replay::{Memo, Replay};
#[cfg(feature = "std")]
pub use replay::SyncMemo;
pub use view::Collection;

/// Wrap an iterator into a sequence for a single thread.
pub fn run_once<'a, I>(iter: I) -> Memo<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
{
    Memo::new(iter)
}

/// Wrap an iterator into a sequence that threads may share.
#[cfg(feature = "std")]
pub fn run_once_concurrent<'a, I>(iter: I) -> SyncMemo<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'a,
    I::Item: 'a,
{
    SyncMemo::new(iter)
}

/// Wrap an iterator over results into a sequence for a single thread.
///
/// See [`Replay::try_iter`] for how errors are handled.
pub fn try_run_once<'a, I, T, E>(iter: I) -> Memo<'a, T, E>
where
    I: IntoIterator<Item = Result<T, E>>,
    I::IntoIter: 'a,
{
    Memo::try_new(iter)
}

/// Wrap an iterator over results into a sequence that threads may share.
#[cfg(feature = "std")]
pub fn try_run_once_concurrent<'a, I, T, E>(iter: I) -> SyncMemo<'a, T, E>
where
    I: IntoIterator<Item = Result<T, E>>,
    I::IntoIter: Send + 'a,
{
    SyncMemo::try_new(iter)
}

/// Convert iterators to replayable sequences.
///
/// This is only implemented for iterators;
/// containers should rather be converted with `From`,
/// which does not copy their elements.
pub trait RunOnce: Iterator + Sized {
    /// Wrap the iterator into a sequence for a single thread.
    fn run_once<'a>(self) -> Memo<'a, Self::Item>
    where
        Self: 'a,
        Self::Item: 'a,
    {
        run_once(self)
    }

    /// Wrap the iterator into a sequence that threads may share.
    #[cfg(feature = "std")]
    fn run_once_concurrent<'a>(self) -> SyncMemo<'a, Self::Item>
    where
        Self: Send + 'a,
        Self::Item: 'a,
    {
        run_once_concurrent(self)
    }
}

impl<I: Iterator> RunOnce for I {}
