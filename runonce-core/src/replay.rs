#[cfg(feature = "std")]
use crate::box_iter::box_ok_send;
use crate::box_iter::{box_ok, ok};
use crate::container::Container;
use crate::cursor::{Frontier, Iter, TryIter};
use crate::seq;
#[cfg(feature = "std")]
use crate::sync;
use alloc::{boxed::Box, vec::Vec};
use core::convert::Infallible;
use core::fmt;

/// Replayable sequence that evaluates each element of its source at most once.
///
/// A sequence is either backed by a container that is already evaluated,
/// or by a cache `L` that pulls elements from a source on demand.
/// Use [`Memo`] or `SyncMemo` to name concrete sequences.
pub struct Replay<'a, T, L>(pub(crate) Repr<'a, T, L>);

pub(crate) enum Repr<'a, T, L> {
    Container(Container<'a, T>),
    Lazy(L),
}

/// Sequence that may be traversed from a single thread.
pub type Memo<'a, T, E = Infallible> = Replay<'a, T, seq::Cache<'a, T, E>>;

/// Sequence that may be traversed from several threads at the same time.
#[cfg(feature = "std")]
pub type SyncMemo<'a, T, E = Infallible> = Replay<'a, T, sync::Cache<'a, T, E>>;

impl<'a, T> Memo<'a, T> {
    /// Wrap an iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
        T: 'a,
    {
        Self::lazy(seq::Cache::new(box_ok(iter.into_iter())))
    }
}

impl<'a, T, E> Memo<'a, T, E> {
    /// Wrap an iterator whose elements may fail to be produced.
    ///
    /// Errors are passed on to the traversal that encountered them,
    /// but they are not recorded.
    pub fn try_new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<T, E>>,
        I::IntoIter: 'a,
    {
        Self::lazy(seq::Cache::new(Box::new(iter.into_iter())))
    }
}

#[cfg(feature = "std")]
impl<'a, T> SyncMemo<'a, T> {
    /// Wrap an iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'a,
        T: 'a,
    {
        Self::lazy(sync::Cache::new(box_ok_send(iter.into_iter())))
    }
}

#[cfg(feature = "std")]
impl<'a, T, E> SyncMemo<'a, T, E> {
    /// Wrap an iterator whose elements may fail to be produced.
    ///
    /// Errors are passed on to the traversal that encountered them,
    /// but they are not recorded.
    pub fn try_new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<T, E>>,
        I::IntoIter: Send + 'a,
    {
        Self::lazy(sync::Cache::new(Box::new(iter.into_iter())))
    }
}

impl<'a, T, L> Replay<'a, T, L> {
    fn lazy(cache: L) -> Self {
        Self(Repr::Lazy(cache))
    }

    /// True if the sequence is backed by an already evaluated container.
    pub fn is_materialized(&self) -> bool {
        matches!(self.0, Repr::Container(_))
    }
}

impl<'a, T, L: Frontier<Item = T>> Frontier for Replay<'a, T, L> {
    type Item = T;
    type Error = L::Error;

    fn produce_at(&self, i: usize) -> Option<Result<&T, L::Error>> {
        match &self.0 {
            Repr::Container(c) => c.get(i).map(Ok),
            Repr::Lazy(l) => l.produce_at(i),
        }
    }

    fn produced(&self) -> usize {
        match &self.0 {
            Repr::Container(c) => c.len(),
            Repr::Lazy(l) => l.produced(),
        }
    }

    fn is_exhausted(&self) -> bool {
        match &self.0 {
            Repr::Container(_) => true,
            Repr::Lazy(l) => l.is_exhausted(),
        }
    }
}

impl<'a, T, L: Frontier<Item = T>> Replay<'a, T, L> {
    /// Start a new traversal that yields errors of the source.
    pub fn try_iter(&self) -> TryIter<'_, Self> {
        TryIter::new(self)
    }

    /// Return the `i`-th element, producing all elements up to it if necessary.
    pub fn try_get(&self, i: usize) -> Option<Result<&T, L::Error>> {
        self.produce_at(i)
    }

    /// Produce all remaining elements.
    ///
    /// This stops at the first error.
    pub fn try_drain(&self) -> Result<(), L::Error> {
        while let Some(x) = self.produce_at(self.produced()) {
            x?;
        }
        Ok(())
    }

    /// Return the number of elements, producing all remaining elements.
    pub fn try_len(&self) -> Result<usize, L::Error> {
        self.try_drain()?;
        Ok(self.produced())
    }

    /// Return all elements, producing all remaining elements.
    pub fn try_to_vec(&self) -> Result<Vec<T>, L::Error>
    where
        T: Clone,
    {
        self.try_iter().map(|x| x.cloned()).collect()
    }
}

impl<'a, T, L: Frontier<Item = T, Error = Infallible>> Replay<'a, T, L> {
    /// Start a new traversal.
    ///
    /// Every traversal starts at the beginning of the sequence,
    /// independently of other traversals.
    pub fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Return the `i`-th element, producing all elements up to it if necessary.
    pub fn get(&self, i: usize) -> Option<&T> {
        self.produce_at(i).map(ok)
    }
}

impl<'r, 'a, T, L: Frontier<Item = T, Error = Infallible>> IntoIterator for &'r Replay<'a, T, L> {
    type Item = &'r T;
    type IntoIter = Iter<'r, Replay<'a, T, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, L: Frontier<Item = T>> fmt::Debug for Replay<'a, T, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Replay")
            .field("materialized", &self.is_materialized())
            .field("produced", &self.produced())
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}
