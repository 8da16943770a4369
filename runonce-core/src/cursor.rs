//! Independent traversals over memoized sequences.

use crate::box_iter::ok;
use core::convert::Infallible;

/// Sequence whose elements are produced on demand and kept afterwards.
pub trait Frontier {
    /// Type of the elements.
    type Item;
    /// Error that producing an element may yield.
    type Error;

    /// Return the element at position `i`, producing all elements up to it if necessary.
    ///
    /// Returns `None` if the sequence has fewer than `i + 1` elements.
    /// An error means that producing the next element failed;
    /// it is not recorded, so asking again produces the element anew.
    fn produce_at(&self, i: usize) -> Option<Result<&Self::Item, Self::Error>>;

    /// Number of elements that have been produced so far.
    fn produced(&self) -> usize;

    /// True if all elements have been produced.
    fn is_exhausted(&self) -> bool;
}

/// Traversal that yields errors produced by the source.
///
/// After an error, the traversal stays at the same position,
/// so calling `next` again retries producing that position.
pub struct TryIter<'r, F: ?Sized> {
    seq: &'r F,
    index: usize,
    done: bool,
}

impl<'r, F: ?Sized> TryIter<'r, F> {
    pub(crate) fn new(seq: &'r F) -> Self {
        Self {
            seq,
            index: 0,
            done: false,
        }
    }
}

impl<'r, F: Frontier + ?Sized> Iterator for TryIter<'r, F>
where
    F::Item: 'r,
{
    type Item = Result<&'r F::Item, F::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.seq.produce_at(self.index) {
            None => {
                self.done = true;
                None
            }
            Some(Ok(x)) => {
                self.index += 1;
                Some(Ok(x))
            }
            Some(Err(e)) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let ahead = self.seq.produced().saturating_sub(self.index);
        let upper = self.seq.is_exhausted().then_some(ahead);
        (ahead, upper)
    }
}

/// Traversal over a sequence whose source cannot fail.
pub struct Iter<'r, F: ?Sized>(TryIter<'r, F>);

impl<'r, F: ?Sized> Iter<'r, F> {
    pub(crate) fn new(seq: &'r F) -> Self {
        Self(TryIter::new(seq))
    }
}

impl<'r, F: Frontier<Error = Infallible> + ?Sized> Iterator for Iter<'r, F>
where
    F::Item: 'r,
{
    type Item = &'r F::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'r, F: Frontier<Error = Infallible> + ?Sized> core::iter::FusedIterator for Iter<'r, F> where
    F::Item: 'r
{
}
