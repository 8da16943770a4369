//! Sequences that are already fully evaluated.
//!
//! Reading a container has no side effects,
//! so it is exposed as it is instead of being copied into a buffer.

use crate::replay::{Replay, Repr};
use alloc::boxed::Box;
use alloc::collections::{BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;

pub(crate) enum Container<'a, T> {
    Owned(Vec<T>),
    Borrowed(&'a [T]),
    /// ring buffer, indexable but not contiguous
    Deque(&'a VecDeque<T>),
    /// references into a collection that cannot be indexed,
    /// in the order in which the collection yields them
    Refs(Box<[&'a T]>),
}

impl<'a, T> Container<'a, T> {
    pub fn get(&self, i: usize) -> Option<&T> {
        match self {
            Self::Owned(v) => v.get(i),
            Self::Borrowed(s) => s.get(i),
            Self::Deque(d) => d.get(i),
            Self::Refs(r) => r.get(i).copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Owned(v) => v.len(),
            Self::Borrowed(s) => s.len(),
            Self::Deque(d) => d.len(),
            Self::Refs(r) => r.len(),
        }
    }
}

impl<'a, T, L> From<Vec<T>> for Replay<'a, T, L> {
    fn from(v: Vec<T>) -> Self {
        Self(Repr::Container(Container::Owned(v)))
    }
}

impl<'a, T, L, const N: usize> From<[T; N]> for Replay<'a, T, L> {
    fn from(a: [T; N]) -> Self {
        Vec::from(a).into()
    }
}

impl<'a, T, L> From<&'a [T]> for Replay<'a, T, L> {
    fn from(s: &'a [T]) -> Self {
        Self(Repr::Container(Container::Borrowed(s)))
    }
}

impl<'a, T, L> From<&'a Vec<T>> for Replay<'a, T, L> {
    fn from(v: &'a Vec<T>) -> Self {
        v.as_slice().into()
    }
}

impl<'a, T, L> From<&'a VecDeque<T>> for Replay<'a, T, L> {
    fn from(d: &'a VecDeque<T>) -> Self {
        Self(Repr::Container(Container::Deque(d)))
    }
}

impl<'a, T, L> From<&'a BTreeSet<T>> for Replay<'a, T, L> {
    fn from(s: &'a BTreeSet<T>) -> Self {
        Self(Repr::Container(Container::Refs(s.iter().collect())))
    }
}

impl<'a, T, L> From<&'a LinkedList<T>> for Replay<'a, T, L> {
    fn from(l: &'a LinkedList<T>) -> Self {
        Self(Repr::Container(Container::Refs(l.iter().collect())))
    }
}
