//! Boxed iterators.

use alloc::boxed::Box;
use core::convert::Infallible;

/// A boxed iterator.
pub type BoxIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// A boxed iterator that can be moved to another thread.
pub type SendBoxIter<'a, T> = Box<dyn Iterator<Item = T> + Send + 'a>;

/// A boxed iterator over `Result`s.
pub type Results<'a, T, E> = BoxIter<'a, Result<T, E>>;

/// A boxed iterator over `Result`s that can be moved to another thread.
pub type SendResults<'a, T, E> = SendBoxIter<'a, Result<T, E>>;

/// Box an iterator that cannot fail.
pub(crate) fn box_ok<'a, T: 'a, E: 'a>(iter: impl Iterator<Item = T> + 'a) -> Results<'a, T, E> {
    Box::new(iter.map(Ok))
}

/// Box an iterator that cannot fail, keeping it [`Send`].
#[cfg(feature = "std")]
pub(crate) fn box_ok_send<'a, T: 'a, E: 'a>(
    iter: impl Iterator<Item = T> + Send + 'a,
) -> SendResults<'a, T, E> {
    Box::new(iter.map(Ok))
}

/// Extract the value of a result that cannot be an error.
pub(crate) fn ok<T>(x: Result<T, Infallible>) -> T {
    match x {
        Ok(x) => x,
        Err(e) => match e {},
    }
}
