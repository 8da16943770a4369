//! Read-only collection interface.

use crate::box_iter::ok;
use crate::cursor::Frontier;
use crate::error::{Error, Op};
use crate::replay::Replay;
use alloc::vec::Vec;
use core::convert::Infallible;

/// Collection whose elements can be counted and copied, but not modified.
///
/// The modifying operations exist so that sequences can be passed
/// wherever a collection is expected; they always fail.
pub trait Collection<T> {
    /// Number of elements.
    fn len(&self) -> usize;

    /// True if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone all elements into the beginning of `dst`, returning their number.
    fn copy_to(&self, dst: &mut [T]) -> Result<usize, Error>
    where
        T: Clone;

    /// Clone all elements into a new vector.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone;

    /// Always true.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Fail with [`Error::Unsupported`].
    fn insert(&mut self, _x: T) -> Result<(), Error> {
        Err(Error::Unsupported(Op::Insert))
    }

    /// Fail with [`Error::Unsupported`].
    fn remove(&mut self, _x: &T) -> Result<bool, Error> {
        Err(Error::Unsupported(Op::Remove))
    }

    /// Fail with [`Error::Unsupported`].
    fn clear(&mut self) -> Result<(), Error> {
        Err(Error::Unsupported(Op::Clear))
    }

    /// Fail with [`Error::Unsupported`].
    fn contains(&self, _x: &T) -> Result<bool, Error> {
        Err(Error::Unsupported(Op::Contains))
    }
}

impl<'a, T, L: Frontier<Item = T, Error = Infallible>> Collection<T> for Replay<'a, T, L> {
    fn len(&self) -> usize {
        ok(self.try_len())
    }

    fn is_empty(&self) -> bool {
        self.get(0).is_none()
    }

    fn copy_to(&self, dst: &mut [T]) -> Result<usize, Error>
    where
        T: Clone,
    {
        let needed = self.len();
        let available = dst.len();
        if needed > available {
            return Err(Error::TooShort { needed, available });
        }
        dst.iter_mut().zip(self).for_each(|(d, x)| d.clone_from(x));
        Ok(needed)
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

#[cfg(feature = "std")]
#[test]
fn dyn_collections() {
    use crate::{Memo, SyncMemo};
    use alloc::boxed::Box;

    let mut seqs: [Box<dyn Collection<u8>>; 3] = [
        Box::new(Memo::new(0..3u8)),
        Box::new(SyncMemo::new(0..3u8)),
        Box::new(<Memo<u8>>::from(alloc::vec![0, 1, 2])),
    ];
    for seq in seqs.iter_mut() {
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.to_vec(), [0, 1, 2]);
        assert_eq!(seq.clear(), Err(Error::Unsupported(Op::Clear)));
        assert_eq!(seq.len(), 3);
    }
}
