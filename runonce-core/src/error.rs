//! Errors of read-only views.
use core::fmt;

/// Errors that can occur when using a sequence as a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The collection is read-only, so the operation is not supported.
    Unsupported(Op),
    /// `copy_to` was given a destination that cannot hold all elements.
    TooShort {
        /// number of elements to copy
        needed: usize,
        /// length of the destination
        available: usize,
    },
}

/// Operations that read-only views reject.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Add an element.
    Insert,
    /// Remove an element.
    Remove,
    /// Remove all elements.
    Clear,
    /// Test whether an element is present.
    Contains,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Insert => "insert".fmt(f),
            Self::Remove => "remove".fmt(f),
            Self::Clear => "clear".fmt(f),
            Self::Contains => "contains".fmt(f),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unsupported(op) => write!(f, "cannot {op} on a read-only sequence"),
            Self::TooShort { needed, available } => write!(
                f,
                "cannot copy {needed} elements into a buffer of length {available}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
