use thiserror::Error as ThisError;

/// Result type returned by the fallible [`TreeMap`][crate::TreeMap] operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The ways a [`TreeMap`][crate::TreeMap] operation can fail. None of these leave the map
/// partially modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The map has no entries at all.
    #[error("tree is empty")]
    EmptyTree,

    /// The map has entries but none with the requested key.
    #[error("key not found")]
    KeyNotFound,

    /// An entry with the inserted key already exists. Remove it first to replace its value.
    #[error("key is already present")]
    DuplicateKey,

    /// No key in the map lies on the requested side of the query key.
    #[error("no key satisfies the bound")]
    KeyOutOfRange,
}
