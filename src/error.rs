use thiserror::Error;

/// The ways a [`TreeMap`](crate::TreeMap) operation can be refused.
///
/// Every variant reports a caller contract violation. The map is left exactly as it was
/// before the failed call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum TreeMapError {
    /// A lookup or removal was attempted on a map with no entries.
    #[error("map is empty")]
    EmptyContainer,

    /// The requested key is not present in a non-empty map.
    #[error("key not found")]
    KeyNotFound,

    /// An insertion named a key that is already present.
    #[error("key already present")]
    DuplicateKey,

    /// Every key in the map is greater than the query.
    #[error("no key is less than or equal to the query")]
    NoFloorExists,

    /// Every key in the map is less than the query.
    #[error("no key is greater than or equal to the query")]
    NoCeilExists,
}

/// Result type for fallible [`TreeMap`](crate::TreeMap) operations.
pub type Result<T, E = TreeMapError> = core::result::Result<T, E>;
