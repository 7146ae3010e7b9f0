use std::collections::TryReserveError;
use thiserror::Error;

/// Convenience type for results returned by fallible collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can be returned by the collections in this crate.
///
/// Misuse of a collection (erasing the end position, erasing a stale position) is a precondition
/// violation and panics instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The allocator could not provide storage for `requested` more elements.
    #[error("failed to reserve storage for {requested} elements")]
    AllocationFailure {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}
