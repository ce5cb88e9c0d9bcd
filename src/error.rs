use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by [`BitVector`](crate::BitVector) and
/// [`BloomFilter`](crate::BloomFilter).
#[derive(Debug, Error)]
pub enum Error {
    /// The backing storage for `bits` bits could not be allocated.
    #[error("failed to allocate storage for {bits} bits: {source}")]
    Alloc {
        bits: usize,
        #[source]
        source: TryReserveError,
    },

    /// A bit index was not below the capacity of the vector.
    #[error("out of bounds bit index {index}, capacity {capacity}")]
    OutOfBounds { index: usize, capacity: usize },

    /// A filter was configured without any hash functions.
    #[error("a bloom filter needs at least one hash function")]
    NoHashFunctions,

    /// A filter was configured with a bit capacity of 0.
    #[error("a bloom filter needs a bit capacity of at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
