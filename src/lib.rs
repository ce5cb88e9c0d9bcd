//! bitbloom implements a fixed size bloom filter over byte strings, backed by a
//! densely packed [`BitVector`].
//!
//! A [`BloomFilter`] maps each inserted element through an ordered list of
//! 32-bit [hash functions](HashFunction), setting one bit per function. Lookups
//! never return a false negative, and return a false positive with a
//! probability governed by the filter capacity, the number of hash functions
//! and the number of inserted elements.
//!
//! ```rust
//! use bitbloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new_default(1024)?;
//!
//! filter.put_str("abc");
//! assert!(filter.test_str("abc"));
//! # Ok::<(), bitbloom::Error>(())
//! ```
//!
//! The default filter uses the [`djb2`] and [`sdbm`] hash functions. Any
//! `Fn(&[u8]) -> u32` can be used instead, see [`BloomFilterBuilder`].
//!
//! Neither type is internally synchronised: inserts take `&mut self` and
//! lookups take `&self`.

mod bitvec;
mod bloom;
mod error;
pub mod hash;

pub use bitvec::BitVector;
pub use bloom::{BloomFilter, BloomFilterBuilder};
pub use error::{Error, Result};
pub use hash::{djb2, sdbm, HashFn, HashFunction};
