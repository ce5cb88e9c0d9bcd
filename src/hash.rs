//! 32-bit hash functions used to derive bit positions in a
//! [`BloomFilter`](crate::BloomFilter).

/// Initial value of the [`djb2`] accumulator.
pub const DJB2_INIT: u32 = 5381;

/// A deterministic mapping from a byte string to a 32-bit value.
///
/// Any `Fn(&[u8]) -> u32` implements this trait, including plain `fn` items,
/// closures and boxed closures:
///
/// ```rust
/// use bitbloom::HashFunction;
///
/// let len = |data: &[u8]| data.len() as u32;
/// assert_eq!(len.hash32(b"four"), 4);
///
/// let boxed: Box<dyn Fn(&[u8]) -> u32> = Box::new(bitbloom::djb2);
/// assert_eq!(boxed.hash32(b"abc"), bitbloom::djb2(b"abc"));
/// ```
///
/// Implementations MUST return the same value for the same input bytes. A
/// filter built from a non-deterministic hasher can report false negatives.
pub trait HashFunction {
    /// Hash `data` to a 32-bit value.
    fn hash32(&self, data: &[u8]) -> u32;
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> u32,
{
    #[inline]
    fn hash32(&self, data: &[u8]) -> u32 {
        self(data)
    }
}

/// The hasher type used by [`BloomFilter::new_default`](crate::BloomFilter::new_default).
pub type HashFn = fn(&[u8]) -> u32;

/// The default hash functions, in evaluation order.
pub const DEFAULT_HASHERS: [HashFn; 2] = [djb2, sdbm];

/// Dan Bernstein's multiplicative hash: `hash * 33 + byte`, seeded with
/// [`DJB2_INIT`].
pub fn djb2(data: &[u8]) -> u32 {
    data.iter().fold(DJB2_INIT, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(byte as u32)
    })
}

/// The sdbm hash: `byte + (hash << 6) + (hash << 16) - hash`, seeded with 0.
pub fn sdbm(data: &[u8]) -> u32 {
    data.iter().fold(0, |hash: u32, &byte| {
        (byte as u32)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash)
    })
}
