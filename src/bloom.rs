use std::fmt;

use tracing::debug;

use crate::hash::{HashFn, HashFunction, DEFAULT_HASHERS};
use crate::{BitVector, Error, Result};

/// Construct [`BloomFilter`] instances with a chosen set of hash functions.
///
/// ```rust
/// use bitbloom::{djb2, BloomFilterBuilder};
///
/// let mut filter = BloomFilterBuilder::new(1024)
///                     .hasher(djb2 as fn(&[u8]) -> u32)
///                     .hasher(|data: &[u8]| djb2(data).rotate_left(16))
///                     .build()
///                     .unwrap();
///
/// filter.put_str("success!");
/// assert!(filter.test_str("success!"));
/// ```
///
/// The hash functions are evaluated in the order they were added.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H> {
    capacity: usize,
    hashers: Vec<H>,
}

impl<H> BloomFilterBuilder<H>
where
    H: HashFunction,
{
    /// Initialise a builder for a filter of `capacity` bits with no hash
    /// functions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hashers: Vec::new(),
        }
    }

    /// Append a hash function.
    pub fn hasher(mut self, hasher: H) -> Self {
        self.hashers.push(hasher);
        self
    }

    /// Append all the hash functions in `hashers`, in iteration order.
    pub fn hashers<I>(mut self, hashers: I) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        self.hashers.extend(hashers);
        self
    }

    /// Initialise the [`BloomFilter`] instance with the provided parameters.
    pub fn build(self) -> Result<BloomFilter<H>> {
        BloomFilter::new(self.capacity, self.hashers)
    }
}

impl BloomFilterBuilder<HashFn> {
    /// Initialise a builder for a filter of `capacity` bits, pre-populated
    /// with the [`djb2`](crate::djb2) and [`sdbm`](crate::sdbm) hash
    /// functions.
    pub fn default_hashers(capacity: usize) -> Self {
        Self::new(capacity).hashers(DEFAULT_HASHERS)
    }
}

/// A fixed size bloom filter over byte strings.
///
/// Each inserted element sets one bit per hash function, at the position
/// `hash(data) % capacity`. A lookup checks the same positions and reports the
/// element as present only if every bit is set:
///
/// ```rust
/// use bitbloom::BloomFilter;
///
/// let mut b = BloomFilter::new_default(1024).unwrap();
///
/// b.put_str("abc");
/// assert!(b.test_str("abc"));
/// assert!(!b.test_str("bcd"));
/// ```
///
/// If [`test`](BloomFilter::test) returns `true` the element has
/// **probably** been inserted. If it returns `false` the element has
/// **definitely not** been inserted.
///
/// For `k` hash functions, `n` inserted elements and a capacity of `m` bits
/// the probability of a false positive is approximately
/// `(1 - e^(-k * n / m))^k`, see
/// [`false_positive_probability`](BloomFilter::false_positive_probability).
///
/// The capacity and hash functions are fixed at construction. There is no way
/// to remove an element or grow the filter.
#[derive(Clone)]
pub struct BloomFilter<H = HashFn> {
    bits: BitVector,
    hashers: Vec<H>,
    item_count: u64,
}

impl BloomFilter<HashFn> {
    /// Initialise a filter of `capacity` bits using the [`djb2`](crate::djb2)
    /// and [`sdbm`](crate::sdbm) hash functions.
    pub fn new_default(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_HASHERS.to_vec())
    }
}

impl<H> BloomFilter<H>
where
    H: HashFunction,
{
    /// Initialise an empty filter of `capacity` bits that derives bit
    /// positions from each of `hashers`, in order.
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is 0,
    /// [`Error::NoHashFunctions`] if `hashers` is empty and [`Error::Alloc`]
    /// if the bit vector cannot be allocated.
    pub fn new(capacity: usize, hashers: Vec<H>) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if hashers.is_empty() {
            return Err(Error::NoHashFunctions);
        }

        let bits = BitVector::new(capacity)?;

        debug!(capacity, num_functions = hashers.len(), "created bloom filter");

        Ok(Self {
            bits,
            hashers,
            item_count: 0,
        })
    }

    /// Insert `data` into the filter.
    ///
    /// Any subsequent call to [`test`](BloomFilter::test) for the same `data`
    /// returns `true`.
    pub fn put(&mut self, data: &[u8]) {
        for hasher in &self.hashers {
            let pos = position(hasher, data, self.bits.capacity());
            self.bits.set_true(pos);
            self.item_count += 1;
        }
    }

    /// Insert the UTF-8 bytes of `text` into the filter.
    pub fn put_str(&mut self, text: &str) {
        self.put(text.as_bytes())
    }

    /// Checks if `data` exists in the filter.
    ///
    /// Hash functions are evaluated in order and evaluation stops at the first
    /// unset bit.
    pub fn test(&self, data: &[u8]) -> bool {
        self.hashers
            .iter()
            .all(|hasher| self.bits.get(position(hasher, data, self.bits.capacity())))
    }

    /// Checks if the UTF-8 bytes of `text` exist in the filter.
    pub fn test_str(&self, text: &str) -> bool {
        self.test(text.as_bytes())
    }
}

impl<H> BloomFilter<H> {
    /// Return the number of bits in the filter.
    pub fn capacity(&self) -> usize {
        self.bits.capacity()
    }

    /// Return the number of hash functions.
    pub fn num_functions(&self) -> usize {
        self.hashers.len()
    }

    /// Return the number of hash evaluations performed by
    /// [`put`](BloomFilter::put).
    ///
    /// This is incremented once per hash function for every insert, so after
    /// `n` inserts into a filter with `k` hash functions it returns `n * k`,
    /// not `n`.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Return the byte size of the underlying bit vector.
    pub fn byte_size(&self) -> usize {
        self.bits.byte_size()
    }

    /// Return the fraction of bits that are set, in the range `[0, 1]`.
    pub fn load(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.capacity() as f64
    }

    /// Return the theoretical probability that [`test`](BloomFilter::test)
    /// reports a false positive for an element that was never inserted,
    /// given the number of inserts so far.
    pub fn false_positive_probability(&self) -> f64 {
        // item_count is already k * n.
        let k = self.hashers.len() as f64;
        let m = self.bits.capacity() as f64;

        (1.0 - (-(self.item_count as f64) / m).exp()).powf(k)
    }
}

impl<H> fmt::Debug for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("capacity", &self.bits.capacity())
            .field("num_functions", &self.hashers.len())
            .field("item_count", &self.item_count)
            .finish()
    }
}

#[inline(always)]
fn position<H: HashFunction>(hasher: &H, data: &[u8], capacity: usize) -> usize {
    hasher.hash32(data) as usize % capacity
}
