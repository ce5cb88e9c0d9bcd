use std::mem;

use tracing::{debug, warn};

use crate::{Error, Result};

/// A fixed-capacity, heap-allocated, `O(1)` indexed bit vector.
///
/// Bits are packed into `usize` words, so a `BitVector` of `n` bits uses
/// `ceil(n / usize::BITS)` words of storage. The capacity is fixed when the
/// vector is constructed and every bit starts cleared:
///
/// ```rust
/// use bitbloom::BitVector;
///
/// let mut v = BitVector::new(64).unwrap();
///
/// v.set(33, true);
/// assert!(v.get(33));
///
/// v.set(33, false);
/// assert!(!v.get(33));
///
/// assert!(v.try_get(64).is_err());
/// ```
///
/// Indexes are bounds checked against the logical capacity, not the rounded up
/// length of the word storage, so padding bits in the last word are never
/// observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    bitmap: Vec<usize>,
    capacity: usize,
}

impl BitVector {
    /// Allocate a `BitVector` able to hold `capacity` bits, all cleared.
    ///
    /// Returns [`Error::Alloc`] if the backing storage cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self> {
        let words = words_for_capacity(capacity);

        let mut bitmap = Vec::new();
        if let Err(source) = bitmap.try_reserve_exact(words) {
            warn!(capacity, words, error = %source, "bit vector allocation failed");
            return Err(Error::Alloc {
                bits: capacity,
                source,
            });
        }
        bitmap.resize(words, 0);

        debug!(capacity, words, "allocated bit vector");

        Ok(Self { bitmap, capacity })
    }

    /// Return the number of addressable bits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return `true` if the vector has a capacity of 0 bits.
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Return the size of the backing storage in bytes.
    pub fn byte_size(&self) -> usize {
        self.bitmap.len() * mem::size_of::<usize>()
    }

    /// Return the number of bits set to `true`.
    pub fn count_ones(&self) -> usize {
        // Padding bits are never set, so whole words can be counted.
        self.bitmap.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Return `true` if the bit at `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`. See [`try_get`](BitVector::try_get) for
    /// a non-panicking variant.
    pub fn get(&self, index: usize) -> bool {
        match self.try_get(index) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }

    /// Return `true` if the bit at `index` is set, or [`Error::OutOfBounds`]
    /// if `index >= capacity`.
    pub fn try_get(&self, index: usize) -> Result<bool> {
        self.check_bounds(index)?;
        Ok(self.bitmap[index_for_key(index)] & bitmask_for_key(index) != 0)
    }

    /// Set the bit at `index` to `value`, leaving all other bits unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`. See [`try_set`](BitVector::try_set) for
    /// a non-panicking variant.
    pub fn set(&mut self, index: usize, value: bool) {
        if let Err(e) = self.try_set(index, value) {
            panic!("{}", e);
        }
    }

    /// Set the bit at `index` to `value`, or return [`Error::OutOfBounds`]
    /// without modifying the vector if `index >= capacity`.
    pub fn try_set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_bounds(index)?;

        let offset = index_for_key(index);
        if value {
            self.bitmap[offset] |= bitmask_for_key(index);
        } else {
            self.bitmap[offset] &= !bitmask_for_key(index);
        }

        Ok(())
    }

    /// Set the bit at `index` to `true`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn set_true(&mut self, index: usize) {
        self.set(index, true)
    }

    /// Set the bit at `index` to `false`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn set_false(&mut self, index: usize) {
        self.set(index, false)
    }

    #[inline(always)]
    fn check_bounds(&self, index: usize) -> Result<()> {
        if index >= self.capacity {
            return Err(Error::OutOfBounds {
                index,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

const WORD_BITS: usize = mem::size_of::<usize>() * 8;

fn words_for_capacity(capacity: usize) -> usize {
    match capacity % WORD_BITS {
        0 => index_for_key(capacity),
        _ => index_for_key(capacity) + 1, // +1 to cover the remainder
    }
}

#[inline(always)]
fn bitmask_for_key(key: usize) -> usize {
    1 << (key % WORD_BITS)
}

#[inline(always)]
fn index_for_key(key: usize) -> usize {
    key / WORD_BITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickcheck_macros::quickcheck;

    const MAX_KEY: usize = 1028;

    macro_rules! contains_only_truthy {
		($bitmap:ident, $max:expr; $(
            $element:expr
        ),*) => {
			let truthy: Vec<usize> = vec![$($element,)*];
			for i in 0..$max {
				assert!($bitmap.get(i) == truthy.contains(&i), "unexpected value {}", i);
			}
		};
	}

    #[test]
    fn test_new_is_zeroed() {
        let b = BitVector::new(100).unwrap();
        assert_eq!(b.capacity(), 100);
        assert_eq!(b.count_ones(), 0);
        contains_only_truthy!(b, 100;);
    }

    #[test]
    fn test_word_rounding() {
        assert_eq!(BitVector::new(0).unwrap().byte_size(), 0);
        assert_eq!(
            BitVector::new(1).unwrap().byte_size(),
            mem::size_of::<usize>()
        );
        assert_eq!(
            BitVector::new(WORD_BITS).unwrap().byte_size(),
            mem::size_of::<usize>()
        );
        assert_eq!(
            BitVector::new(WORD_BITS + 1).unwrap().byte_size(),
            2 * mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_set_contains() {
        let mut b = BitVector::new(101).unwrap();
        b.set(100, true);
        b.set(0, true);
        b.set(42, true);

        contains_only_truthy!(b, 101; 100, 0, 42);
        assert_eq!(b.count_ones(), 3);
    }

    #[test]
    fn test_set_true_false() {
        let mut b = BitVector::new(64).unwrap();

        b.set_true(33);
        assert!(b.get(33));
        b.set_false(33);
        assert!(!b.get(33));

        assert!(!b.get(35));
        b.set(35, true);
        assert!(b.get(35));
    }

    #[test]
    fn test_empty() {
        let b = BitVector::new(0).unwrap();
        assert!(b.is_empty());
        assert!(matches!(
            b.try_get(0),
            Err(Error::OutOfBounds {
                index: 0,
                capacity: 0
            })
        ));
    }

    #[test]
    fn test_out_of_bounds_does_not_mutate() {
        // 10 bits fit in a single word - the padding bits must stay
        // unreachable.
        let mut b = BitVector::new(10).unwrap();
        let before = b.clone();

        assert!(matches!(
            b.try_set(10, true),
            Err(Error::OutOfBounds {
                index: 10,
                capacity: 10
            })
        ));
        assert!(b.try_get(10).is_err());
        assert!(b.try_get(usize::MAX).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn test_alloc_failure() {
        assert!(matches!(
            BitVector::new(usize::MAX),
            Err(Error::Alloc {
                bits: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds bit index 64, capacity 64")]
    fn test_get_panics_at_capacity() {
        let b = BitVector::new(64).unwrap();
        b.get(64);
    }

    #[quickcheck]
    #[should_panic]
    fn test_panic_exceeds_max(max: u16) {
        let max = max as usize;
        let mut b = BitVector::new(max).unwrap();
        b.set(max, true);
    }

    #[quickcheck]
    fn test_set_contains_prop(mut vals: Vec<u16>) {
        vals.truncate(10);
        let mut b = BitVector::new(u16::MAX as usize + 1).unwrap();
        for v in &vals {
            b.set(*v as usize, true);
        }

        for i in 0..=u16::MAX {
            assert!(
                b.get(i as usize) == vals.contains(&i),
                "unexpected value {}",
                i
            );
        }
    }

    proptest! {
        #[test]
        fn prop_insert_contains(
            values in prop::collection::hash_set(0..MAX_KEY, 0..20),
        ) {
            let mut b = BitVector::new(MAX_KEY).unwrap();

            for v in &values {
                b.set(*v, true);
            }

            // Ensure all values are equal in the test range.
            for i in 0..MAX_KEY {
                assert_eq!(b.get(i), values.contains(&i));
            }
            assert_eq!(b.count_ones(), values.len());
        }

        #[test]
        fn prop_set_get_round_trip(
            initial in prop::collection::vec(any::<bool>(), MAX_KEY),
            index in 0..MAX_KEY,
            value in any::<bool>(),
        ) {
            let mut b = BitVector::new(MAX_KEY).unwrap();
            for (i, v) in initial.iter().enumerate() {
                b.set(i, *v);
            }

            b.set(index, value);

            // Invariant: only the written bit changes.
            for (i, v) in initial.iter().enumerate() {
                if i == index {
                    assert_eq!(b.get(i), value);
                } else {
                    assert_eq!(b.get(i), *v);
                }
            }
        }
    }
}
