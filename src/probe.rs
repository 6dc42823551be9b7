//! Table sizing and the quadratic probe sequence.
//!
//! Slots are visited in the order `home + T(x) mod capacity` for
//! `x = 0, 1, 2, ...` where `T(x) = (x² + x) / 2` is the x-th triangular
//! number. With a power-of-two capacity the first `capacity` probes form a
//! permutation of the slot indices, so a probe loop bounded by `capacity`
//! sees every slot exactly once.

use crate::error::Error;
use crate::error::InvalidArgument;

/// Smallest number of slots a table ever allocates.
pub const MIN_CAPACITY: usize = 8;

/// Number of slots in a table: always a power of two no smaller than
/// [`MIN_CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity {
    slots: usize,
}

impl Capacity {
    /// The capacity used by tables created without an explicit size.
    pub const DEFAULT: Capacity = Capacity {
        slots: MIN_CAPACITY,
    };

    /// Rounds a requested capacity up to the next power of two, clamped below
    /// at [`MIN_CAPACITY`].
    ///
    /// ```rust
    /// # use quadprobe::probe::Capacity;
    /// assert_eq!(Capacity::new(1).unwrap().get(), 8);
    /// assert_eq!(Capacity::new(8).unwrap().get(), 8);
    /// assert_eq!(Capacity::new(100).unwrap().get(), 128);
    /// assert!(Capacity::new(0).is_err());
    /// ```
    pub fn new(requested: usize) -> Result<Self, Error> {
        if requested == 0 {
            return Err(InvalidArgument::Capacity(requested).into());
        }
        let slots = requested
            .checked_next_power_of_two()
            .ok_or(InvalidArgument::CapacityOverflow(requested))?
            .max(MIN_CAPACITY);
        Ok(Capacity { slots })
    }

    /// Number of slots.
    #[inline(always)]
    pub fn get(self) -> usize {
        self.slots
    }

    #[inline(always)]
    fn mask(self) -> usize {
        self.slots - 1
    }

    /// Twice this capacity, or `None` if that does not fit in `usize`.
    #[inline]
    pub fn doubled(self) -> Option<Capacity> {
        self.slots.checked_mul(2).map(|slots| Capacity { slots })
    }

    /// `floor(capacity * load_factor)`, saturating at `usize::MAX`.
    #[inline]
    pub fn threshold(self, load_factor: f64) -> usize {
        (self.slots as f64 * load_factor) as usize
    }

    /// Reduces a hash into `0..capacity`.
    #[inline(always)]
    pub fn normalize(self, hash: u64) -> usize {
        hash as usize & self.mask()
    }

    /// Index of the `attempt`-th probe for `hash`. Attempt `0` is the home
    /// slot.
    #[inline(always)]
    pub fn probe(self, hash: u64, attempt: usize) -> usize {
        self.normalize(hash).wrapping_add(triangular(attempt)) & self.mask()
    }

    /// The full probe sequence for `hash`: exactly `capacity` distinct
    /// indices, starting at the home slot.
    #[inline]
    pub fn probe_seq(self, hash: u64) -> ProbeSeq {
        ProbeSeq {
            capacity: self,
            hash,
            attempt: 0,
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::DEFAULT
    }
}

/// `(x² + x) / 2` modulo `2^usize::BITS`.
///
/// The halving is applied to whichever factor is even so the product never
/// needs a wider intermediate.
#[inline(always)]
fn triangular(x: usize) -> usize {
    if x % 2 == 0 {
        (x / 2).wrapping_mul(x.wrapping_add(1))
    } else {
        x.wrapping_mul(x.wrapping_add(1) / 2)
    }
}

/// Iterator over the slot indices probed for a single hash.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    capacity: Capacity,
    hash: u64,
    attempt: usize,
}

impl ProbeSeq {
    /// Number of probes already yielded.
    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempt
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.attempt == self.capacity.get() {
            return None;
        }
        let index = self.capacity.probe(self.hash, self.attempt);
        self.attempt += 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.get() - self.attempt;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
