use crate::error::Error;
use crate::error::InvalidArgument;
use crate::probe::Capacity;

/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.45;

/// Construction parameters for a
/// [`ProbingHashTable`](crate::ProbingHashTable).
///
/// Values are only checked by [`validate`](TableConfig::validate), which the
/// table constructors call.
///
/// ```rust
/// # use quadprobe::TableConfig;
/// let config = TableConfig::default()
///     .with_capacity(100)
///     .with_load_factor(0.75);
/// let capacity = config.validate().unwrap();
/// assert_eq!(capacity.get(), 128);
/// assert_eq!(capacity.threshold(config.load_factor), 96);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested number of slots. Rounded up to a power of two, minimum 8.
    pub capacity: usize,
    /// Fraction of slots (live entries plus tombstones) that may be used
    /// before the table doubles.
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::DEFAULT.get(),
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Sets the requested capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor.
    ///
    /// Values above `1.0` are accepted; the table then grows only once
    /// tombstones and live entries exceed its slot count.
    ///
    /// Very small values are accepted too. Once `capacity * load_factor`
    /// floors to zero, every insertion doubles the table, so a load factor
    /// such as `1e-6` exhausts memory (or panics on capacity overflow) after
    /// a few dozen insertions.
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks both parameters and returns the capacity that will actually be
    /// allocated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the capacity is zero or too large, or if
    /// the load factor is NaN, infinite, zero or negative.
    pub fn validate(&self) -> Result<Capacity, Error> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(InvalidArgument::LoadFactor(self.load_factor).into());
        }
        Capacity::new(self.capacity)
    }
}
