use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;
use core::sync::atomic::AtomicU64;
use core::sync::atomic::Ordering;

use log::debug;
use log::trace;

#[cfg(any(feature = "std", feature = "foldhash"))]
use crate::DefaultHashBuilder;
use crate::config::TableConfig;
use crate::cursor::KeyCursor;
use crate::error::Error;
use crate::probe::Capacity;

/// State of a single bucket.
#[derive(Clone)]
pub(crate) enum Slot<K, V> {
    /// Never used since the last clear or resize.
    Empty,
    /// Previously occupied. Probe chains continue through it.
    Tombstone,
    /// A live entry together with the hash it was placed with.
    Occupied { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    #[inline(always)]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline(always)]
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }

    #[inline(always)]
    fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline(always)]
    fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline(always)]
    fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }
}

fn empty_slots<K, V>(capacity: Capacity) -> Box<[Slot<K, V>]> {
    (0..capacity.get()).map(|_| Slot::Empty).collect()
}

/// Where a probe for a key stopped.
enum Search {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is the empty slot that ended the chain.
    Vacant(usize),
    /// Every slot was probed without finding the key or an empty slot.
    Exhausted,
}

struct Probed {
    search: Search,
    first_tombstone: Option<usize>,
}

/// An open-addressing hash table using quadratic probing.
///
/// Entries live directly in a power-of-two array of slots. A key's home slot
/// is its hash masked to the capacity; collisions continue along the
/// triangular probe sequence `home + (x² + x) / 2`. Removal leaves a
/// tombstone so that chains running through the slot stay intact, and later
/// insertions and lookups reuse the first tombstone on their chain.
///
/// The table doubles (and drops every tombstone) as soon as the number of used
/// slots, live or tombstoned, reaches `floor(capacity * load_factor)` at the
/// start of an insertion. It never shrinks.
///
/// [`get`](Self::get) takes `&mut self`: when a lookup passes a tombstone
/// before reaching its key it moves the entry into that tombstone, shortening
/// the chain for later lookups. [`peek`](Self::peek) is the read-only
/// alternative.
///
/// ## Example
///
/// ```rust
/// # use quadprobe::ProbingHashTable;
/// let mut table = ProbingHashTable::new();
/// assert_eq!(table.insert("alice", 1), None);
/// assert_eq!(table.insert("alice", 2), Some(1));
/// assert_eq!(table.get(&"alice"), Some(&2));
/// assert_eq!(table.remove(&"alice"), Some(2));
/// assert!(table.is_empty());
/// ```
pub struct ProbingHashTable<K, V, S = crate::DefaultHashBuilder> {
    slots: Box<[Slot<K, V>]>,

    capacity: Capacity,
    load_factor: f64,
    threshold: usize,

    used_buckets: usize,
    key_count: usize,
    modification_count: u64,

    /// Distinguishes this table from every other one, clones included, so a
    /// cursor cannot be stepped against the wrong table.
    id: u64,

    hash_builder: S,
}

fn next_table_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

impl<K, V, S> Clone for ProbingHashTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            capacity: self.capacity,
            load_factor: self.load_factor,
            threshold: self.threshold,
            used_buckets: self.used_buckets,
            key_count: self.key_count,
            modification_count: self.modification_count,
            id: next_table_id(),
            hash_builder: self.hash_builder.clone(),
        }
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl<K, V> ProbingHashTable<K, V, DefaultHashBuilder> {
    /// Creates an empty table with 8 slots and a load factor of 0.45.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let table: ProbingHashTable<u32, u32> = ProbingHashTable::new();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.threshold(), 3);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty table with at least `capacity` slots and a load factor
    /// of 0.45.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `capacity` is zero or rounds past the
    /// largest power of two.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let table: ProbingHashTable<u32, u32> = ProbingHashTable::with_capacity(20).unwrap();
    /// assert_eq!(table.capacity(), 32);
    /// assert_eq!(table.load_factor(), 0.45);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_config(TableConfig::default().with_capacity(capacity))
    }

    /// Creates an empty table with at least `capacity` slots and the given
    /// load factor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `capacity` is zero or `load_factor` is
    /// not a finite positive number.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let table: ProbingHashTable<u32, u32> =
    ///     ProbingHashTable::with_capacity_and_load_factor(100, 0.5).unwrap();
    /// assert_eq!(table.capacity(), 128);
    /// assert!(ProbingHashTable::<u32, u32>::with_capacity_and_load_factor(0, 0.5).is_err());
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Result<Self, Error> {
        Self::with_config(TableConfig {
            capacity,
            load_factor,
        })
    }

    /// Creates an empty table from a [`TableConfig`].
    ///
    /// # Errors
    ///
    /// See [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self, Error> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for ProbingHashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ProbingHashTable<K, V, S> {
    /// Creates an empty table with the default configuration and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        let config = TableConfig::default();
        Self::from_parts(Capacity::DEFAULT, config.load_factor, hash_builder)
    }

    /// Creates an empty table from a [`TableConfig`] and a hasher builder.
    ///
    /// # Errors
    ///
    /// See [`TableConfig::validate`].
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self, Error> {
        let capacity = config.validate()?;
        Ok(Self::from_parts(capacity, config.load_factor, hash_builder))
    }

    fn from_parts(capacity: Capacity, load_factor: f64, hash_builder: S) -> Self {
        Self {
            slots: empty_slots(capacity),
            capacity,
            load_factor,
            threshold: capacity.threshold(load_factor),
            used_buckets: 0,
            key_count: 0,
            modification_count: 0,
            id: next_table_id(),
            hash_builder,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.key_count
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }

    /// Returns the number of slots. Always a power of two, at least 8.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the load factor the table was built with.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the number of used slots at which the next insertion grows the
    /// table.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the number of slots holding a live entry or a tombstone.
    pub fn used_buckets(&self) -> usize {
        self.used_buckets
    }

    /// Returns the number of tombstoned slots.
    pub fn tombstones(&self) -> usize {
        self.used_buckets - self.key_count
    }

    /// Returns the number of structural modifications made so far.
    ///
    /// Inserts, updates, removals, resizes, `clear` and `drain` each count.
    /// Lookups never do, even when they relocate an entry.
    pub fn modification_count(&self) -> u64 {
        self.modification_count
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline(always)]
    fn record_modification(&mut self) {
        self.modification_count = self.modification_count.wrapping_add(1);
    }

    /// Removes every entry and tombstone, keeping the current capacity.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let mut table = ProbingHashTable::new();
    /// for i in 0..100 {
    ///     table.insert(i, i);
    /// }
    /// let capacity = table.capacity();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.used_buckets = 0;
        self.key_count = 0;
        self.record_modification();
    }

    /// Returns an iterator over `(&K, &V)` pairs in slot order.
    ///
    /// The borrow keeps the table from being modified while the iterator is
    /// alive. Use [`cursor`](Self::cursor) for iteration that is checked at
    /// runtime instead.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.key_count,
        }
    }

    /// Returns a cursor over the table's keys that fails with
    /// [`Error::ConcurrentMutation`] once the table is structurally modified.
    ///
    /// ```rust
    /// # use quadprobe::{Error, ProbingHashTable};
    /// let mut table = ProbingHashTable::new();
    /// table.insert(1, "one");
    ///
    /// let mut cursor = table.cursor();
    /// assert_eq!(cursor.next(&table), Ok(Some(&1)));
    /// table.insert(2, "two");
    /// assert!(matches!(
    ///     cursor.next(&table),
    ///     Err(Error::ConcurrentMutation { .. })
    /// ));
    /// ```
    pub fn cursor(&self) -> KeyCursor {
        KeyCursor::new(self.id, self.modification_count)
    }

    /// Removes every entry, yielding them in slot order.
    ///
    /// Tombstones are cleared as well. Entries not consumed are dropped when
    /// the iterator is.
    pub fn drain(&mut self) -> Drain<'_, K, V, S> {
        self.record_modification();
        Drain {
            table: self,
            index: 0,
        }
    }

    /// Returns a snapshot of the keys in slot order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns a snapshot of the values in slot order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<K, V, S> ProbingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Walks the probe sequence for `key`, remembering the first tombstone.
    ///
    /// Stops at the key, at the first empty slot, or after `capacity` probes.
    fn search<Q>(&self, hash: u64, key: &Q) -> Probed
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut first_tombstone = None;
        for index in self.capacity.probe_seq(hash) {
            match &self.slots[index] {
                Slot::Empty => {
                    return Probed {
                        search: Search::Vacant(index),
                        first_tombstone,
                    };
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied {
                    hash: stored,
                    key: candidate,
                    ..
                } => {
                    if *stored == hash && <K as Borrow<Q>>::borrow(candidate) == key {
                        return Probed {
                            search: Search::Found(index),
                            first_tombstone,
                        };
                    }
                }
            }
        }

        Probed {
            search: Search::Exhausted,
            first_tombstone,
        }
    }

    /// Finds `key`, moving it into the first tombstone on its chain if one was
    /// passed. Returns the slot the entry ends up in.
    fn find_relocating<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let probed = self.search(hash, key);
        match (probed.search, probed.first_tombstone) {
            (Search::Found(index), None) => Some(index),
            (Search::Found(index), Some(tombstone)) => {
                self.slots.swap(index, tombstone);
                trace!("relocated entry from slot {index} to tombstone {tombstone}");
                Some(tombstone)
            }
            _ => None,
        }
    }

    /// Inserts a key-value pair.
    ///
    /// Returns the previous value if the key was present; the stored key is
    /// kept in that case. Grows the table first if the used slots have
    /// reached the threshold.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let mut table = ProbingHashTable::new();
    /// assert_eq!(table.insert(37, "a"), None);
    /// assert_eq!(table.insert(37, "b"), Some("a"));
    /// assert_eq!(table.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.used_buckets >= self.threshold {
            self.resize();
        }

        let hash = self.hash_builder.hash_one(&key);
        let previous = self.insert_hashed(hash, key, value);
        self.record_modification();
        previous
    }

    fn insert_hashed(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        loop {
            let probed = self.search(hash, &key);
            match (probed.search, probed.first_tombstone) {
                (Search::Found(index), None) => {
                    return self.slots[index]
                        .value_mut()
                        .map(|current| mem::replace(current, value));
                }
                (Search::Found(index), Some(tombstone)) => {
                    self.slots.swap(index, tombstone);
                    return self.slots[tombstone]
                        .value_mut()
                        .map(|current| mem::replace(current, value));
                }
                (Search::Vacant(index), None) => {
                    self.slots[index] = Slot::Occupied { hash, key, value };
                    self.used_buckets += 1;
                    self.key_count += 1;
                    return None;
                }
                (Search::Vacant(_) | Search::Exhausted, Some(tombstone)) => {
                    self.slots[tombstone] = Slot::Occupied { hash, key, value };
                    self.key_count += 1;
                    return None;
                }
                // Only reachable with a load factor of 1 or more: every slot
                // holds a live entry.
                (Search::Exhausted, None) => self.resize(),
            }
        }
    }

    /// Doubles the capacity and re-inserts every live entry, dropping all
    /// tombstones.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the doubled slot count does not fit
    /// in `usize`.
    fn resize(&mut self) {
        let old_capacity = self.capacity;
        let capacity = old_capacity.doubled().expect("capacity overflow");
        let dropped_tombstones = self.tombstones();

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.capacity = capacity;
        self.threshold = capacity.threshold(self.load_factor);
        self.used_buckets = 0;
        self.key_count = 0;

        for slot in old_slots.into_vec() {
            if let Slot::Occupied { hash, key, value } = slot {
                self.insert_hashed(hash, key, value);
            }
        }
        self.record_modification();

        debug!(
            "resized table from {} to {} slots ({} keys, {} tombstones dropped)",
            old_capacity.get(),
            capacity.get(),
            self.key_count,
            dropped_tombstones
        );
    }

    /// Returns a reference to the value for `key`.
    ///
    /// If the probe passed a tombstone before reaching the key, the entry is
    /// moved into that tombstone first. This never changes `len`,
    /// `used_buckets` or `modification_count`, so it is allowed while a
    /// [`KeyCursor`] is live.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let mut table = ProbingHashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find_relocating(key)?;
        self.slots[index].entry().map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value for `key`, relocating it like
    /// [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find_relocating(key)?;
        self.slots[index].value_mut()
    }

    /// Returns a reference to the value for `key` without relocating it.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        match self.search(hash, key).search {
            Search::Found(index) => self.slots[index].entry().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns `true` if the table holds `key`. Relocates like
    /// [`get`](Self::get).
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_relocating(key).is_some()
    }

    /// Removes `key`, returning its value.
    ///
    /// The slot becomes a tombstone. Removing an absent key changes nothing.
    ///
    /// ```rust
    /// # use quadprobe::ProbingHashTable;
    /// let mut table = ProbingHashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// assert_eq!(table.tombstones(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let Search::Found(index) = self.search(hash, key).search else {
            return None;
        };

        let removed = mem::replace(&mut self.slots[index], Slot::Tombstone);
        self.key_count -= 1;
        self.record_modification();
        removed.into_entry()
    }
}

#[cfg(any(test, feature = "stats"))]
impl<K, V, S> ProbingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the slot index currently holding `key`, without relocating it.
    pub fn slot_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        match self.search(hash, key).search {
            Search::Found(index) => Some(index),
            _ => None,
        }
    }
}

/// Debug statistics for hash table analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries.
    pub populated: usize,
    /// Number of slots.
    pub capacity: usize,
    /// Used-slot count that triggers the next resize.
    pub threshold: usize,
    /// Slots holding a live entry or a tombstone.
    pub used_buckets: usize,
    /// Slots holding a tombstone.
    pub tombstones: usize,
    /// Live entries per slot.
    pub load_factor: f64,
    /// Used slots per slot.
    pub bucket_utilization: f64,
    /// Longest probe distance of any live entry.
    pub max_probe_length: usize,
    /// Mean probe distance over live entries.
    pub mean_probe_length: f64,
    /// Bytes occupied by the slot array.
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Buckets: {} used, {} tombstones, threshold {} ({:.2}% utilization)",
            self.used_buckets,
            self.tombstones,
            self.threshold,
            self.bucket_utilization * 100.0
        );
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

#[cfg(any(test, feature = "stats"))]
impl<K, V, S> ProbingHashTable<K, V, S> {
    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// `hist[n]` is the number of live entries stored at the `n`-th position
    /// of their probe sequence, `0` being the home slot. The vector is as long
    /// as the largest probe length plus one (empty for an empty table).
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let mut seq = self.capacity.probe_seq(*hash);
                let distance = if seq.any(|probed| probed == index) {
                    seq.attempts() - 1
                } else {
                    0
                };
                if hist.len() <= distance {
                    hist.resize(distance + 1, 0);
                }
                hist[distance] += 1;
            }
        }
        hist
    }

    /// Returns detailed utilization statistics for debugging.
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.probe_histogram();
        let total_distance: usize = hist
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();
        let capacity = self.capacity.get();

        DebugStats {
            populated: self.key_count,
            capacity,
            threshold: self.threshold,
            used_buckets: self.used_buckets,
            tombstones: self.tombstones(),
            load_factor: self.key_count as f64 / capacity as f64,
            bucket_utilization: self.used_buckets as f64 / capacity as f64,
            max_probe_length: hist.len().saturating_sub(1),
            mean_probe_length: if self.key_count == 0 {
                0.0
            } else {
                total_distance as f64 / self.key_count as f64
            },
            total_bytes: capacity * mem::size_of::<Slot<K, V>>(),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.key_count);
        for (distance, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", distance, "█".repeat(width), count);
        }
    }
}

impl<K, V, S> Debug for ProbingHashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `{key => value, ...}` in slot order.
impl<K, V, S> Display for ProbingHashTable<K, V, S>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} => {value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingHashTable<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ProbingHashTable<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.key_count,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// An iterator over the entries of a [`ProbingHashTable`], in slot order.
///
/// Created by [`ProbingHashTable::iter`].
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An owning iterator over the entries of a [`ProbingHashTable`].
pub struct IntoIter<K, V> {
    slots: alloc::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.by_ref().find_map(Slot::into_entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A draining iterator over the entries of a [`ProbingHashTable`].
///
/// Created by [`ProbingHashTable::drain`]. Every slot it passes, tombstones
/// included, is reset to empty, so the table's counts stay exact even if the
/// iterator is leaked part way.
pub struct Drain<'a, K, V, S> {
    table: &'a mut ProbingHashTable<K, V, S>,
    index: usize,
}

impl<K, V, S> Iterator for Drain<'_, K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.table.used_buckets > 0 && self.index < self.table.slots.len() {
            let slot = mem::replace(&mut self.table.slots[self.index], Slot::Empty);
            self.index += 1;
            match slot {
                Slot::Empty => {}
                Slot::Tombstone => self.table.used_buckets -= 1,
                Slot::Occupied { key, value, .. } => {
                    self.table.used_buckets -= 1;
                    self.table.key_count -= 1;
                    return Some((key, value));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.key_count, Some(self.table.key_count))
    }
}

impl<K, V, S> ExactSizeIterator for Drain<'_, K, V, S> {}

impl<K, V, S> Drop for Drain<'_, K, V, S> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}
