//! Runtime-checked iteration over a table's keys.
//!
//! A [`KeyCursor`] does not borrow the table between steps, so the table can
//! still be used (and misused) while the cursor is live. Each step compares
//! the modification count captured at creation with the table's current one
//! and refuses to continue once they differ.

use log::trace;

use crate::error::Error;
use crate::hash_table::ProbingHashTable;

/// A single-pass cursor over the keys of a [`ProbingHashTable`], in slot
/// order.
///
/// Created by [`ProbingHashTable::cursor`] and bound to that table: stepping
/// it against any other table, a clone included, fails with
/// [`Error::ForeignTable`]. Insertions, updates, removals, `clear` and `drain` all invalidate
/// it; lookups do not. A lookup may relocate an entry along its probe chain,
/// so a key looked up mid-iteration can be skipped or seen twice.
///
/// ```rust
/// # use quadprobe::ProbingHashTable;
/// let mut table = ProbingHashTable::new();
/// table.insert("a", 1);
/// table.insert("b", 2);
///
/// let mut cursor = table.cursor();
/// let mut seen = Vec::new();
/// while cursor.has_next(&table).unwrap() {
///     let key = *cursor.next(&table).unwrap().unwrap();
///     seen.push(key);
///     // Lookups are allowed between steps.
///     assert!(table.get(&key).is_some());
/// }
/// seen.sort();
/// assert_eq!(seen, ["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyCursor {
    table_id: u64,
    index: usize,
    expected_modifications: u64,
}

impl KeyCursor {
    pub(crate) fn new(table_id: u64, expected_modifications: u64) -> Self {
        Self {
            table_id,
            index: 0,
            expected_modifications,
        }
    }

    fn check<K, V, S>(&self, table: &ProbingHashTable<K, V, S>) -> Result<(), Error> {
        if table.id() != self.table_id {
            return Err(Error::ForeignTable);
        }
        let found = table.modification_count();
        if found != self.expected_modifications {
            trace!(
                "key cursor invalidated at slot {} ({} -> {} modifications)",
                self.index, self.expected_modifications, found
            );
            return Err(Error::ConcurrentMutation {
                expected: self.expected_modifications,
                found,
            });
        }
        Ok(())
    }

    /// Returns `true` if another key remains.
    ///
    /// # Errors
    ///
    /// [`Error::ForeignTable`] if `table` did not create this cursor, and
    /// [`Error::ConcurrentMutation`] if the table was modified since the
    /// cursor was created.
    pub fn has_next<K, V, S>(&self, table: &ProbingHashTable<K, V, S>) -> Result<bool, Error> {
        self.check(table)?;
        Ok(table
            .slots()
            .get(self.index..)
            .is_some_and(|rest| rest.iter().any(|slot| slot.is_occupied())))
    }

    /// Advances to the next key, returning `Ok(None)` once every slot has been
    /// visited.
    ///
    /// # Errors
    ///
    /// As for [`has_next`](Self::has_next).
    pub fn next<'a, K, V, S>(
        &mut self,
        table: &'a ProbingHashTable<K, V, S>,
    ) -> Result<Option<&'a K>, Error> {
        self.check(table)?;
        let slots = table.slots();
        while let Some(slot) = slots.get(self.index) {
            self.index += 1;
            if let Some(key) = slot.key() {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    /// Removal through a cursor is not supported.
    ///
    /// # Errors
    ///
    /// Always [`Error::UnsupportedOperation`]; the table is left untouched.
    pub fn remove<K, V, S>(&mut self, _table: &mut ProbingHashTable<K, V, S>) -> Result<(), Error> {
        Err(Error::UnsupportedOperation {
            operation: "remove through a key cursor",
        })
    }
}
