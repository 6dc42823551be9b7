#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Validated construction parameters.
pub mod config;

/// Mutation-checked cursors over a table's keys.
pub mod cursor;

/// Error types.
pub mod error;

/// The quadratic probing hash table.
///
/// This module provides [`ProbingHashTable`], its iterators and, with the
/// `stats` feature, [`DebugStats`](hash_table::DebugStats).
pub mod hash_table;

pub mod probe;

pub use config::TableConfig;
pub use cursor::KeyCursor;
pub use error::Error;
pub use error::InvalidArgument;
pub use hash_table::ProbingHashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder default hasher for builds without `std` or `foldhash`.
        ///
        /// It cannot be constructed; supply a hasher through
        /// [`ProbingHashTable::with_hasher`] or
        /// [`ProbingHashTable::with_config_and_hasher`].
        #[derive(Debug, Clone, Copy)]
        pub enum DefaultHashBuilder {}
    }
}
