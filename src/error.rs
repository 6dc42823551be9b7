use thiserror::Error;

/// Errors reported by [`ProbingHashTable`](crate::ProbingHashTable) and its
/// [`KeyCursor`](crate::KeyCursor).
///
/// Missing keys are never errors: lookups and removals return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A construction parameter was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The table was structurally modified after a cursor was created.
    #[error(
        "table modified during iteration (expected modification count {expected}, found {found})"
    )]
    ConcurrentMutation {
        /// Modification count captured when the cursor was created.
        expected: u64,
        /// Modification count observed on the table.
        found: u64,
    },

    /// A cursor was stepped against a table other than the one that created
    /// it.
    #[error("cursor belongs to a different table")]
    ForeignTable,

    /// The requested operation is not supported through this interface.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

/// The specific construction parameter that failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvalidArgument {
    /// Capacity must be greater than zero.
    #[error("illegal capacity: {0}")]
    Capacity(usize),

    /// Load factor must be finite and greater than zero.
    #[error("illegal load factor: {0}")]
    LoadFactor(f64),

    /// No power of two at or above the requested capacity fits in `usize`.
    #[error("capacity {0} overflows the addressable table size")]
    CapacityOverflow(usize),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err: Error = InvalidArgument::Capacity(0).into();
        assert_eq!(err.to_string(), "invalid argument: illegal capacity: 0");

        let err: Error = InvalidArgument::LoadFactor(-0.5).into();
        assert_eq!(
            err.to_string(),
            "invalid argument: illegal load factor: -0.5"
        );

        let err = Error::ConcurrentMutation {
            expected: 3,
            found: 4,
        };
        assert!(err.to_string().contains("expected modification count 3"));
        assert!(err.to_string().contains("found 4"));

        assert_eq!(
            Error::ForeignTable.to_string(),
            "cursor belongs to a different table"
        );

        let err = Error::UnsupportedOperation { operation: "remove" };
        assert_eq!(err.to_string(), "unsupported operation: remove");
    }
}
