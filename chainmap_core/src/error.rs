//! Error definitions.
use thiserror::Error;

/// Project-wise error type.
///
/// A missing key is not an error: lookups and deletions signal it with [`None`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainMapError {
    /// Occurs during construction of a hash table when the capacity hint (optionally combined
    /// with a load factor) does not produce a usable positive number of buckets.
    #[error("Capacity hint {capacity_hint} does not produce a usable number of buckets.")]
    InvalidCapacity { capacity_hint: i64 },
}
