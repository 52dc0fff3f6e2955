//! Core trait and type declarations for the whole project.

/// Hasher for the specific data-type that reduces a value into a bucket index.
///
/// Differs from [`core::hash::Hasher`] in the way that it is specific for a certain type and is not
/// supposed to be universal. The output is already reduced into the bucket range, so callers can
/// index with it directly.
pub trait Hasher<T>
where
    Self: Default,
    T: Eq,
{
    /// State of the hasher instance.
    ///
    /// Usually contains such information as seed-values and number of buckets. But it's up to
    /// the implementation to decide what to store in it.
    type State: Clone + Default;

    /// Make a new state for the hasher with a given `seed` and `num_buckets` number of buckets.
    ///
    /// Implementations may round `num_buckets` (for example up to a power of two), the actual
    /// number is reported by [`Hasher::num_buckets`].
    fn make_state(seed: u64, num_buckets: u32) -> Self::State;

    /// Create a new hasher with a given `seed` and `num_buckets` number of buckets.
    fn from_seed(seed: u64, num_buckets: u32) -> Self;

    /// Create a new hasher from the given `state`.
    fn from_state(state: Self::State) -> Self;

    /// Get the state of the hasher.
    fn state(&self) -> &Self::State;

    /// Get the number of buckets (the exclusive upper bound of the hash value).
    fn num_buckets(&self) -> u32;

    /// Hash the given `value` into `[0, num_buckets)`.
    ///
    /// # Guarantees
    ///
    /// - Total: never panics, negative inputs included.
    /// - Deterministic for a given state.
    fn hash(&self, value: &T) -> u32;
}

/// A mutable hash map with explicit deletion.
///
/// Values are copied out, references to the stored entries never escape the map.
pub trait HashMap<K: Eq, V: Copy, H: Hasher<K>> {
    /// Associate `value` with `key`, overwriting the previous value in place if present.
    fn put(&mut self, key: K, value: V);

    /// Get the value associated with the given `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Remove the entry for `key` and return its value.
    fn delete(&mut self, key: &K) -> Option<V>;

    /// Get the number of elements in the map.
    fn len(&self) -> usize;

    /// Check if the map is empty.
    fn is_empty(&self) -> bool;

    /// Get the load factor of the map.
    fn load_factor(&self) -> f64;

    /// Get the number of collisions in the map.
    fn num_collisions(&self) -> usize;
}
