//! Implements constructors for [`ChainedMap`].
use crate::chained::ChainedMap;
use chainmap_core::ChainMapError::{self, InvalidCapacity};
use chainmap_core::Hasher;
use log::debug;

impl<K: Eq, V, H: Hasher<K>> ChainedMap<K, V, H> {
    /// Load factor assumed by [`ChainedMap::new`]: one bucket per expected entry.
    pub const DEFAULT_LOAD_FACTOR: f64 = 1.0;

    /// Upper bound on the number of buckets requested from the hasher.
    ///
    /// Power-of-two hashers never round a request at or below this bound past it.
    pub const MAX_BUCKETS: u32 = 1 << 26;

    /// Upper bound on the number of entry slots reserved up-front.
    const MAX_PREALLOCATED_SLOTS: i64 = 1 << 20;

    /// Calculates the number of buckets to request for the given capacity hint and load factor.
    fn requested_buckets(capacity_hint: i64, load_factor: f64) -> Option<u32> {
        if capacity_hint <= 0 || !load_factor.is_finite() || load_factor <= 0.0 {
            return None;
        }

        let num_buckets = (capacity_hint as f64 / load_factor).ceil();
        if num_buckets > Self::MAX_BUCKETS as f64 {
            return None;
        }

        Some((num_buckets as u32).max(1))
    }

    /// Creates a new empty [`ChainedMap`] sized for `capacity_hint` expected entries.
    ///
    /// # Errors
    ///
    /// - [`ChainMapError::InvalidCapacity`] if `capacity_hint` is not positive or requires more
    ///   than [`ChainedMap::MAX_BUCKETS`] buckets, or the bucket array cannot be allocated.
    pub fn new(capacity_hint: i64) -> Result<Self, ChainMapError> {
        Self::with_params(capacity_hint, Self::DEFAULT_LOAD_FACTOR, 0)
    }

    /// Creates a new empty [`ChainedMap`] with the given capacity hint, target load factor and
    /// hasher seed.
    ///
    /// # Parameters
    ///
    /// - `capacity_hint`: The expected number of entries.
    /// - `load_factor`: The desirable ratio of entries to buckets. The hasher may round the
    ///                  resulting number of buckets up, never down.
    /// - `seed`: The seed for seeded hashers, ignored by deterministic ones.
    ///
    /// # Errors
    ///
    /// - [`ChainMapError::InvalidCapacity`] if `capacity_hint` is not positive, `load_factor` is
    ///   not a finite positive number or the resulting number of buckets exceeds
    ///   [`ChainedMap::MAX_BUCKETS`] or cannot be allocated.
    pub fn with_params(
        capacity_hint: i64,
        load_factor: f64,
        seed: u64,
    ) -> Result<Self, ChainMapError> {
        let requested = Self::requested_buckets(capacity_hint, load_factor)
            .ok_or(InvalidCapacity { capacity_hint })?;

        let hasher = H::from_seed(seed, requested);
        let num_buckets = hasher.num_buckets() as usize;

        debug!(
            "Creating chained map: capacity hint {}, load factor {}, {} buckets ({} requested)",
            capacity_hint, load_factor, num_buckets, requested,
        );

        let mut buckets = Vec::new();
        if let Err(e) = buckets.try_reserve_exact(num_buckets) {
            debug!("Failed to allocate {} buckets: {}", num_buckets, e);
            return Err(InvalidCapacity { capacity_hint });
        }
        buckets.resize(num_buckets, None);

        Ok(Self {
            hasher,
            buckets: buckets.into_boxed_slice(),
            slots: Vec::with_capacity(capacity_hint.min(Self::MAX_PREALLOCATED_SLOTS) as usize),
            free_head: None,
            len: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hashers::{MaskHasher, ModuloHasher, MultiplyShiftHasher};
    use chainmap_core::HashMap;

    fn factory<K: Eq, V, H: Hasher<K>>(capacity_hint: i64) -> ChainedMap<K, V, H> {
        ChainedMap::new(capacity_hint).unwrap()
    }

    fn seeded_factory<K: Eq, V, H: Hasher<K>>(capacity_hint: i64) -> ChainedMap<K, V, H> {
        ChainedMap::with_params(capacity_hint, 0.75, 42).unwrap()
    }

    mod modulo {
        use super::*;
        chainmap_testing::generate_map_tests!(ChainedMap, ModuloHasher, factory);
    }

    mod mask {
        use super::*;
        chainmap_testing::generate_map_tests!(ChainedMap, MaskHasher, factory);
    }

    mod multiply_shift {
        use super::*;
        chainmap_testing::generate_map_tests!(ChainedMap, MultiplyShiftHasher, seeded_factory);
    }

    #[cfg(feature = "xxh3")]
    mod xxh3 {
        use super::*;
        use crate::hashing::hashers::XXH3Hasher;
        chainmap_testing::generate_map_tests!(ChainedMap, XXH3Hasher, seeded_factory);
    }

    #[test]
    fn test_new_rejects_non_positive_capacity() {
        for capacity_hint in [0, -1, i64::MIN] {
            assert_eq!(
                ChainedMap::<i64, i64>::new(capacity_hint).unwrap_err(),
                InvalidCapacity { capacity_hint }
            );
        }
    }

    #[test]
    fn test_with_params_rejects_invalid_load_factor() {
        for load_factor in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert_eq!(
                ChainedMap::<i64, i64>::with_params(10, load_factor, 0).unwrap_err(),
                InvalidCapacity { capacity_hint: 10 }
            );
        }
    }

    #[test]
    fn test_with_params_rejects_too_many_buckets() {
        let capacity_hint = ChainedMap::<i64, i64>::MAX_BUCKETS as i64 + 1;
        assert!(ChainedMap::<i64, i64>::new(capacity_hint).is_err());
        assert!(ChainedMap::<i64, i64>::with_params(1 << 30, 0.25, 0).is_err());
    }

    #[test]
    fn test_huge_capacity_is_rejected_without_allocating() {
        for capacity_hint in [1 << 31, 1 << 40, i64::MAX] {
            assert_eq!(
                ChainedMap::<i64, i64>::new(capacity_hint).unwrap_err(),
                InvalidCapacity { capacity_hint }
            );
            assert_eq!(
                ChainedMap::<i64, i64, MaskHasher<i64>>::new(capacity_hint).unwrap_err(),
                InvalidCapacity { capacity_hint }
            );
        }
    }

    #[test]
    fn test_bucket_count_derivation() {
        assert_eq!(ChainedMap::<i64, i64>::new(1).unwrap().num_buckets(), 1);
        assert_eq!(ChainedMap::<i64, i64>::new(7).unwrap().num_buckets(), 7);
        assert_eq!(
            ChainedMap::<i64, i64>::with_params(10, 0.75, 0)
                .unwrap()
                .num_buckets(),
            14
        );
        assert_eq!(
            ChainedMap::<i64, i64>::with_params(10, 100.0, 0)
                .unwrap()
                .num_buckets(),
            1
        );
        assert_eq!(
            ChainedMap::<i64, i64, MaskHasher<i64>>::new(5)
                .unwrap()
                .num_buckets(),
            8
        );
    }

    #[test]
    fn test_new_map_is_empty() {
        let map = ChainedMap::<i32, i32, MultiplyShiftHasher<i32>>::new(100).unwrap();

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.load_factor(), 0.0);
        assert_eq!(map.num_collisions(), 0);
        assert_eq!(map.iter().count(), 0);
        assert!((0..map.num_buckets()).all(|b| map.chain_len(b) == 0));
    }
}
